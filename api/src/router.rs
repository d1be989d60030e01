use crate::{logic::todo, server::AppState};
use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, Router};
use entities::{TODOS_PATH, UPLOADS_PREFIX};
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub fn get_router(state: &Arc<AppState>) -> Result<Router<Arc<AppState>>> {
    let origin = state
        .config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid ALLOWED_ORIGIN {}", state.config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .nest(TODOS_PATH, todo::get_router())
        .nest_service(
            UPLOADS_PREFIX,
            ServeDir::new(state.gateway.content().root()),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
