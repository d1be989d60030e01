use crate::context::{form, TestServer, ALLOWED_ORIGIN};
use entities::{Id, IdPrefix, Todo, TODOS_PATH};
use fake::{faker::lorem::en::Sentence, Fake};
use http::{
    header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
    Method, StatusCode,
};
use serde_json::{json, Value};
use std::collections::HashSet;

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let server = TestServer::new().await;

    let res = server
        .send_request::<Value>(
            TODOS_PATH,
            Method::POST,
            Some(form("Buy milk", "2024-01-01")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::CREATED);
    assert_eq!(res.data["text"], json!("Buy milk"));
    assert_eq!(res.data["dueDate"], json!("2024-01-01"));
    assert_eq!(res.data["completed"], json!(false));

    let created: Todo = serde_json::from_value(res.data).unwrap();

    let res = server
        .send_request::<Todo>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::PUT,
            Some(form("Buy oat milk", "")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data.id, created.id);

    let fetched = server.list().await;
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, created.id);
    assert_eq!(fetched[0].text, "Buy oat milk");

    let res = server
        .send_request::<Value>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::DELETE,
            None,
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data, json!({ "message": "Todo deleted" }));
    assert!(server.list().await.iter().all(|t| t.id != created.id));
}

#[tokio::test]
async fn test_created_records_echo_text_with_unique_ids() {
    let server = TestServer::new().await;

    let mut ids = HashSet::new();
    for _ in 0..10 {
        let text: String = Sentence(2..6).fake();
        let todo = server.create(form(&text, "")).await;

        assert_eq!(todo.text, text.trim());
        assert_eq!(todo.due_date, None);
        assert!(ids.insert(todo.id));
    }

    assert_eq!(server.list().await.len(), 10);
}

#[tokio::test]
async fn test_create_without_text_is_rejected() {
    let server = TestServer::new().await;

    let res = server
        .send_request::<Value>(TODOS_PATH, Method::POST, Some(form("   ", "2024-01-01")))
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data, json!({ "error": "Failed to add todo" }));
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn test_create_requires_a_multipart_body() {
    let server = TestServer::new().await;

    let res = server
        .client
        .post(format!("{}{TODOS_PATH}", server.address))
        .json(&json!({ "text": "Buy milk" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let server = TestServer::new().await;
    let existing = server.create(form("Keep me", "")).await;

    let res = server
        .send_request::<Value>(
            &format!("{TODOS_PATH}/{}", Id::now(IdPrefix::Todo)),
            Method::PUT,
            Some(form("Replaced", "")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(res.data, json!({ "error": "Todo not found" }));
    assert_eq!(server.list().await, vec![existing]);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let server = TestServer::new().await;

    let res = server
        .send_request::<Value>(&format!("{TODOS_PATH}/not-an-id"), Method::DELETE, None)
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(res.data, json!({ "error": "Todo not found" }));
}

#[tokio::test]
async fn test_list_is_stable_without_writes() {
    let server = TestServer::new().await;
    for text in ["one", "two", "three"] {
        server.create(form(text, "")).await;
    }

    let first = server.list().await;
    let second = server.list().await;

    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        vec!["one", "two", "three"]
    );
}

#[tokio::test]
async fn test_unreachable_store_is_a_generic_failure() {
    let server = TestServer::new().await;
    server.store.set_available(false);

    let res = server
        .send_request::<Value>(TODOS_PATH, Method::GET, None)
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data, json!({ "error": "Failed to fetch todos" }));
}

#[tokio::test]
async fn test_cors_allows_only_the_configured_origin() {
    let server = TestServer::new().await;
    let url = format!("{}{TODOS_PATH}", server.address);

    let allowed = server
        .client
        .get(&url)
        .header(ORIGIN, ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ALLOWED_ORIGIN
    );

    let denied = server
        .client
        .get(&url)
        .header(ORIGIN, "https://elsewhere.example.com")
        .send()
        .await
        .unwrap();
    assert!(denied.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
