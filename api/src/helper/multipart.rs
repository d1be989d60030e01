use super::Upload;
use axum::extract::{multipart::MultipartRejection, Multipart};
use entities::{ApplicationError, TodoError, DUE_DATE_FIELD, FILE_FIELD, TEXT_FIELD};
use tracing::debug;

/// Raw fields of a create or update request, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub text: Option<String>,
    pub due_date: Option<String>,
    pub attachment: Option<Upload>,
}

pub async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<TodoForm, TodoError> {
    let mut multipart = multipart.map_err(|e| {
        ApplicationError::validation(&format!("Expected a multipart body: {e}"), Some("body"))
    })?;
    let mut form = TodoForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(String::from);

        match name.as_deref() {
            Some(TEXT_FIELD) => form.text = Some(field.text().await.map_err(malformed)?),
            Some(DUE_DATE_FIELD) => form.due_date = Some(field.text().await.map_err(malformed)?),
            Some(FILE_FIELD) => {
                let file_name = field.file_name().map(String::from);
                let bytes = field.bytes().await.map_err(malformed)?;

                // Browsers send an empty part when no file was picked
                if file_name.as_deref().unwrap_or_default().is_empty() && bytes.is_empty() {
                    continue;
                }

                form.attachment = Some(Upload { file_name, bytes });
            }
            other => debug!("Ignoring unexpected form field {other:?}"),
        }
    }

    Ok(form)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> TodoError {
    ApplicationError::validation(&format!("Malformed multipart body: {e}"), Some("body"))
}
