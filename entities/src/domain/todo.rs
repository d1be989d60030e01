use crate::{algebra::Keyed, ApplicationError, Id, IdPrefix, TodoError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: Id,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: i64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub attachment_path: Option<String>,
}

impl Todo {
    /// Builds a fresh record. `text` must already be validated.
    pub fn new(text: String, due_date: Option<NaiveDate>, attachment_path: Option<String>) -> Self {
        Self {
            id: Id::now(IdPrefix::Todo),
            text,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
            due_date,
            attachment_path,
        }
    }

    /// Full-replace update: text and due date always take the supplied values,
    /// the attachment only changes when a new one is given. Returns the path
    /// that was superseded, if any.
    pub fn replace(
        &mut self,
        text: String,
        due_date: Option<NaiveDate>,
        attachment_path: Option<String>,
    ) -> Option<String> {
        self.text = text;
        self.due_date = due_date;

        match attachment_path {
            Some(path) => self.attachment_path.replace(path),
            None => None,
        }
    }
}

impl Keyed for Todo {
    fn key(&self) -> &Id {
        &self.id
    }
}

/// Trims `text` and rejects it when nothing is left.
pub fn validate_text(text: Option<&str>) -> Result<String, TodoError> {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApplicationError::validation("Todo text is required", Some("text"))),
    }
}

/// Parses the wire form of a due date. An empty value means "no due date".
pub fn parse_due_date(value: Option<&str>) -> Result<Option<NaiveDate>, TodoError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, crate::DUE_DATE_FORMAT)
            .map(Some)
            .map_err(|e| {
                ApplicationError::validation(
                    &format!("Invalid due date {value}: {e}"),
                    Some("dueDate"),
                )
            }),
    }
}
