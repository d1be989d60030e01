use thiserror::Error;

/// Failures caused by the caller: bad input or a key that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        subtype: Option<String>,
    },
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        subtype: Option<String>,
    },
}

impl ApplicationError {
    pub fn validation(message: &str, subtype: Option<&str>) -> TodoError {
        TodoError::Application(ApplicationError::Validation {
            message: message.to_string(),
            subtype: subtype.map(String::from),
        })
    }

    pub fn not_found(message: &str, subtype: Option<&str>) -> TodoError {
        TodoError::Application(ApplicationError::NotFound {
            message: message.to_string(),
            subtype: subtype.map(String::from),
        })
    }
}

/// Failures of the collaborators the service depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        subtype: Option<String>,
    },
    #[error("Filesystem error: {message}")]
    Filesystem {
        message: String,
        subtype: Option<String>,
    },
}

impl InternalError {
    pub fn storage(message: &str, subtype: Option<&str>) -> TodoError {
        TodoError::Internal(InternalError::Storage {
            message: message.to_string(),
            subtype: subtype.map(String::from),
        })
    }

    pub fn filesystem(message: &str, subtype: Option<&str>) -> TodoError {
        TodoError::Internal(InternalError::Filesystem {
            message: message.to_string(),
            subtype: subtype.map(String::from),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Filesystem,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Application(ApplicationError::Validation { .. }) => ErrorKind::Validation,
            TodoError::Application(ApplicationError::NotFound { .. }) => ErrorKind::NotFound,
            TodoError::Internal(InternalError::Storage { .. }) => ErrorKind::Storage,
            TodoError::Internal(InternalError::Filesystem { .. }) => ErrorKind::Filesystem,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<mongodb::error::Error> for TodoError {
    fn from(e: mongodb::error::Error) -> Self {
        InternalError::storage(&e.to_string(), None)
    }
}
