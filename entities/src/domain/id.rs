use crate::{ApplicationError, TodoError};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use uuid::Uuid;

pub const ID_SEPARATOR: &str = "::";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IdPrefix {
    Todo,
}

/// Opaque record key of the form `<prefix>::<uuid>`.
///
/// Serialized as a plain string so it can sit in a document's `_id` field and
/// travel in URLs untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn now(prefix: IdPrefix) -> Self {
        Self(format!(
            "{prefix}{ID_SEPARATOR}{}",
            Uuid::new_v4().as_simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn prefix(&self) -> Option<IdPrefix> {
        self.0
            .split_once(ID_SEPARATOR)
            .and_then(|(prefix, _)| IdPrefix::from_str(prefix).ok())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, key) = s
            .split_once(ID_SEPARATOR)
            .ok_or_else(|| ApplicationError::validation(&format!("Malformed id: {s}"), None))?;

        IdPrefix::from_str(prefix).map_err(|_| {
            ApplicationError::validation(&format!("Unknown id prefix: {prefix}"), None)
        })?;
        Uuid::parse_str(key)
            .map_err(|e| ApplicationError::validation(&format!("Malformed id {s}: {e}"), None))?;

        Ok(Self(s.to_string()))
    }
}
