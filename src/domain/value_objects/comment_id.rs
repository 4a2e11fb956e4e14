use serde::{Deserialize, Serialize};
use std::fmt;

const TEMPORARY_PREFIX: &str = "tmp-";

/// Client-side placeholder id carried by a comment until the server answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryCommentId(String);

impl TemporaryCommentId {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Temporary comment ID cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(format!("{TEMPORARY_PREFIX}{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemporaryCommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comment identifier: numeric once assigned by the server, a string while
/// the comment only exists optimistically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Server(i64),
    Temporary(TemporaryCommentId),
}

impl CommentId {
    pub fn is_temporary(&self) -> bool {
        matches!(self, CommentId::Temporary(_))
    }

    pub fn as_temporary(&self) -> Option<&TemporaryCommentId> {
        match self {
            CommentId::Temporary(id) => Some(id),
            CommentId::Server(_) => None,
        }
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Server(id) => write!(f, "{id}"),
            CommentId::Temporary(id) => write!(f, "{id}"),
        }
    }
}
