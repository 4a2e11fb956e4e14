use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(value: i64) -> Result<Self, String> {
        Self::validate(value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    fn validate(value: i64) -> Result<(), String> {
        if value <= 0 {
            return Err(format!("Post ID must be positive: {value}"));
        }
        Ok(())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PostId> for i64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}
