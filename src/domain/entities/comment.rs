use super::user::User;
use crate::domain::value_objects::{CommentId, TemporaryCommentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Builds the optimistic copy shown until the server returns the real one.
    pub fn pending(id: TemporaryCommentId, text: String, author: User) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::Temporary(id),
            text,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_temporary()
    }
}
