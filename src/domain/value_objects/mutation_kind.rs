use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    AddPost,
    AddComment,
    Like,
    Dislike,
    DeletePost,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::AddPost => "add_post",
            MutationKind::AddComment => "add_comment",
            MutationKind::Like => "like",
            MutationKind::Dislike => "dislike",
            MutationKind::DeletePost => "delete_post",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
