use crate::domain::value_objects::UserId;
use serde::{Deserialize, Serialize};

/// 投稿・コメントの作成者、およびログイン中のユーザー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
