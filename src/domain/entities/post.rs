use super::{comment::Comment, user::User};
use crate::domain::value_objects::{CommentId, PostId, TemporaryCommentId, UserId};
use crate::shared::DislikeCounterPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The value cached under [`CacheKey::Posts`](crate::domain::CacheKey::Posts).
pub type PostList = Vec<Post>;

/// A feed post as returned by the server.
///
/// `likes` and `liked_by` are reported independently by the server and are
/// never derived from one another here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub likes: u32,
    #[serde(default)]
    pub liked_by: BTreeSet<UserId>,
    pub author: User,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.liked_by.contains(&user_id)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author.id == user_id
    }

    /// 自分のいいねを追加（既に含まれていれば集合は変わらない）
    pub fn add_like(&mut self, user_id: UserId) {
        self.liked_by.insert(user_id);
        self.likes = self.likes.saturating_add(1);
    }

    /// 自分のいいねを取り消す
    pub fn remove_like(&mut self, user_id: UserId, policy: DislikeCounterPolicy) {
        self.liked_by.remove(&user_id);
        match policy {
            DislikeCounterPolicy::Decrement => {
                self.likes = self.likes.saturating_sub(1);
            }
            DislikeCounterPolicy::LegacyIncrement => {
                self.likes = self.likes.saturating_add(1);
            }
        }
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Swaps the optimistic comment `temp_id` for the server copy. Returns
    /// `false` when the placeholder is no longer there.
    pub fn confirm_comment(&mut self, temp_id: &TemporaryCommentId, confirmed: Comment) -> bool {
        let position = self
            .comments
            .iter()
            .position(|c| c.id.as_temporary() == Some(temp_id));
        match position {
            Some(index) => {
                self.comments[index] = confirmed;
                true
            }
            None => false,
        }
    }

    pub fn has_comment(&self, id: &CommentId) -> bool {
        self.comments.iter().any(|c| &c.id == id)
    }
}

/// Fields the user supplies when creating a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    /// The post form only asks for content.
    pub const DEFAULT_TITLE: &'static str = "Not applicable";

    pub fn new(title: Option<String>, content: String) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Err("Post content cannot be empty".to_string());
        }
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_TITLE.to_string());
        Ok(Self { title, content })
    }
}
