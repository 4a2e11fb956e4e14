pub mod entities;
pub mod value_objects;

pub use entities::{Comment, Post, PostDraft, PostList, User};
pub use value_objects::{CacheKey, CommentId, MutationKind, PostId, TemporaryCommentId, UserId};
