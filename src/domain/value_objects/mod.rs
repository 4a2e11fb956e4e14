pub mod cache_key;
pub mod comment_id;
pub mod mutation_kind;
pub mod post_id;
pub mod user_id;

pub use cache_key::CacheKey;
pub use comment_id::{CommentId, TemporaryCommentId};
pub use mutation_kind::MutationKind;
pub use post_id::PostId;
pub use user_id::UserId;
