pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::{Post, PostDraft, PostList};
pub use user::User;
