//! Write path: optimistic mutations over the cache store.
//!
//! Every write goes through [`MutationPipeline`], parameterized by a
//! [`Mutation`] that supplies the optimistic projection, the merge of the
//! server result, and the resource client call.

pub mod add_comment;
pub mod add_post;
pub mod delete_post;
pub mod dislike_post;
pub mod like_post;
pub mod pipeline;

pub use add_comment::{AddComment, NewComment};
pub use add_post::AddPost;
pub use delete_post::DeletePost;
pub use dislike_post::DislikePost;
pub use like_post::LikePost;
pub use pipeline::MutationPipeline;

use crate::application::ports::ResourceClient;
use crate::domain::entities::{Post, PostList};
use crate::domain::value_objects::{CacheKey, MutationKind, PostId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait Mutation: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Send + Sync + 'static;

    fn kind(&self) -> MutationKind;

    fn key(&self) -> CacheKey {
        CacheKey::Posts
    }

    /// Optimistic projection written before the server is contacted.
    fn apply(&self, current: Option<PostList>, input: &Self::Input) -> Option<PostList>;

    /// Merges the confirmed server result into the cache.
    fn commit(
        &self,
        current: Option<PostList>,
        _output: &Self::Output,
        _input: &Self::Input,
    ) -> Option<PostList> {
        current
    }

    async fn invoke(
        &self,
        client: &dyn ResourceClient,
        input: &Self::Input,
    ) -> Result<Self::Output, AppError>;
}

/// Notification emitted when a mutation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    Committed { kind: MutationKind },
    /// The write failed and the optimistic change was rolled back.
    Reverted { kind: MutationKind, error: AppError },
}

/// Input of a like or dislike: who reacts to which post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: PostId,
    pub user_id: UserId,
}

/// Applies `f` to the post with `post_id`, if the list is loaded and holds it.
pub(crate) fn map_post<F>(current: Option<PostList>, post_id: PostId, f: F) -> Option<PostList>
where
    F: FnOnce(&mut Post),
{
    current.map(|mut posts| {
        if let Some(post) = posts.iter_mut().find(|post| post.id == post_id) {
            f(post);
        }
        posts
    })
}
