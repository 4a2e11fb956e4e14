use super::Mutation;
use crate::application::ports::ResourceClient;
use crate::domain::entities::{Post, PostDraft, PostList};
use crate::domain::value_objects::MutationKind;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Creates a post. Nothing is inserted optimistically: the server assigns
/// the id and the ordering, so the post shows up with the re-fetch.
pub struct AddPost;

#[async_trait]
impl Mutation for AddPost {
    type Input = PostDraft;
    type Output = Post;

    fn kind(&self) -> MutationKind {
        MutationKind::AddPost
    }

    fn apply(&self, current: Option<PostList>, _input: &PostDraft) -> Option<PostList> {
        current
    }

    async fn invoke(
        &self,
        client: &dyn ResourceClient,
        input: &PostDraft,
    ) -> Result<Post, AppError> {
        client.create_post(input).await
    }
}
