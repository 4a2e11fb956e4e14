use super::Mutation;
use crate::application::ports::ResourceClient;
use crate::domain::entities::PostList;
use crate::domain::value_objects::{MutationKind, PostId};
use crate::shared::error::AppError;
use async_trait::async_trait;

pub struct DeletePost;

#[async_trait]
impl Mutation for DeletePost {
    type Input = PostId;
    type Output = ();

    fn kind(&self) -> MutationKind {
        MutationKind::DeletePost
    }

    fn apply(&self, current: Option<PostList>, post_id: &PostId) -> Option<PostList> {
        current.map(|posts| {
            posts
                .into_iter()
                .filter(|post| post.id != *post_id)
                .collect()
        })
    }

    async fn invoke(&self, client: &dyn ResourceClient, post_id: &PostId) -> Result<(), AppError> {
        client.delete_post(*post_id).await
    }
}
