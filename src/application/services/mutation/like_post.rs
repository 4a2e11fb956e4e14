use super::{map_post, Mutation, Reaction};
use crate::application::ports::ResourceClient;
use crate::domain::entities::PostList;
use crate::domain::value_objects::MutationKind;
use crate::shared::error::AppError;
use async_trait::async_trait;

pub struct LikePost;

#[async_trait]
impl Mutation for LikePost {
    type Input = Reaction;
    type Output = ();

    fn kind(&self) -> MutationKind {
        MutationKind::Like
    }

    fn apply(&self, current: Option<PostList>, input: &Reaction) -> Option<PostList> {
        map_post(current, input.post_id, |post| post.add_like(input.user_id))
    }

    async fn invoke(&self, client: &dyn ResourceClient, input: &Reaction) -> Result<(), AppError> {
        client.like(input.post_id).await
    }
}
