use super::{map_post, Mutation};
use crate::application::ports::ResourceClient;
use crate::domain::entities::{Comment, PostList, User};
use crate::domain::value_objects::{MutationKind, PostId, TemporaryCommentId};
use crate::shared::error::AppError;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub text: String,
    pub author: User,
    pub temp_id: TemporaryCommentId,
}

/// Appends a placeholder comment, then swaps in the server copy.
pub struct AddComment;

#[async_trait]
impl Mutation for AddComment {
    type Input = NewComment;
    type Output = Comment;

    fn kind(&self) -> MutationKind {
        MutationKind::AddComment
    }

    fn apply(&self, current: Option<PostList>, input: &NewComment) -> Option<PostList> {
        map_post(current, input.post_id, |post| {
            post.add_comment(Comment::pending(
                input.temp_id.clone(),
                input.text.clone(),
                input.author.clone(),
            ));
        })
    }

    fn commit(
        &self,
        current: Option<PostList>,
        confirmed: &Comment,
        input: &NewComment,
    ) -> Option<PostList> {
        map_post(current, input.post_id, |post| {
            // a re-fetch may have replaced the placeholder in the meantime
            if !post.confirm_comment(&input.temp_id, confirmed.clone())
                && !post.has_comment(&confirmed.id)
            {
                post.add_comment(confirmed.clone());
            }
        })
    }

    async fn invoke(
        &self,
        client: &dyn ResourceClient,
        input: &NewComment,
    ) -> Result<Comment, AppError> {
        client.add_comment(input.post_id, &input.text).await
    }
}
