use super::{map_post, Mutation, Reaction};
use crate::application::ports::ResourceClient;
use crate::domain::entities::PostList;
use crate::domain::value_objects::MutationKind;
use crate::shared::config::DislikeCounterPolicy;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Withdraws the current user's like. The counter follows `counter`.
pub struct DislikePost {
    counter: DislikeCounterPolicy,
}

impl DislikePost {
    pub fn new(counter: DislikeCounterPolicy) -> Self {
        Self { counter }
    }
}

impl Default for DislikePost {
    fn default() -> Self {
        Self::new(DislikeCounterPolicy::default())
    }
}

#[async_trait]
impl Mutation for DislikePost {
    type Input = Reaction;
    type Output = ();

    fn kind(&self) -> MutationKind {
        MutationKind::Dislike
    }

    fn apply(&self, current: Option<PostList>, input: &Reaction) -> Option<PostList> {
        map_post(current, input.post_id, |post| {
            post.remove_like(input.user_id, self.counter)
        })
    }

    async fn invoke(&self, client: &dyn ResourceClient, input: &Reaction) -> Result<(), AppError> {
        client.unlike(input.post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::shared::fixtures::{liked_post, post_id, user_id};

    fn reaction() -> Reaction {
        Reaction {
            post_id: post_id(1),
            user_id: user_id(1),
        }
    }

    #[test]
    fn test_apply_decrements_by_default() {
        let applied = DislikePost::default()
            .apply(Some(vec![liked_post(1, 6, &[1, 2, 3])]), &reaction())
            .unwrap();
        assert_eq!(applied[0], liked_post(1, 5, &[2, 3]));
    }

    #[test]
    fn test_legacy_policy_increments() {
        let applied = DislikePost::new(DislikeCounterPolicy::LegacyIncrement)
            .apply(Some(vec![liked_post(1, 6, &[1, 2, 3])]), &reaction())
            .unwrap();
        assert_eq!(applied[0], liked_post(1, 7, &[2, 3]));
    }

    #[test]
    fn test_membership_removed_even_if_absent() {
        let applied = DislikePost::default()
            .apply(Some(vec![liked_post(1, 0, &[2])]), &reaction())
            .unwrap();
        assert!(!applied[0].is_liked_by(user_id(1)));
        assert_eq!(applied[0].likes, 0);
    }
}
