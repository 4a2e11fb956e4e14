use crate::application::ports::{IdentityProvider, ResourceClient};
use crate::application::services::mutation::{
    AddComment, AddPost, DeletePost, DislikePost, LikePost, Mutation, MutationEvent,
    MutationPipeline, NewComment, Reaction,
};
use crate::application::services::query_channel::{FetchOutcome, QueryChannel};
use crate::domain::entities::{Comment, Post, PostDraft, PostList};
use crate::domain::value_objects::{CacheKey, MutationKind, PostId, TemporaryCommentId, UserId};
use crate::infrastructure::cache::{CacheStore, QueryState};
use crate::shared::config::FeedConfig;
use crate::shared::error::{AppError, MutationError};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::info;

/// Result of [`FeedService::toggle_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

/// Entry point for a UI layer: the posts query plus one pipeline per
/// mutation kind, all sharing one cache store.
///
/// The store lives as long as the service; dropping the service ends the
/// session and aborts any background re-fetch still running.
pub struct FeedService {
    queries: Arc<QueryChannel>,
    identity: Arc<dyn IdentityProvider>,
    events: broadcast::Sender<MutationEvent>,
    add_post: MutationPipeline<AddPost>,
    add_comment: MutationPipeline<AddComment>,
    like: MutationPipeline<LikePost>,
    dislike: MutationPipeline<DislikePost>,
    delete: MutationPipeline<DeletePost>,
}

impl FeedService {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        identity: Arc<dyn IdentityProvider>,
        config: &FeedConfig,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let store = Arc::new(CacheStore::new());
        let queries = Arc::new(QueryChannel::new(Arc::clone(&client), store));
        let (events, _) = broadcast::channel(config.cache.notify_capacity);
        let reconcile = config.mutations.reconcile_after_settle;

        info!(
            reconcile,
            dislike_counter = config.mutations.dislike_counter.as_str(),
            "feed service initialized"
        );

        let dislike = DislikePost::new(config.mutations.dislike_counter);
        Ok(Self {
            add_post: pipeline(AddPost, &client, &queries, &events, reconcile),
            add_comment: pipeline(AddComment, &client, &queries, &events, reconcile),
            like: pipeline(LikePost, &client, &queries, &events, reconcile),
            dislike: pipeline(dislike, &client, &queries, &events, reconcile),
            delete: pipeline(DeletePost, &client, &queries, &events, reconcile),
            queries,
            identity,
            events,
        })
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.queries.store()
    }

    pub fn queries(&self) -> &Arc<QueryChannel> {
        &self.queries
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MutationEvent> {
        self.events.subscribe()
    }

    pub async fn watch_posts(&self) -> watch::Receiver<QueryState> {
        self.store().subscribe(CacheKey::Posts).await
    }

    /// 現在キャッシュされている投稿一覧
    pub async fn posts(&self) -> Option<PostList> {
        self.store().read(CacheKey::Posts).await
    }

    pub async fn load_posts(&self) -> Result<FetchOutcome, AppError> {
        self.queries.fetch(CacheKey::Posts).await
    }

    pub async fn refresh_posts(&self) -> Result<FetchOutcome, AppError> {
        self.queries.refetch(CacheKey::Posts).await
    }

    pub async fn create_post(
        &self,
        title: Option<String>,
        content: String,
    ) -> Result<Post, MutationError> {
        let draft = PostDraft::new(title, content).map_err(MutationError::InvalidInput)?;
        self.add_post.execute(draft).await
    }

    pub async fn add_comment(&self, post_id: PostId, text: String) -> Result<Comment, MutationError> {
        if text.trim().is_empty() {
            return Err(MutationError::InvalidInput(
                "Comment text cannot be empty".to_string(),
            ));
        }
        let author = self
            .identity
            .current_user()
            .await
            .ok_or(MutationError::NoIdentity(MutationKind::AddComment))?;

        self.add_comment
            .execute(NewComment {
                post_id,
                text,
                author,
                temp_id: TemporaryCommentId::generate(),
            })
            .await
    }

    pub async fn like_post(&self, post_id: PostId) -> Result<(), MutationError> {
        let user_id = self.require_user(self.like.mutation().kind()).await?;
        self.like.execute(Reaction { post_id, user_id }).await
    }

    pub async fn dislike_post(&self, post_id: PostId) -> Result<(), MutationError> {
        let user_id = self.require_user(self.dislike.mutation().kind()).await?;
        self.dislike.execute(Reaction { post_id, user_id }).await
    }

    /// Likes the post, or withdraws the like if the current user already
    /// likes it according to the cache.
    pub async fn toggle_like(&self, post_id: PostId) -> Result<LikeToggle, MutationError> {
        let user_id = self.require_user(MutationKind::Like).await?;
        let post = self
            .find_post(post_id)
            .await
            .ok_or_else(|| MutationError::InvalidInput(format!("Post {post_id} is not loaded")))?;

        let reaction = Reaction { post_id, user_id };
        if post.is_liked_by(user_id) {
            self.dislike.execute(reaction).await?;
            Ok(LikeToggle::Unliked)
        } else {
            self.like.execute(reaction).await?;
            Ok(LikeToggle::Liked)
        }
    }

    pub async fn delete_post(&self, post_id: PostId) -> Result<(), MutationError> {
        self.delete.execute(post_id).await
    }

    /// 自分の投稿のみ削除可能
    pub async fn can_delete(&self, post_id: PostId) -> bool {
        let Some(user_id) = self.identity.current_user_id().await else {
            return false;
        };
        self.find_post(post_id)
            .await
            .is_some_and(|post| post.is_owned_by(user_id))
    }

    pub async fn wait_for_reconciliation(&self) {
        self.queries.wait_for_reconciliation().await;
    }

    async fn require_user(&self, kind: MutationKind) -> Result<UserId, MutationError> {
        self.identity
            .current_user_id()
            .await
            .ok_or(MutationError::NoIdentity(kind))
    }

    async fn find_post(&self, post_id: PostId) -> Option<Post> {
        self.posts()
            .await?
            .into_iter()
            .find(|post| post.id == post_id)
    }
}

impl Drop for FeedService {
    fn drop(&mut self) {
        self.queries.abort_reconciliation();
    }
}

fn pipeline<M: Mutation>(
    mutation: M,
    client: &Arc<dyn ResourceClient>,
    queries: &Arc<QueryChannel>,
    events: &broadcast::Sender<MutationEvent>,
    reconcile: bool,
) -> MutationPipeline<M> {
    MutationPipeline::new(
        mutation,
        Arc::clone(client),
        Arc::clone(queries),
        events.clone(),
    )
    .with_reconciliation(reconcile)
}
