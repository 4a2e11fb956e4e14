use super::super::fixtures::{fixed_time, user};
use async_trait::async_trait;
use feed_sync::domain::entities::{Comment, Post, PostDraft};
use feed_sync::domain::value_objects::{CommentId, PostId};
use feed_sync::{AppError, ResourceClient};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{oneshot, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    ListPosts,
    CreatePost,
    AddComment,
    Like,
    Unlike,
    DeletePost,
}

/// Simulated backend: keeps its own post list, applies accepted writes to it,
/// and lets tests fail or hold individual calls.
pub struct MockResourceClient {
    posts: Mutex<Vec<Post>>,
    acting_user: i64,
    failures: Mutex<HashMap<Call, VecDeque<AppError>>>,
    gates: Mutex<HashMap<Call, VecDeque<oneshot::Receiver<()>>>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
}

impl MockResourceClient {
    pub fn new(posts: Vec<Post>, acting_user: i64) -> Self {
        Self {
            posts: Mutex::new(posts),
            acting_user,
            failures: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(42),
        }
    }

    pub async fn server_posts(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }

    pub async fn fail_next(&self, call: Call, error: AppError) {
        self.failures
            .lock()
            .await
            .entry(call)
            .or_default()
            .push_back(error);
    }

    /// The next `call` waits until the returned sender fires.
    pub async fn hold_next(&self, call: Call) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.entry(call).or_default().push_back(rx);
        tx
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, call: Call) -> usize {
        self.calls.lock().await.iter().filter(|c| **c == call).count()
    }

    async fn enter(&self, call: Call) -> Result<(), AppError> {
        self.calls.lock().await.push(call);
        let gate = self
            .gates
            .lock()
            .await
            .get_mut(&call)
            .and_then(|queue| queue.pop_front());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let failure = self
            .failures
            .lock()
            .await
            .get_mut(&call)
            .and_then(|queue| queue.pop_front());
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn with_post<F>(&self, post_id: PostId, f: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Post),
    {
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
        f(post);
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.enter(Call::ListPosts).await?;
        Ok(self.posts.lock().await.clone())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, AppError> {
        self.enter(Call::CreatePost).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post {
            id: PostId::new(id).map_err(AppError::Internal)?,
            title: draft.title.clone(),
            content: draft.content.clone(),
            likes: 0,
            liked_by: Default::default(),
            author: user(self.acting_user),
            comments: Vec::new(),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        self.posts.lock().await.insert(0, post.clone());
        Ok(post)
    }

    async fn add_comment(&self, post_id: PostId, text: &str) -> Result<Comment, AppError> {
        self.enter(Call::AddComment).await?;
        let comment = Comment {
            id: CommentId::Server(self.next_id.fetch_add(1, Ordering::SeqCst)),
            text: text.to_string(),
            author: user(self.acting_user),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        let stored = comment.clone();
        self.with_post(post_id, move |post| post.comments.push(stored))
            .await?;
        Ok(comment)
    }

    async fn like(&self, post_id: PostId) -> Result<(), AppError> {
        self.enter(Call::Like).await?;
        let acting = user(self.acting_user).id;
        self.with_post(post_id, |post| {
            if post.liked_by.insert(acting) {
                post.likes += 1;
            }
        })
        .await
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), AppError> {
        self.enter(Call::Unlike).await?;
        let acting = user(self.acting_user).id;
        self.with_post(post_id, |post| {
            if post.liked_by.remove(&acting) {
                post.likes = post.likes.saturating_sub(1);
            }
        })
        .await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError> {
        self.enter(Call::DeletePost).await?;
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.id != post_id);
        if posts.len() == before {
            return Err(AppError::NotFound(format!("post {post_id}")));
        }
        Ok(())
    }
}
