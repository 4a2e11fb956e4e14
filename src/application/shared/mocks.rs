use super::fixtures::{server_comment, user};
use crate::application::ports::ResourceClient;
use crate::domain::entities::{Comment, Post, PostDraft};
use crate::domain::value_objects::PostId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use tokio::sync::{oneshot, Mutex};

/// In-memory resource client whose reads and writes can be held open or
/// made to fail.
pub struct StubResourceClient {
    server_posts: Mutex<Vec<Post>>,
    read_failures: Mutex<VecDeque<AppError>>,
    fail_writes: AtomicBool,
    read_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    write_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    list_calls: AtomicUsize,
    write_calls: Mutex<Vec<String>>,
    next_comment_id: AtomicI64,
}

impl StubResourceClient {
    pub fn new(server_posts: Vec<Post>) -> Self {
        Self {
            server_posts: Mutex::new(server_posts),
            read_failures: Mutex::new(VecDeque::new()),
            fail_writes: AtomicBool::new(false),
            read_gates: Mutex::new(VecDeque::new()),
            write_gates: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            write_calls: Mutex::new(Vec::new()),
            next_comment_id: AtomicI64::new(42),
        }
    }

    pub async fn set_server_posts(&self, posts: Vec<Post>) {
        *self.server_posts.lock().await = posts;
    }

    pub async fn fail_next_read(&self, error: AppError) {
        self.read_failures.lock().await.push_back(error);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The next `list_posts` call waits until the returned sender fires.
    pub async fn hold_next_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.read_gates.lock().await.push_back(rx);
        tx
    }

    pub async fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.write_gates.lock().await.push_back(rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn write_calls(&self) -> Vec<String> {
        self.write_calls.lock().await.clone()
    }

    async fn write(&self, call: String) -> Result<(), AppError> {
        self.write_calls.lock().await.push(call);
        let gate = self.write_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::server(500, "write rejected"));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for StubResourceClient {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.read_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(error) = self.read_failures.lock().await.pop_front() {
            return Err(error);
        }
        Ok(self.server_posts.lock().await.clone())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, AppError> {
        self.write(format!("create_post:{}", draft.content)).await?;
        let mut post = super::fixtures::post(900);
        post.title = draft.title.clone();
        post.content = draft.content.clone();
        Ok(post)
    }

    async fn add_comment(&self, post_id: PostId, text: &str) -> Result<Comment, AppError> {
        self.write(format!("add_comment:{post_id}")).await?;
        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        Ok(server_comment(id, text, user(1)))
    }

    async fn like(&self, post_id: PostId) -> Result<(), AppError> {
        self.write(format!("like:{post_id}")).await
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), AppError> {
        self.write(format!("unlike:{post_id}")).await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError> {
        self.write(format!("delete_post:{post_id}")).await
    }
}
