use crate::domain::entities::{Comment, Post, PostDraft};
use crate::domain::value_objects::PostId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// バックエンドAPIへの呼び出しを担うポート
///
/// Transport details (base URL, bearer token, encoding) belong to the
/// implementation. A call that has been issued always runs to completion.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// 投稿一覧を取得
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    /// 投稿を作成
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, AppError>;

    /// コメントを追加し、サーバー側で採番されたコメントを返す
    async fn add_comment(&self, post_id: PostId, text: &str) -> Result<Comment, AppError>;

    async fn like(&self, post_id: PostId) -> Result<(), AppError>;

    async fn unlike(&self, post_id: PostId) -> Result<(), AppError>;

    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError>;
}
