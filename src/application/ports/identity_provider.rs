use crate::domain::entities::User;
use crate::domain::value_objects::UserId;
use async_trait::async_trait;

/// ログイン中のユーザーを提供するポート（未ログイン時は `None`）
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Option<User>;

    async fn current_user_id(&self) -> Option<UserId> {
        self.current_user().await.map(|user| user.id)
    }
}
