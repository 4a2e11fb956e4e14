use crate::application::ports::IdentityProvider;
use crate::domain::entities::User;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

/// ログイン状態を保持する `IdentityProvider` 実装
#[derive(Default)]
pub struct SessionIdentity {
    user: RwLock<Option<User>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub async fn login(&self, user: User) {
        info!(user_id = %user.id, "session started");
        *self.user.write().await = Some(user);
    }

    pub async fn logout(&self) {
        if let Some(user) = self.user.write().await.take() {
            info!(user_id = %user.id, "session ended");
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }
}
