//! Optimistic mutation and cache synchronization engine for a social feed
//! client.
//!
//! Writes (add post, add comment, like, dislike, delete) show up in the
//! cache immediately, roll back when the server rejects them, and are
//! reconciled by a background re-fetch once they settle.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::{IdentityProvider, ResourceClient};
pub use application::services::{
    FeedService, FetchOutcome, LikeToggle, MutationEvent, MutationPipeline, QueryChannel,
};
pub use infrastructure::{CacheStore, QueryState, SessionIdentity};
pub use shared::{AppError, FeedConfig, MutationError};

/// ログ設定の初期化
///
/// Honors `RUST_LOG`; defaults to `feed_sync=debug,info`. Calling it again
/// after a subscriber is installed does nothing.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feed_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
