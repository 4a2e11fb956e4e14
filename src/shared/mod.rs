pub mod config;
pub mod error;

pub use config::{DislikeCounterPolicy, FeedConfig};
pub use error::{AppError, MutationError};
