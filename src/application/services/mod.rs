pub mod feed_service;
pub mod mutation;
pub mod query_channel;

pub use feed_service::{FeedService, LikeToggle};
pub use mutation::{Mutation, MutationEvent, MutationPipeline, Reaction};
pub use query_channel::{FetchOutcome, QueryChannel};
