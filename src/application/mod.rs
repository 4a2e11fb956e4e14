pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod shared;

pub use services::{FeedService, MutationPipeline, QueryChannel};
