pub mod cache;
pub mod identity;

pub use cache::{CacheSnapshot, CacheStore, QueryState};
pub use identity::SessionIdentity;
