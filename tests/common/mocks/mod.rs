pub mod mock_resource_client;

pub use mock_resource_client::*;
