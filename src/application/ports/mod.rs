pub mod identity_provider;
pub mod resource_client;

pub use identity_provider::IdentityProvider;
pub use resource_client::ResourceClient;
