//! Test support shared by the application and infrastructure unit tests.

pub mod fixtures;
pub mod mocks;
