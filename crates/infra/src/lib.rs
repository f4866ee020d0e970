//! Infrastructure layer: record storage.

pub mod store;

pub use store::{InMemoryUserStore, UserRepository};
