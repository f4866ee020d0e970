//! User record storage abstractions.

pub mod in_memory;
pub mod repository;

pub use in_memory::InMemoryUserStore;
pub use repository::UserRepository;
