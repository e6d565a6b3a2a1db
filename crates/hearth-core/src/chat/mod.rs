//! Chat state management.
//!
//! `ChatStore` is the port the infrastructure layer implements;
//! `ChatStateManager` is the single in-memory source of truth for what the
//! current user sees, kept consistent with the store after every mutation.

pub mod manager;
pub mod store;
pub mod title;

pub use manager::{ChatStateManager, ChatTurn};
pub use store::ChatStore;
