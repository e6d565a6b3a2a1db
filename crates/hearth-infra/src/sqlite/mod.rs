//! SQLite persistence layer.

pub mod chat;
pub mod identity;
pub mod pool;

pub use chat::SqliteChatStore;
pub use identity::SqliteIdentityProvider;
pub use pool::DatabasePool;
