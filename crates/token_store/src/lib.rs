//! Durable string key/value storage for client-resident session state.
//!
//! [`FileStore`] keeps every key in one JSON object on disk and rewrites it
//! atomically on each change. [`MemoryStore`] is the non-persistent variant.

mod error;
mod paths;
mod store;

pub use error::StoreError;
pub use paths::{store_file, store_root, STORE_DIR, STORE_FILE};
pub use store::{FileStore, KeyValueStore, MemoryStore};
