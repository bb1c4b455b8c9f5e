//! Storage adapters - in-memory and file-backed implementations of the
//! record and blob ports.

mod file_store;
mod in_memory_store;

pub use file_store::{FileBlobStore, FileRecordStore};
pub use in_memory_store::{InMemoryBlobStore, InMemoryRecordStore};
