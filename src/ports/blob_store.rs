//! BlobStore port - opaque key to bytes storage.

use async_trait::async_trait;

use super::StorageError;

/// Opaque key -> bytes map used for generated file bodies.
///
/// Keys are `/`-separated paths such as `{service}/{artifact}/{file}`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
