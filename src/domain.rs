use crate::errors::StorageError;
use async_trait::async_trait;

/// Trait defining the object store operations the thumbnail pipeline needs.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Reads the whole object into memory.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Writes `data` as a new object, tagging it with `content_type`.
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
}
