use crate::error::StorageError;

/// Result of a GET operation, including the body and ETag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
    pub content_type: Option<String>,
}

/// Keyed blob storage with CRUD semantics.
///
/// Implementations must be safe to share between concurrent requests.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object. Fails with [`StorageError::NotFound`] if absent.
    fn get_object(&self, key: &str) -> Result<GetObjectOutput, StorageError>;

    /// Create or replace an object. Returns the new ETag.
    fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Remove an object. Deleting a missing key is not an error.
    fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Keys starting with `prefix`, sorted ascending.
    fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}
