use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::StorageError;
use crate::objects::{GetObjectOutput, ObjectStore};

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    etag: String,
    content_type: Option<String>,
}

/// In-process [`ObjectStore`] backed by an ordered map.
///
/// ETags are a per-store counter, so every write yields a distinct tag.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<String, StoredObject>,
    version: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(inner.objects.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl ObjectStore for MemoryStore {
    fn get_object(&self, key: &str) -> Result<GetObjectOutput, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        let object = inner
            .objects
            .get(key)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })?;

        Ok(GetObjectOutput {
            body: object.body.clone(),
            etag: Some(object.etag.clone()),
            content_type: object.content_type.clone(),
        })
    }

    fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let mut inner = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        inner.version += 1;
        let etag = format!("\"{}\"", inner.version);

        debug!(key, bytes = body.len(), etag = %etag, "put object");
        inner.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                etag: etag.clone(),
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(etag)
    }

    fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        let existed = inner.objects.remove(key).is_some();
        debug!(key, existed, "delete object");
        Ok(())
    }

    fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(inner
            .objects
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
