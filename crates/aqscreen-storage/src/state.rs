use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::ObjectStore;

/// Load a JSON document. Returns the deserialized value and its ETag.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = store.get_object(key)?;
    let value: T = serde_json::from_slice(&output.body)?;
    let etag = output.etag.unwrap_or_default();
    Ok((value, etag))
}

/// Save a JSON document. Returns the new ETag.
pub fn save_json<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    store.put_object(key, body, Some("application/json"))
}
