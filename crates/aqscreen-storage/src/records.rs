//! Screening history on top of an [`ObjectStore`].

use uuid::Uuid;

use aqscreen_core::keys;
use aqscreen_core::models::screening::ScreeningRecord;
use aqscreen_core::models::user::UserId;

use crate::error::StorageError;
use crate::objects::ObjectStore;
use crate::state;

pub fn save_screening(
    store: &dyn ObjectStore,
    record: &ScreeningRecord,
) -> Result<String, StorageError> {
    let key = keys::screening(&record.user_id, record.id);
    state::save_json(store, &key, record)
}

pub fn get_screening(
    store: &dyn ObjectStore,
    user_id: &UserId,
    id: Uuid,
) -> Result<ScreeningRecord, StorageError> {
    let key = keys::screening(user_id, id);
    let (record, _etag) = state::load_json(store, &key)?;
    Ok(record)
}

/// All of a user's records, newest first.
pub fn list_screenings(
    store: &dyn ObjectStore,
    user_id: &UserId,
) -> Result<Vec<ScreeningRecord>, StorageError> {
    let keys = store.list_objects(&keys::screenings_prefix(user_id))?;

    let mut records = Vec::with_capacity(keys.len());
    for key in &keys {
        let (record, _etag): (ScreeningRecord, _) = state::load_json(store, key)?;
        records.push(record);
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(records)
}

/// Delete a record. Fails with `NotFound` if the user has no such record.
pub fn delete_screening(
    store: &dyn ObjectStore,
    user_id: &UserId,
    id: Uuid,
) -> Result<(), StorageError> {
    let key = keys::screening(user_id, id);
    store.get_object(&key)?;
    store.delete_object(&key)
}
