//! Storage key conventions.
//!
//! Pure string functions. Every record lives under a per-user prefix so a
//! listing can never cross users.

use uuid::Uuid;

use crate::models::user::UserId;

pub const SCREENINGS_PREFIX: &str = "screenings/";

pub fn screenings_prefix(user_id: &UserId) -> String {
    format!("{SCREENINGS_PREFIX}{user_id}/")
}

pub fn screening(user_id: &UserId, id: Uuid) -> String {
    format!("{SCREENINGS_PREFIX}{user_id}/{id}.json")
}

/// Recover the record id from a key produced by [`screening`].
pub fn screening_id(key: &str) -> Option<Uuid> {
    let file = key.rsplit('/').next()?;
    let stem = file.strip_suffix(".json")?;
    Uuid::parse_str(stem).ok()
}
