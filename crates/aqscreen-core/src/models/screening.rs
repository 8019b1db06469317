use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::user::UserId;
use crate::error::CoreError;

/// One saved screening: the submission and the engine's result, owned by a
/// single user. Request and result are kept as JSON so this crate stays
/// independent of the engine's types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: jiff::Timestamp,
    pub request: serde_json::Value,
    pub result: serde_json::Value,
}

impl ScreeningRecord {
    pub fn new<Req: Serialize, Res: Serialize>(
        user_id: UserId,
        request: &Req,
        result: &Res,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: jiff::Timestamp::now(),
            request: serde_json::to_value(request)?,
            result: serde_json::to_value(result)?,
        })
    }

    /// The stored risk level, if the result carries one.
    pub fn risk_level(&self) -> Option<&str> {
        self.result.get("risk_level")?.as_str()
    }
}
