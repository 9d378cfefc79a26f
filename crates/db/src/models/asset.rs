//! Asset entity model and input DTO.

use assets_core::types::{new_asset_id, AssetId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// An asset row from the `assets` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[sqlx(rename = "type")]
    pub asset_type: String,
    pub value: f64,
    pub acquisition_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Asset {
    /// Build an unsaved asset. The id and timestamps are filled in by
    /// [`Asset::before_create`].
    pub fn new(name: String, asset_type: String, value: f64, acquisition_date: Timestamp) -> Self {
        Self {
            id: AssetId::new(),
            name,
            asset_type,
            value,
            acquisition_date,
            created_at: Timestamp::default(),
            updated_at: Timestamp::default(),
            deleted_at: None,
        }
    }

    /// Pre-insert hook: assign an id when absent and stamp both timestamps
    /// with the same instant.
    pub fn before_create(&mut self, now: Timestamp) {
        if self.id.is_empty() {
            self.id = new_asset_id();
        }
        self.created_at = now;
        self.updated_at = now;
    }

    /// Pre-update hook.
    pub fn before_update(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Request body for creating or replacing an asset.
///
/// All four fields are required; serde rejects a body that omits one and
/// [`Validate`] rejects empty or whitespace-only strings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssetInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub asset_type: String,
    pub value: f64,
    #[validate(custom(function = "not_blank"))]
    pub acquisition_date: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
