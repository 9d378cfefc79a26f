/// Asset primary keys are opaque strings (a hyphenated v4 UUID when the
/// server assigns them).
pub type AssetId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh asset identifier.
pub fn new_asset_id() -> AssetId {
    uuid::Uuid::new_v4().to_string()
}
