//! Repository layer.
//!
//! Repositories translate domain lookups and writes into store calls. Each
//! exposes a trait so the service can be exercised against test doubles.

pub mod asset_repo;

pub use asset_repo::{AssetLookup, AssetRepo, AssetRepository};
