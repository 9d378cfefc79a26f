//! Business-rule layer between handlers and repositories.

pub mod asset_service;

pub use asset_service::{AssetPage, AssetService, AssetServiceImpl, AssetView};
