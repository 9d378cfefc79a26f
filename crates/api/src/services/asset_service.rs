//! Asset business rules.
//!
//! Every write follows the same sequence: validate, check preconditions,
//! mutate inside one transaction, commit (or roll back), then shape the
//! response. This is the only layer that turns store failures into
//! [`CoreError`] variants; handlers map those to HTTP.

use assets_core::dates::{format_date, format_datetime, parse_acquisition_date};
use assets_core::error::CoreError;
use assets_core::pagination::{total_pages, PageRequest};
use assets_core::types::Timestamp;
use assets_db::models::asset::{Asset, AssetInput};
use assets_db::repositories::{AssetLookup, AssetRepository};
use async_trait::async_trait;
use serde::Serialize;

/// Entity name used in not-found errors.
const ENTITY: &str = "Asset";

/// Returned when a live asset already has the requested (name, type).
pub const DUPLICATE_MESSAGE: &str = "Asset already exist";

/// Client-facing shape of an asset.
///
/// Date fields are pre-formatted strings: full date-time on single-resource
/// responses, date only on list responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub value: f64,
    pub acquisition_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AssetView {
    /// Single-resource shape (`YYYY-MM-DD HH:MM:SS`).
    pub fn detail(asset: &Asset) -> Self {
        Self::with_format(asset, format_datetime)
    }

    /// List-item shape (`YYYY-MM-DD`).
    pub fn summary(asset: &Asset) -> Self {
        Self::with_format(asset, format_date)
    }

    fn with_format(asset: &Asset, fmt: fn(&Timestamp) -> String) -> Self {
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            asset_type: asset.asset_type.clone(),
            value: asset.value,
            acquisition_date: fmt(&asset.acquisition_date),
            created_at: fmt(&asset.created_at),
            updated_at: fmt(&asset.updated_at),
        }
    }
}

/// One page of assets with its pagination metadata.
#[derive(Debug, Clone)]
pub struct AssetPage {
    pub request: PageRequest,
    pub total: i64,
    pub total_page: i64,
    pub items: Vec<AssetView>,
}

/// Asset use cases exposed to the transport layer.
#[async_trait]
pub trait AssetService: Send + Sync {
    async fn create(&self, input: AssetInput) -> Result<AssetView, CoreError>;

    async fn get_by_id(&self, id: &str) -> Result<AssetView, CoreError>;

    async fn list(&self, request: PageRequest) -> Result<AssetPage, CoreError>;

    async fn update(&self, id: &str, input: AssetInput) -> Result<AssetView, CoreError>;

    async fn delete(&self, id: &str) -> Result<(), CoreError>;
}

/// [`AssetService`] over any [`AssetRepository`].
pub struct AssetServiceImpl<R> {
    repo: R,
}

impl<R: AssetRepository> AssetServiceImpl<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a live asset by id, mapping absence to `NotFound`.
    async fn require(&self, id: &str, op: &'static str) -> Result<Asset, CoreError> {
        self.repo
            .find_one(AssetLookup::Id(id))
            .await
            .map_err(|err| store_failure(op, "lookup", err))?
            .ok_or_else(|| CoreError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })
    }

    /// Commit on success, roll back on failure.
    ///
    /// The mutation or commit error is always the one reported; a failed
    /// rollback is only logged.
    async fn finish<T: Send>(
        &self,
        mut tx: R::Tx,
        outcome: Result<T, sqlx::Error>,
        op: &'static str,
    ) -> Result<T, CoreError> {
        let value = match outcome {
            Ok(value) => value,
            Err(err) => {
                self.rollback_quietly(&mut tx, op).await;
                return Err(classify_write(op, err));
            }
        };

        if let Err(err) = self.repo.commit(&mut tx).await {
            self.rollback_quietly(&mut tx, op).await;
            return Err(store_failure(op, "commit", err));
        }

        Ok(value)
    }

    async fn rollback_quietly(&self, tx: &mut R::Tx, op: &'static str) {
        if let Err(err) = self.repo.rollback(tx).await {
            tracing::error!(error = %err, op, "Failed to roll back transaction");
        }
    }
}

#[async_trait]
impl<R: AssetRepository> AssetService for AssetServiceImpl<R> {
    async fn create(&self, input: AssetInput) -> Result<AssetView, CoreError> {
        let existing = self
            .repo
            .find_one(AssetLookup::NameAndType {
                name: &input.name,
                asset_type: &input.asset_type,
            })
            .await
            .map_err(|err| store_failure("create", "duplicate check", err))?;
        if existing.is_some() {
            return Err(CoreError::Conflict(DUPLICATE_MESSAGE.to_string()));
        }

        let acquisition_date = parse_acquisition_date(&input.acquisition_date)?;

        let mut tx = self
            .repo
            .begin()
            .await
            .map_err(|err| store_failure("create", "begin", err))?;
        let asset = Asset::new(input.name, input.asset_type, input.value, acquisition_date);
        let outcome = self.repo.create(asset, Some(&mut tx)).await;
        let created = self.finish(tx, outcome, "create").await?;

        tracing::info!(asset_id = %created.id, "Asset created");
        Ok(AssetView::detail(&created))
    }

    async fn get_by_id(&self, id: &str) -> Result<AssetView, CoreError> {
        let asset = self.require(id, "get").await?;
        Ok(AssetView::detail(&asset))
    }

    async fn list(&self, request: PageRequest) -> Result<AssetPage, CoreError> {
        let (assets, total) = self
            .repo
            .list(&request)
            .await
            .map_err(|err| store_failure("list", "query", err))?;

        Ok(AssetPage {
            total,
            total_page: total_pages(total, request.limit),
            items: assets.iter().map(AssetView::summary).collect(),
            request,
        })
    }

    async fn update(&self, id: &str, input: AssetInput) -> Result<AssetView, CoreError> {
        let mut asset = self.require(id, "update").await?;
        let acquisition_date = parse_acquisition_date(&input.acquisition_date)?;

        asset.name = input.name;
        asset.asset_type = input.asset_type;
        asset.value = input.value;
        asset.acquisition_date = acquisition_date;

        let mut tx = self
            .repo
            .begin()
            .await
            .map_err(|err| store_failure("update", "begin", err))?;
        let outcome = self.repo.update(asset, Some(&mut tx)).await;
        let updated = self.finish(tx, outcome, "update").await?;

        tracing::info!(asset_id = %updated.id, "Asset updated");
        Ok(AssetView::detail(&updated))
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let asset = self.require(id, "delete").await?;

        let mut tx = self
            .repo
            .begin()
            .await
            .map_err(|err| store_failure("delete", "begin", err))?;
        let outcome = self.repo.soft_delete(&asset, Some(&mut tx)).await;
        self.finish(tx, outcome, "delete").await?;

        tracing::info!(asset_id = %asset.id, "Asset soft-deleted");
        Ok(())
    }
}

fn store_failure(op: &'static str, stage: &'static str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, op, stage, "Asset store operation failed");
    CoreError::Internal(format!("{op} {stage} failed: {err}"))
}

/// A write that trips the live (name, type) unique index is the same
/// duplicate the pre-insert check reports. Anything else is internal.
fn classify_write(op: &'static str, err: sqlx::Error) -> CoreError {
    let is_duplicate = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if is_duplicate {
        tracing::info!(op, "Write rejected by unique (name, type) index");
        return CoreError::Conflict(DUPLICATE_MESSAGE.to_string());
    }
    store_failure(op, "write", err)
}
