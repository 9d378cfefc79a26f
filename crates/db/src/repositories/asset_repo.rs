//! Repository for the `assets` table.
//!
//! Reads always exclude soft-deleted rows and order by `created_at DESC`.
//! Writes accept an optional transaction handle owned by the caller.

use assets_core::pagination::PageRequest;
use async_trait::async_trait;
use chrono::Utc;

use crate::models::asset::Asset;
use crate::store::{Store, StoreTx};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, type, value, acquisition_date, created_at, updated_at, deleted_at";

/// The two lookups the service needs. Both implicitly exclude soft-deleted
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetLookup<'a> {
    Id(&'a str),
    NameAndType { name: &'a str, asset_type: &'a str },
}

/// Persistence operations for assets.
///
/// `Tx` is the implementation's transaction handle. Write methods run inside
/// it when `Some`, or directly against the store when `None`. Errors are the
/// store's own, undecorated.
#[async_trait]
pub trait AssetRepository: Send + Sync + 'static {
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, sqlx::Error>;

    async fn commit(&self, tx: &mut Self::Tx) -> Result<(), sqlx::Error>;

    async fn rollback(&self, tx: &mut Self::Tx) -> Result<(), sqlx::Error>;

    /// Most recently created live asset matching `lookup`, if any.
    async fn find_one(&self, lookup: AssetLookup<'_>) -> Result<Option<Asset>, sqlx::Error>;

    /// One page of live assets plus the total number of live assets.
    ///
    /// `page.sort_by` and `page.order` are not applied: rows always come back
    /// newest first.
    async fn list(&self, page: &PageRequest) -> Result<(Vec<Asset>, i64), sqlx::Error>;

    /// Insert `asset`, running the pre-insert hook first.
    async fn create(&self, asset: Asset, tx: Option<&mut Self::Tx>) -> Result<Asset, sqlx::Error>;

    /// Save the full row by primary key, refreshing `updated_at`.
    async fn update(&self, asset: Asset, tx: Option<&mut Self::Tx>) -> Result<Asset, sqlx::Error>;

    /// Stamp `deleted_at`. The row is kept.
    async fn soft_delete(&self, asset: &Asset, tx: Option<&mut Self::Tx>)
        -> Result<(), sqlx::Error>;
}

/// Postgres-backed [`AssetRepository`].
#[derive(Clone)]
pub struct AssetRepo {
    store: Store,
}

impl AssetRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AssetRepository for AssetRepo {
    type Tx = StoreTx;

    async fn begin(&self) -> Result<StoreTx, sqlx::Error> {
        self.store.begin().await
    }

    async fn commit(&self, tx: &mut StoreTx) -> Result<(), sqlx::Error> {
        self.store.commit(tx).await
    }

    async fn rollback(&self, tx: &mut StoreTx) -> Result<(), sqlx::Error> {
        self.store.rollback(tx).await
    }

    async fn find_one(&self, lookup: AssetLookup<'_>) -> Result<Option<Asset>, sqlx::Error> {
        match lookup {
            AssetLookup::Id(id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM assets
                     WHERE id = $1 AND deleted_at IS NULL
                     ORDER BY created_at DESC LIMIT 1"
                );
                self.store
                    .fetch_optional(sqlx::query_as::<_, Asset>(&query).bind(id))
                    .await
            }
            AssetLookup::NameAndType { name, asset_type } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM assets
                     WHERE name = $1 AND type = $2 AND deleted_at IS NULL
                     ORDER BY created_at DESC LIMIT 1"
                );
                self.store
                    .fetch_optional(
                        sqlx::query_as::<_, Asset>(&query)
                            .bind(name)
                            .bind(asset_type),
                    )
                    .await
            }
        }
    }

    async fn list(&self, page: &PageRequest) -> Result<(Vec<Asset>, i64), sqlx::Error> {
        let total = self
            .store
            .count("SELECT COUNT(*) FROM assets WHERE deleted_at IS NULL")
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE deleted_at IS NULL
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        let assets = self
            .store
            .fetch_all(
                sqlx::query_as::<_, Asset>(&query)
                    .bind(page.limit)
                    .bind(page.offset),
            )
            .await?;

        Ok((assets, total))
    }

    async fn create(
        &self,
        mut asset: Asset,
        tx: Option<&mut StoreTx>,
    ) -> Result<Asset, sqlx::Error> {
        asset.before_create(Utc::now());
        let query = format!(
            "INSERT INTO assets
                (id, name, type, value, acquisition_date, created_at, updated_at, deleted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        self.store
            .fetch_one(
                sqlx::query_as::<_, Asset>(&query)
                    .bind(&asset.id)
                    .bind(&asset.name)
                    .bind(&asset.asset_type)
                    .bind(asset.value)
                    .bind(asset.acquisition_date)
                    .bind(asset.created_at)
                    .bind(asset.updated_at)
                    .bind(asset.deleted_at),
                tx,
            )
            .await
    }

    async fn update(
        &self,
        mut asset: Asset,
        tx: Option<&mut StoreTx>,
    ) -> Result<Asset, sqlx::Error> {
        asset.before_update(Utc::now());
        let query = format!(
            "INSERT INTO assets
                (id, name, type, value, acquisition_date, created_at, updated_at, deleted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                type = EXCLUDED.type,
                value = EXCLUDED.value,
                acquisition_date = EXCLUDED.acquisition_date,
                updated_at = EXCLUDED.updated_at,
                deleted_at = EXCLUDED.deleted_at
             RETURNING {COLUMNS}"
        );
        self.store
            .fetch_one(
                sqlx::query_as::<_, Asset>(&query)
                    .bind(&asset.id)
                    .bind(&asset.name)
                    .bind(&asset.asset_type)
                    .bind(asset.value)
                    .bind(asset.acquisition_date)
                    .bind(asset.created_at)
                    .bind(asset.updated_at)
                    .bind(asset.deleted_at),
                tx,
            )
            .await
    }

    async fn soft_delete(
        &self,
        asset: &Asset,
        tx: Option<&mut StoreTx>,
    ) -> Result<(), sqlx::Error> {
        let query = sqlx::query(
            "UPDATE assets SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(&asset.id)
        .bind(Utc::now());
        self.store.execute(query, tx).await?;
        Ok(())
    }
}
