#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use assets_core::pagination::PageRequest;
use assets_core::types::Timestamp;
use assets_db::models::asset::Asset;
use assets_db::repositories::{AssetLookup, AssetRepository};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use assets_api::config::ServerConfig;
use assets_api::router::build_app_router;
use assets_api::services::{AssetService, AssetServiceImpl};
use assets_api::state::AppState;

// ---------------------------------------------------------------------------
// In-memory repository
// ---------------------------------------------------------------------------

/// A write staged inside a [`MemoryTx`] until commit.
enum Staged {
    Upsert(Asset),
    SoftDelete { id: String, at: Timestamp },
}

/// Transaction handle for [`MemoryAssetRepo`].
#[derive(Default)]
pub struct MemoryTx {
    staged: Vec<Staged>,
}

/// Stand-in for Postgres' SQLSTATE 23505.
#[derive(Debug)]
struct UniqueViolation;

impl std::fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("duplicate key value violates unique constraint \"uq_assets_name_type\"")
    }
}

impl std::error::Error for UniqueViolation {}

impl sqlx::error::DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint \"uq_assets_name_type\""
    }

    fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
        Some("23505".into())
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::UniqueViolation
    }
}

/// `AssetRepository` backed by a shared vector.
///
/// Writes made through a transaction are only applied on commit, so rollback
/// behaves like the real store. Inserts and updates are checked against the
/// live (name, type) pairs the way the partial unique index does.
/// `fail_commit` makes every commit fail; `fail_list` makes listing fail.
#[derive(Clone, Default)]
pub struct MemoryAssetRepo {
    rows: Arc<Mutex<Vec<Asset>>>,
    fail_commit: Arc<AtomicBool>,
    fail_list: Arc<AtomicBool>,
}

impl MemoryAssetRepo {
    pub fn set_fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Asset> {
        self.rows.lock().unwrap().clone()
    }

    fn apply(&self, change: Staged) {
        let mut rows = self.rows.lock().unwrap();
        match change {
            Staged::Upsert(asset) => match rows.iter_mut().find(|a| a.id == asset.id) {
                Some(existing) => *existing = asset,
                None => rows.push(asset),
            },
            Staged::SoftDelete { id, at } => {
                if let Some(row) = rows
                    .iter_mut()
                    .find(|a| a.id == id && a.deleted_at.is_none())
                {
                    row.deleted_at = Some(at);
                }
            }
        }
    }

    /// Whether `asset` would share its (name, type) with another live row,
    /// counting rows already staged in `tx`.
    fn clashes(&self, asset: &Asset, tx: Option<&MemoryTx>) -> bool {
        let same_pair = |other: &Asset| {
            other.id != asset.id
                && other.name == asset.name
                && other.asset_type == asset.asset_type
        };
        let committed = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|row| !row.is_deleted() && same_pair(row));
        let staged = tx.is_some_and(|tx| {
            tx.staged
                .iter()
                .any(|change| matches!(change, Staged::Upsert(row) if same_pair(row)))
        });
        committed || staged
    }

    fn write(&self, change: Staged, tx: Option<&mut MemoryTx>) {
        match tx {
            Some(tx) => tx.staged.push(change),
            None => self.apply(change),
        }
    }

    fn live_newest_first(&self) -> Vec<Asset> {
        let mut live: Vec<Asset> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        live
    }
}

#[async_trait]
impl AssetRepository for MemoryAssetRepo {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, sqlx::Error> {
        Ok(MemoryTx::default())
    }

    async fn commit(&self, tx: &mut MemoryTx) -> Result<(), sqlx::Error> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("commit failed".into()));
        }
        for change in tx.staged.drain(..) {
            self.apply(change);
        }
        Ok(())
    }

    async fn rollback(&self, tx: &mut MemoryTx) -> Result<(), sqlx::Error> {
        tx.staged.clear();
        Ok(())
    }

    async fn find_one(&self, lookup: AssetLookup<'_>) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self.live_newest_first().into_iter().find(|a| match lookup {
            AssetLookup::Id(id) => a.id == id,
            AssetLookup::NameAndType { name, asset_type } => {
                a.name == name && a.asset_type == asset_type
            }
        }))
    }

    async fn list(&self, page: &PageRequest) -> Result<(Vec<Asset>, i64), sqlx::Error> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let live = self.live_newest_first();
        let total = live.len() as i64;
        let rows = live
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok((rows, total))
    }

    async fn create(
        &self,
        mut asset: Asset,
        tx: Option<&mut MemoryTx>,
    ) -> Result<Asset, sqlx::Error> {
        asset.before_create(Utc::now());
        if self.clashes(&asset, tx.as_deref()) {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation)));
        }
        self.write(Staged::Upsert(asset.clone()), tx);
        Ok(asset)
    }

    async fn update(
        &self,
        mut asset: Asset,
        tx: Option<&mut MemoryTx>,
    ) -> Result<Asset, sqlx::Error> {
        asset.before_update(Utc::now());
        if self.clashes(&asset, tx.as_deref()) {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation)));
        }
        self.write(Staged::Upsert(asset.clone()), tx);
        Ok(asset)
    }

    async fn soft_delete(
        &self,
        asset: &Asset,
        tx: Option<&mut MemoryTx>,
    ) -> Result<(), sqlx::Error> {
        self.write(
            Staged::SoftDelete {
                id: asset.id.clone(),
                at: Utc::now(),
            },
            tx,
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        app_env: "test".to_string(),
        database_url: "postgres://localhost/assets_test".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over `repo`.
///
/// The pool is lazy and never connected; only `/health` would touch it.
pub fn build_test_app(repo: MemoryAssetRepo) -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let assets: Arc<dyn AssetService> = Arc::new(AssetServiceImpl::new(repo));

    let state = AppState {
        pool,
        assets,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body.to_string()).await
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST an asset and return `(status, body)`.
pub async fn create_asset(
    app: Router,
    name: &str,
    asset_type: &str,
    date: &str,
) -> (StatusCode, serde_json::Value) {
    let response = post_json(
        app,
        "/api/v1/assets",
        serde_json::json!({
            "name": name,
            "type": asset_type,
            "value": 1500.0,
            "acquisition_date": date,
        }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}
