//! Store adapter: transaction lifetime and executor dispatch.
//!
//! Every write accepts an optional [`StoreTx`]. When one is supplied the
//! statement runs on the transaction's connection; otherwise it runs directly
//! against the pool. Errors are returned exactly as the driver produced them.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgConnection, Postgres, Transaction};

use crate::DbPool;

/// An open (or finished) database transaction.
///
/// Commit and rollback take `&mut self` so a caller can still attempt a
/// rollback after a failed commit.
pub struct StoreTx {
    inner: Option<Transaction<'static, Postgres>>,
}

impl StoreTx {
    /// `true` until the transaction has been committed or rolled back.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    fn conn(&mut self) -> Result<&mut PgConnection, sqlx::Error> {
        match self.inner.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(sqlx::Error::Protocol(
                "transaction already finished".to_string(),
            )),
        }
    }
}

/// Thin wrapper over the pool that knows how to run a statement with or
/// without an active transaction.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<StoreTx, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(StoreTx { inner: Some(tx) })
    }

    pub async fn commit(&self, tx: &mut StoreTx) -> Result<(), sqlx::Error> {
        match tx.inner.take() {
            Some(inner) => inner.commit().await,
            None => Err(sqlx::Error::Protocol(
                "transaction already finished".to_string(),
            )),
        }
    }

    /// Roll back `tx`.
    ///
    /// A transaction whose commit already failed has been consumed by the
    /// driver, which rolls it back on drop; rolling it back again is a no-op.
    pub async fn rollback(&self, tx: &mut StoreTx) -> Result<(), sqlx::Error> {
        match tx.inner.take() {
            Some(inner) => inner.rollback().await,
            None => {
                tracing::debug!("Rollback requested on a finished transaction");
                Ok(())
            }
        }
    }

    pub async fn fetch_one<'q, T>(
        &self,
        query: QueryAs<'q, Postgres, T, PgArguments>,
        tx: Option<&mut StoreTx>,
    ) -> Result<T, sqlx::Error>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        match tx {
            Some(tx) => query.fetch_one(tx.conn()?).await,
            None => query.fetch_one(&self.pool).await,
        }
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Postgres, T, PgArguments>,
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query.fetch_optional(&self.pool).await
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Postgres, T, PgArguments>,
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query.fetch_all(&self.pool).await
    }

    /// Run a `SELECT COUNT(*) ...` statement.
    pub async fn count(&self, sql: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await
    }

    /// Execute a statement and return the number of affected rows.
    pub async fn execute<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
        tx: Option<&mut StoreTx>,
    ) -> Result<u64, sqlx::Error> {
        let result = match tx {
            Some(tx) => query.execute(tx.conn()?).await?,
            None => query.execute(&self.pool).await?,
        };
        Ok(result.rows_affected())
    }
}
