//! SQLite-backed catalog of producers and their cheeses.
//!
//! Every write runs inside a single transaction. Validation happens before the
//! first statement that mutates anything, and a transaction that is dropped
//! without `commit` is rolled back by sqlx, so a failed write never leaves
//! partial state behind.

mod rows;

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;

use fromager_cheeses::{Cheese, CheesePatch, NewCheese};
use fromager_core::{CheeseId, DomainError, Entity, ProducerId};
use fromager_producers::{NewProducer, Producer};

use rows::{CHEESE_COLUMNS, PRODUCER_COLUMNS, cheese_from_row, producer_from_row};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository over the `producers` / `cheeses` tables.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // Takes the write lock up front. A deferred transaction that reads and
    // then writes fails with SQLITE_BUSY when another writer got there first.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    pub async fn list_producers(&self) -> RepoResult<Vec<Producer>> {
        let sql = format!("SELECT {PRODUCER_COLUMNS} FROM producers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let producers = rows
            .iter()
            .map(producer_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(producers)
    }

    pub async fn get_producer(&self, id: ProducerId) -> RepoResult<Option<Producer>> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_producer(&mut conn, id).await?)
    }

    /// Producer plus all of its cheeses, ordered by cheese id.
    pub async fn get_producer_with_cheeses(
        &self,
        id: ProducerId,
    ) -> RepoResult<Option<(Producer, Vec<Cheese>)>> {
        let mut conn = self.pool.acquire().await?;
        let Some(producer) = find_producer(&mut conn, id).await? else {
            return Ok(None);
        };

        let sql = format!("SELECT {CHEESE_COLUMNS} FROM cheeses WHERE producer_id = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(id.get())
            .fetch_all(&mut *conn)
            .await?;
        let cheeses = rows
            .iter()
            .map(cheese_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some((producer, cheeses)))
    }

    pub async fn create_producer(&self, new: NewProducer) -> RepoResult<Producer> {
        new.validate(today())?;

        let mut tx = self.begin_write().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO producers (name, founding_year, operation_size, region, image)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(new.founding_year)
        .bind(new.operation_size.as_str())
        .bind(&new.region)
        .bind(&new.image)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let producer = Producer::from_new(ProducerId::new(result.last_insert_rowid()), new);
        tracing::info!(producer_id = %producer.id(), "producer created");
        Ok(producer)
    }

    /// Delete a producer and every cheese it owns.
    ///
    /// Returns `false` when the producer does not exist.
    pub async fn delete_producer(&self, id: ProducerId) -> RepoResult<bool> {
        let mut tx = self.begin_write().await?;
        if find_producer(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        let cheeses = sqlx::query("DELETE FROM cheeses WHERE producer_id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM producers WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(producer_id = %id, cheeses_removed = cheeses, "producer deleted");
        Ok(true)
    }

    pub async fn get_cheese(&self, id: CheeseId) -> RepoResult<Option<Cheese>> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_cheese(&mut conn, id).await?)
    }

    /// Insert a cheese for an existing producer.
    ///
    /// The producer lookup comes before validation, so a missing producer is
    /// reported as `NotFound` even when other fields are also invalid.
    pub async fn create_cheese(&self, new: NewCheese) -> RepoResult<(Cheese, Producer)> {
        let mut tx = self.begin_write().await?;
        let producer = find_producer(&mut tx, new.producer_id)
            .await?
            .ok_or_else(|| DomainError::not_found(Producer::entity_name()))?;

        new.validate(today())?;

        let result = sqlx::query(
            r#"
            INSERT INTO cheeses (producer_id, production_date, price, is_raw_milk, kind, image)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.producer_id.get())
        .bind(new.production_date)
        .bind(new.price)
        .bind(new.is_raw_milk)
        .bind(&new.kind)
        .bind(&new.image)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let cheese = Cheese::from_new(CheeseId::new(result.last_insert_rowid()), new);
        tracing::info!(cheese_id = %cheese.id(), producer_id = %producer.id(), "cheese created");
        Ok((cheese, producer))
    }

    /// Apply a partial update and return the stored result with its producer.
    pub async fn update_cheese(
        &self,
        id: CheeseId,
        patch: &CheesePatch,
    ) -> RepoResult<(Cheese, Producer)> {
        self.update_cheese_at(id, patch, today()).await
    }

    async fn update_cheese_at(
        &self,
        id: CheeseId,
        patch: &CheesePatch,
        today: NaiveDate,
    ) -> RepoResult<(Cheese, Producer)> {
        let mut tx = self.begin_write().await?;
        let current = find_cheese(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found(Cheese::entity_name()))?;

        let updated = current.apply_patch(patch, today)?;
        let producer = find_producer(&mut tx, updated.producer_id)
            .await?
            .ok_or_else(|| DomainError::not_found(Producer::entity_name()))?;

        if updated != current {
            sqlx::query(
                r#"
                UPDATE cheeses
                SET producer_id = ?, production_date = ?, price = ?, is_raw_milk = ?, kind = ?, image = ?
                WHERE id = ?
                "#,
            )
            .bind(updated.producer_id.get())
            .bind(updated.production_date)
            .bind(updated.price)
            .bind(updated.is_raw_milk)
            .bind(&updated.kind)
            .bind(&updated.image)
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;
            tracing::info!(cheese_id = %id, "cheese updated");
        }

        Ok((updated, producer))
    }

    /// Returns `false` when the cheese does not exist.
    pub async fn delete_cheese(&self, id: CheeseId) -> RepoResult<bool> {
        let mut tx = self.begin_write().await?;
        let removed = sqlx::query("DELETE FROM cheeses WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        if removed > 0 {
            tracing::info!(cheese_id = %id, "cheese deleted");
        }
        Ok(removed > 0)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn find_producer(
    conn: &mut SqliteConnection,
    id: ProducerId,
) -> Result<Option<Producer>, sqlx::Error> {
    let sql = format!("SELECT {PRODUCER_COLUMNS} FROM producers WHERE id = ?");
    let row = sqlx::query(&sql)
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(producer_from_row).transpose()
}

async fn find_cheese(
    conn: &mut SqliteConnection,
    id: CheeseId,
) -> Result<Option<Cheese>, sqlx::Error> {
    let sql = format!("SELECT {CHEESE_COLUMNS} FROM cheeses WHERE id = ?");
    let row = sqlx::query(&sql)
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(cheese_from_row).transpose()
}
