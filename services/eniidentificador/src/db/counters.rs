//! Postgres-backed counter store.
//!
//! One row per (dir3, anio, tipo). The layout matches tables provisioned by
//! earlier deployments of the service, so an existing table is reused as is.

use async_trait::async_trait;
use eni_id::CounterKey;
use sqlx::postgres::PgPool;
use tracing::{debug, info};

use super::{error::is_already_exists, CounterStore, CreateOutcome, DbError};

/// Name of the counter table inside the configured schema.
pub const TABLE_NAME: &str = "goeniidentificador";

/// Counter store for a single schema.
#[derive(Clone)]
pub struct PgCounterStore {
    pool: PgPool,
    schema: String,
    create_table_sql: String,
    increment_sql: String,
    insert_sql: String,
}

impl PgCounterStore {
    /// Create a counter store for `schema`.
    ///
    /// The schema name is interpolated into SQL, so it must be a plain
    /// unquoted identifier.
    pub fn new(pool: PgPool, schema: &str) -> Result<Self, DbError> {
        if !is_plain_identifier(schema) {
            return Err(DbError::InvalidSchemaName(schema.to_string()));
        }
        let table = format!("{schema}.{TABLE_NAME}");

        let create_table_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                dir3 VARCHAR(9) NOT NULL,
                anio NUMERIC(9) NOT NULL,
                tipo VARCHAR(2) NOT NULL,
                indice NUMERIC(12),
                PRIMARY KEY (dir3, anio, tipo)
            )
            "#
        );

        let increment_sql = format!(
            r#"
            UPDATE {table}
            SET indice = indice + 1
            WHERE dir3 = $1 AND anio = $2::numeric AND tipo = $3
            RETURNING indice::BIGINT
            "#
        );

        let insert_sql = format!(
            r#"
            INSERT INTO {table} (dir3, anio, tipo, indice)
            VALUES ($1, $2::numeric, $3, 0)
            ON CONFLICT (dir3, anio, tipo) DO NOTHING
            "#
        );

        Ok(Self {
            pool,
            schema: schema.to_string(),
            create_table_sql,
            increment_sql,
            insert_sql,
        })
    }

    /// Schema this store writes to.
    pub fn schema(&self) -> &str {
        &self.schema
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM pg_tables
                WHERE lower(schemaname) = lower($1) AND lower(tablename) = $2
            )
            "#,
        )
        .bind(&self.schema)
        .bind(TABLE_NAME)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::Schema)?;

        if exists {
            debug!(schema = %self.schema, table = TABLE_NAME, "Counter table present");
            return Ok(());
        }

        info!(schema = %self.schema, table = TABLE_NAME, "Counter table not found, creating it");

        match sqlx::query(&self.create_table_sql).execute(&self.pool).await {
            Ok(_) => Ok(()),
            // Another process provisioned the table between the check and the create.
            Err(e) if is_already_exists(&e) => {
                debug!(schema = %self.schema, "Counter table created concurrently");
                Ok(())
            }
            Err(e) => Err(DbError::Schema(e)),
        }
    }

    async fn try_increment(&self, key: &CounterKey) -> Result<Option<i64>, DbError> {
        let row = sqlx::query_scalar::<_, Option<i64>>(&self.increment_sql)
            .bind(key.unit.as_str())
            .bind(i32::from(key.year.value()))
            .bind(key.mode.code())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::Query)?;

        match row {
            None => Ok(None),
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => Err(DbError::CorruptCounter {
                key: key.to_string(),
            }),
        }
    }

    async fn try_create(&self, key: &CounterKey) -> Result<CreateOutcome, DbError> {
        let result = sqlx::query(&self.insert_sql)
            .bind(key.unit.as_str())
            .bind(i32::from(key.year.value()))
            .bind(key.mode.code())
            .execute(&self.pool)
            .await
            .map_err(DbError::Query)?;

        if result.rows_affected() == 1 {
            Ok(CreateOutcome::Created)
        } else {
            Ok(CreateOutcome::AlreadyExists)
        }
    }

    async fn health_check(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DbError::Query)?;
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes (Postgres NAMEDATALEN - 1).
fn is_plain_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    name.len() <= 63
        && (first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
