//! SQLite-backed emote store.
//!
//! Schema:
//! - `servers`: one row per guild, keyed by snowflake
//! - `emotes`: one row per emote and guild with the running total
//! - `emote_daily`: one counter per emote and calendar day
//!
//! Snowflakes are stored as their two's complement `INTEGER` bit pattern,
//! which round-trips every `u64`.

use crate::store::{EmoteStatistics, EmoteStore, StatisticsQuery};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use emote_common::{EmoteBotError, EmoteId, EmoteRecord, Result, ServerInfo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS servers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        snowflake INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS emotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        server_id INTEGER NOT NULL REFERENCES servers(id),
        snowflake INTEGER NOT NULL,
        name TEXT NOT NULL,
        total_count INTEGER NOT NULL DEFAULT 0,
        UNIQUE (snowflake, server_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS emote_daily (
        emote_id INTEGER NOT NULL REFERENCES emotes(id) ON DELETE CASCADE,
        day TEXT NOT NULL,
        count INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (emote_id, day)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_emote_daily_day ON emote_daily(day)",
];

#[allow(clippy::cast_possible_wrap)]
const fn to_sql(snowflake: u64) -> i64 {
    snowflake as i64
}

#[allow(clippy::cast_sign_loss)]
const fn from_sql(value: i64) -> u64 {
    value as u64
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> EmoteBotError {
    move |e| EmoteBotError::database_with_source(context, e)
}

/// Emote store backed by an `sqlx` SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteEmoteStore {
    pool: SqlitePool,
}

impl SqliteEmoteStore {
    /// Opens (creating if missing) the database at `url` and prepares the
    /// schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("Opening emote database: {}", url);

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| EmoteBotError::config_with_source(format!("Invalid database url '{url}'"), e))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(db_error("Failed to connect to database"))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Opens a private in-memory database. Every connection of an in-memory
    /// SQLite pool is its own database, so the pool holds exactly one
    /// connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(db_error("Invalid in-memory url"))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(db_error("Failed to open in-memory database"))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to create schema"))?;
        }
        debug!("Database schema ready");
        Ok(())
    }

    /// Records `records` into the bucket of `day`.
    pub async fn insert_emote_log_on(
        &self,
        records: &[EmoteRecord],
        server: &ServerInfo,
        day: NaiveDate,
    ) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let server_row: i64 = sqlx::query_scalar(
            r"
            INSERT INTO servers (snowflake, name) VALUES (?, ?)
            ON CONFLICT(snowflake) DO UPDATE SET name = excluded.name
            RETURNING id
            ",
        )
        .bind(to_sql(server.id.get()))
        .bind(&server.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to upsert server"))?;

        let day = day.to_string();
        for record in records {
            let snowflake = to_sql(record.id.get());

            // Prefer the row with the same snowflake; otherwise adopt a row
            // with the same name (emote re-uploaded under a new id).
            let existing: Option<i64> = sqlx::query_scalar(
                r"
                SELECT id FROM emotes
                WHERE server_id = ? AND (snowflake = ? OR name = ?)
                ORDER BY snowflake = ? DESC
                LIMIT 1
                ",
            )
            .bind(server_row)
            .bind(snowflake)
            .bind(&record.name)
            .bind(snowflake)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to look up emote"))?;

            let emote_row = match existing {
                Some(row) => {
                    sqlx::query(
                        r"
                        UPDATE emotes
                        SET name = ?, snowflake = ?, total_count = total_count + 1
                        WHERE id = ?
                        ",
                    )
                    .bind(&record.name)
                    .bind(snowflake)
                    .bind(row)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_error("Failed to update emote"))?;
                    row
                }
                None => sqlx::query_scalar(
                    r"
                    INSERT INTO emotes (server_id, snowflake, name, total_count)
                    VALUES (?, ?, ?, 1)
                    RETURNING id
                    ",
                )
                .bind(server_row)
                .bind(snowflake)
                .bind(&record.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("Failed to insert emote"))?,
            };

            sqlx::query(
                r"
                INSERT INTO emote_daily (emote_id, day, count) VALUES (?, ?, 1)
                ON CONFLICT(emote_id, day) DO UPDATE SET count = count + 1
                ",
            )
            .bind(emote_row)
            .bind(&day)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update daily count"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit emote log"))?;

        debug!("Logged {} emotes for server {}", records.len(), server.id);
        Ok(())
    }

    /// Runs a statistics query as of `today`. Buckets newer than
    /// `today - day_window` are inside the window.
    pub async fn query_statistics_on(
        &self,
        query: &StatisticsQuery,
        today: NaiveDate,
    ) -> Result<Vec<EmoteStatistics>> {
        let cutoff = today - Duration::days(i64::from(query.day_window));
        let order = if query.ascending { "ASC" } else { "DESC" };

        let sql = format!(
            r"
            SELECT e.name, e.snowflake, e.total_count, SUM(d.count) AS window_count
            FROM emotes e
            JOIN servers s ON s.id = e.server_id
            JOIN emote_daily d ON d.emote_id = e.id
            WHERE s.snowflake = ? AND d.day > ? AND (? IS NULL OR e.snowflake = ?)
            GROUP BY e.id
            ORDER BY window_count {order}, e.name ASC
            LIMIT ?
            "
        );

        let emote = query.emote.map(|id| to_sql(id.get()));
        let rows: Vec<(String, i64, i64, i64)> = sqlx::query_as(&sql)
            .bind(to_sql(query.server.get()))
            .bind(cutoff.to_string())
            .bind(emote)
            .bind(emote)
            .bind(i64::from(query.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query statistics"))?;

        Ok(rows
            .into_iter()
            .map(|(name, snowflake, total_count, window_count)| EmoteStatistics {
                name,
                id: EmoteId(from_sql(snowflake)),
                total_count,
                window_count,
            })
            .collect())
    }

    /// Deletes buckets dated `today - days_old` or earlier.
    pub async fn purge_older_than_on(&self, days_old: u32, today: NaiveDate) -> Result<u64> {
        let cutoff = today - Duration::days(i64::from(days_old));
        let result = sqlx::query("DELETE FROM emote_daily WHERE day <= ?")
            .bind(cutoff.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to purge daily counts"))?;
        Ok(result.rows_affected())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[async_trait]
impl EmoteStore for SqliteEmoteStore {
    async fn insert_emote_log(&self, records: &[EmoteRecord], server: &ServerInfo) -> Result<()> {
        self.insert_emote_log_on(records, server, today()).await
    }

    async fn query_statistics(&self, query: &StatisticsQuery) -> Result<Vec<EmoteStatistics>> {
        self.query_statistics_on(query, today()).await
    }

    async fn purge_older_than(&self, days_old: u32) -> Result<u64> {
        self.purge_older_than_on(days_old, today()).await
    }
}
