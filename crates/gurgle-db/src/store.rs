//! MySQL-backed [`ClipStore`].

use std::time::Instant;

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlRow};
use sqlx::query::Query;
use sqlx::Row;
use tracing::{debug, trace, warn};

use gurgle_core::{ClipRow, ClipStore, Error, QueryParam, Result, Statement};

/// Executes clip statements on a MySQL pool.
#[derive(Clone)]
pub struct MySqlClipStore {
    pool: MySqlPool,
}

impl MySqlClipStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn bind_params<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [QueryParam],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            QueryParam::Text(s) => query.bind(s.as_str()),
            QueryParam::Int(i) => query.bind(*i),
        };
    }
    query
}

/// Log a classified failure and pass it through.
fn log_failure(op: &'static str, err: sqlx::Error) -> Error {
    let err = Error::from(err);
    warn!(
        subsystem = "database",
        component = "clip_store",
        op,
        error_code = err.code(),
        error = %err,
        "Clip statement failed"
    );
    err
}

/// Integer column that may be declared signed or unsigned.
fn get_int(row: &MySqlRow, column: &str) -> Result<i64> {
    match row.try_get::<i64, _>(column) {
        Ok(v) => Ok(v),
        Err(_) => {
            let v: u64 = row.try_get(column)?;
            i64::try_from(v).map_err(|_| Error::Internal(format!("{} out of range: {}", column, v)))
        }
    }
}

/// Format presence flag stored as BOOLEAN/TINYINT; any non-zero value is set.
fn get_flag(row: &MySqlRow, column: &str) -> Result<bool> {
    if let Ok(v) = row.try_get::<bool, _>(column) {
        return Ok(v);
    }
    Ok(get_int(row, column)? != 0)
}

/// Nullable year stored as YEAR, SMALLINT or INT.
fn get_year(row: &MySqlRow) -> Result<Option<i32>> {
    if let Ok(v) = row.try_get::<Option<i32>, _>("year") {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<u16>, _>("year") {
        return Ok(v.map(i32::from));
    }
    let v: Option<i64> = row.try_get("year")?;
    v.map(|y| i32::try_from(y).map_err(|_| Error::Internal(format!("year out of range: {}", y))))
        .transpose()
}

fn clip_row(row: &MySqlRow) -> Result<ClipRow> {
    Ok(ClipRow {
        id: get_int(row, "id")?,
        key: row.try_get("key")?,
        mp3: get_flag(row, "mp3")?,
        m4a: get_flag(row, "m4a")?,
        m4r: get_flag(row, "m4r")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        title: row.try_get("title")?,
        year: get_year(row)?,
    })
}

#[async_trait]
impl ClipStore for MySqlClipStore {
    async fn count(&self, statement: &Statement) -> Result<Option<i64>> {
        let start = Instant::now();
        let row = bind_params(sqlx::query(&statement.sql), &statement.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| log_failure("count", e))?;

        let total = row.map(|r| get_int(&r, "total_count")).transpose()?;

        debug!(
            subsystem = "database",
            component = "clip_store",
            op = "count",
            total_count = ?total,
            duration_ms = start.elapsed().as_millis() as u64,
            "Count statement complete"
        );
        Ok(total)
    }

    async fn fetch(&self, statement: &Statement) -> Result<Vec<ClipRow>> {
        let start = Instant::now();
        let rows = bind_params(sqlx::query(&statement.sql), &statement.params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_failure("fetch", e))?;

        let clips = rows.iter().map(clip_row).collect::<Result<Vec<_>>>()?;

        for clip in &clips {
            trace!(
                subsystem = "database",
                component = "clip_store",
                clip_key = %clip.key,
                "Fetched clip row"
            );
        }
        debug!(
            subsystem = "database",
            component = "clip_store",
            op = "fetch",
            result_count = clips.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetch statement complete"
        );
        Ok(clips)
    }
}
