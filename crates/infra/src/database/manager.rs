//! Database connection manager backed by a pooled, plain (non-encrypted)
//! SQLite database. §4.11 calls this out explicitly: unlike the desktop
//! teacher, this engine's database holds no local activity telemetry, so
//! there is nothing here that needs at-rest encryption.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prospecting_domain::{ProspectingError, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database manager wrapping a pooled SQLite connection.
#[derive(Clone)]
pub struct DbManager {
    pool: Arc<Pool<SqliteConnectionManager>>,
    path: PathBuf,
}

impl DbManager {
    /// Opens (creating parent directories as needed) the database at
    /// `db_path` with a pool of `pool_size` connections.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ProspectingError::Database(format!("failed to create db directory: {e}"))
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        });

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e| ProspectingError::from(InfraError::from(e)))?;

        info!(db_path = %path.display(), max_connections = pool_size, "sqlite pool initialised");

        Ok(Self { pool: Arc::new(pool), path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<PooledConnection> {
        self.pool.get().map_err(|e| ProspectingError::from(InfraError::from(e)))
    }

    /// Creates the schema if it does not already exist.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquires a connection and runs a trivial query to verify the
    /// database is responsive.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> ProspectingError {
    ProspectingError::from(InfraError::from(err))
}
