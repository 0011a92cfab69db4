//! # Store Handle
//!
//! Owns the single SQLite connection for the lifetime of the process, the
//! table definitions, and the seed rows written into empty tables.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{StoreError, StoreResult};

/// Strategy for the single-user read path.
///
/// `Interpolated` formats the id straight into the SQL text. `Bound` uses a
/// placeholder like every other statement in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLookup {
    #[default]
    Interpolated,
    Bound,
}

/// Credentials for the seeded administrator row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Admin username (default: "admin")
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Admin password, stored verbatim (default: "admin123")
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path (default: "./data.db")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Single-user read strategy (default: interpolated)
    #[serde(default)]
    pub user_lookup: UserLookup,

    #[serde(default)]
    pub seed: SeedConfig,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_lookup: UserLookup::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Create a config pointing at the given database file
    pub fn with_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Default::default()
        }
    }
}

/// Handle to the embedded relational store.
///
/// Statements run one at a time through the connection mutex; the store
/// issues no multi-statement transactions.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
    user_lookup: UserLookup,
}

impl Store {
    /// Create the database file if absent, ensure both tables exist and seed
    /// any table that is currently empty. Safe to call on every startup.
    pub fn initialize(config: &StoreConfig) -> StoreResult<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.db_path)?;
        info!(path = %config.db_path.display(), "opened store");

        Self::from_connection(conn, config)
    }

    /// Open a private in-memory store with the same schema and seed rows
    pub fn open_in_memory(config: &StoreConfig) -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, config)
    }

    fn from_connection(conn: Connection, config: &StoreConfig) -> StoreResult<Self> {
        create_tables(&conn)?;
        seed_tables(&conn, &config.seed)?;

        Ok(Self {
            conn: Mutex::new(conn),
            user_lookup: config.user_lookup,
        })
    }

    /// Run `f` against the live connection
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::Unavailable)?;
        f(&conn)
    }

    /// Run `f` against the connection on tokio's blocking pool.
    ///
    /// Handlers go through this so a slow statement or a contended lock holds
    /// a blocking thread rather than a runtime worker.
    pub async fn call<T, F>(self: &Arc<Self>, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.with_conn(f))
            .await
            .map_err(|_| StoreError::Unavailable)?
    }

    /// Configured single-user read strategy
    pub fn user_lookup(&self) -> UserLookup {
        self.user_lookup
    }
}

fn create_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            email TEXT,
            role TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            price REAL
        )",
        [],
    )?;

    Ok(())
}

fn seed_tables(conn: &Connection, seed: &SeedConfig) -> StoreResult<()> {
    if table_is_empty(conn, "users")? {
        conn.execute(
            "INSERT INTO users (username, password, email, role) VALUES (?1, ?2, ?3, ?4)",
            params![
                seed.admin_username,
                seed.admin_password,
                "admin@example.com",
                "admin"
            ],
        )?;
        conn.execute(
            "INSERT INTO users (username, password, email, role) VALUES (?1, ?2, ?3, ?4)",
            params!["user1", "password123", "user1@example.com", "user"],
        )?;
        info!("seeded users table");
    }

    if table_is_empty(conn, "items")? {
        conn.execute(
            "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)",
            params!["Item 1", "This is item 1", 10.99],
        )?;
        conn.execute(
            "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)",
            params!["Item 2", "This is item 2", 20.99],
        )?;
        info!("seeded items table");
    }

    Ok(())
}

// Table names come from the fixed schema above, never from callers.
fn table_is_empty(conn: &Connection, table: &str) -> StoreResult<bool> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count == 0)
}

/// Whether a database file already exists at `path`
pub fn store_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn count(store: &Store, table: &str) -> i64 {
        store
            .with_conn(|conn| {
                Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_file_and_seeds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/data.db");
        assert!(!store_exists(&path));

        let store = Store::initialize(&StoreConfig::with_path(&path)).unwrap();

        assert!(store_exists(&path));
        assert_eq!(count(&store, "users"), 2);
        assert_eq!(count(&store, "items"), 2);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = StoreConfig::with_path(temp.path().join("data.db"));

        drop(Store::initialize(&config).unwrap());
        let store = Store::initialize(&config).unwrap();

        assert_eq!(count(&store, "users"), 2);
        assert_eq!(count(&store, "items"), 2);
    }

    #[test]
    fn test_seed_uses_configured_admin() {
        let mut config = StoreConfig::default();
        config.seed.admin_username = "root".to_string();
        let store = Store::open_in_memory(&config).unwrap();

        let role: String = store
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT role FROM users WHERE username = ?1",
                    ["root"],
                    |row| row.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(role, "admin");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_call_waits_for_lock_off_the_runtime_thread() {
        let store = Arc::new(Store::open_in_memory(&StoreConfig::default()).unwrap());
        let (locked_tx, locked_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        let holder = Arc::clone(&store);
        let thread = std::thread::spawn(move || {
            holder
                .with_conn(|_| {
                    locked_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                    Ok(())
                })
                .unwrap();
        });
        locked_rx.recv().unwrap();

        let waiting = Arc::clone(&store);
        let pending = tokio::spawn(async move {
            waiting
                .call(|conn| {
                    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| {
                        row.get::<_, i64>(0)
                    })?)
                })
                .await
        });

        // the single runtime thread keeps running other tasks meanwhile
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        release_tx.send(()).unwrap();
        assert_eq!(pending.await.unwrap().unwrap(), 2);
        thread.join().unwrap();
    }

    #[test]
    fn test_user_lookup_defaults_to_interpolated() {
        let store = Store::open_in_memory(&StoreConfig::default()).unwrap();
        assert_eq!(store.user_lookup(), UserLookup::Interpolated);

        let parsed: StoreConfig = serde_json::from_str(r#"{"user_lookup":"bound"}"#).unwrap();
        assert_eq!(parsed.user_lookup, UserLookup::Bound);
        assert_eq!(parsed.db_path, PathBuf::from("./data.db"));
    }
}
