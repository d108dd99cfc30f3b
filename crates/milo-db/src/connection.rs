use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// Removes a throwaway test database when the last
/// connection handle goes away.
pub struct TestHandle {
    filename: String,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}

/// A thread safe connection to the gym database.
#[derive(Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
    _test: Option<Arc<TestHandle>>,
}

impl Connection {
    /// Open a connection to the database, creating the
    /// file if it does not exist yet.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _test: None,
        })
    }

    /// Open a new test database connection. The database is created
    /// on each open with the schema installed, and removed again when
    /// the connection is dropped.
    pub async fn open_test() -> Self {
        let filename =
            format!("/tmp/milo_test_{}.sqlite3", rand::random::<u64>());
        let handle = TestHandle {
            filename: filename.clone(),
        };

        let opts = SqliteConnectOptions::from_str(&filename)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await.unwrap();
        let conn = Self {
            conn: Arc::new(Mutex::new(conn)),
            _test: Some(Arc::new(handle)),
        };
        schema::install(&conn).await.unwrap();
        conn
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }
}
