/// Connection Management Module
///
/// `Database` owns a single SQLite connection for its whole life. The
/// connection is opened on construction and released by `close()` or when
/// the value is dropped; a closed accessor never reopens.

use crate::core::db::query::{quote_identifier, QueryExecutor};
use crate::core::db::schema::{self, TableDescriptor};
use crate::core::db::value::{Params, Row};
use crate::core::{FifaStatError, Result};
use crate::frame::Frame;
use indexmap::IndexMap;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Database file opened when no path is given, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "FifaStat.sqlite";

/// Accessor over one existing SQLite database file
#[derive(Debug)]
pub struct Database {
    /// Active connection (None once closed)
    connection: Option<Connection>,
    /// Path the accessor was opened with
    path: PathBuf,
}

impl Database {
    /// Opens the database file at `path`
    ///
    /// # Errors
    ///
    /// * `FifaStatError::NotFound` if nothing exists at `path`; no connection
    ///   is attempted in that case.
    /// * `FifaStatError::OpenFailed` if SQLite cannot open the file or read
    ///   its schema (not a database, corrupt, locked, permission denied).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(FifaStatError::NotFound { path });
        }

        // No CREATE: the file must already be there. No URI: a name such as
        // `file:stats.sqlite` is a plain file name, not a connection string.
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = match Connection::open_with_flags(&path, flags) {
            Ok(conn) => conn,
            Err(source) => return Err(FifaStatError::OpenFailed { path, source }),
        };

        // SQLite defers reading the file until first use; touch the schema so
        // a bad file fails here rather than on the first query.
        let schema_read = connection.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        });
        let object_count = match schema_read {
            Ok(count) => count,
            Err(source) => return Err(FifaStatError::OpenFailed { path, source }),
        };

        info!("Opened database {:?} ({} schema objects)", path, object_count);
        Ok(Database {
            connection: Some(connection),
            path,
        })
    }

    /// Opens `FifaStat.sqlite` in the current working directory
    pub fn open_default() -> Result<Self> {
        Database::open(DEFAULT_DATABASE_PATH)
    }

    /// Opens `path`, hands the accessor to `f`, and closes it afterwards.
    ///
    /// The accessor is closed on every exit path: normal return, an error
    /// from `f`, or unwinding.
    pub fn scoped<P, T, F>(path: P, f: F) -> Result<T>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Database) -> Result<T>,
    {
        let mut db = Database::open(path)?;
        let result = f(&mut db);
        db.close();
        result
    }

    /// Path the accessor was opened with
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&self) -> Result<&Connection> {
        self.connection.as_ref().ok_or(FifaStatError::Closed)
    }

    /// Runs `sql` and returns its rows in engine order
    ///
    /// Mutating statements are executed as well; nothing restricts the
    /// accessor to reads.
    pub fn execute_query(&self, sql: &str, params: &Params) -> Result<Vec<Row>> {
        QueryExecutor::new(self.connection()?).query_rows(sql, params)
    }

    /// Runs `sql` and returns its result as a frame
    pub fn execute_query_frame(&self, sql: &str, params: &Params) -> Result<Frame> {
        QueryExecutor::new(self.connection()?).query_frame(sql, params)
    }

    /// Table names in catalog order
    pub fn list_tables(&self) -> Result<Vec<String>> {
        schema::list_tables(self.connection()?)
    }

    /// Column names of `table_name` in declaration order.
    ///
    /// An unknown table yields an empty list rather than an error.
    pub fn get_table_columns(&self, table_name: &str) -> Result<Vec<String>> {
        schema::table_columns(self.connection()?, table_name)
    }

    /// Full column metadata for `table_name`
    pub fn describe_table(&self, table_name: &str) -> Result<TableDescriptor> {
        schema::describe_table(self.connection()?, table_name)
    }

    /// Reads every table into a frame, keyed in `list_tables` order.
    ///
    /// Each table is scanned independently; there is no snapshot across
    /// tables. The first failing scan aborts the export.
    pub fn export_all_tables(&self) -> Result<IndexMap<String, Frame>> {
        let conn = self.connection()?;
        let executor = QueryExecutor::new(conn);

        let mut frames = IndexMap::new();
        for table in schema::list_tables(conn)? {
            let sql = format!("SELECT * FROM {}", quote_identifier(&table));
            let frame = executor.query_frame(&sql, &Params::None)?;
            debug!("Exported table {} ({} rows)", table, frame.height());
            frames.insert(table, frame);
        }
        Ok(frames)
    }

    /// Releases the connection. Calling it again is a no-op.
    pub fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            match conn.close() {
                Ok(()) => info!("Closed database {:?}", self.path),
                Err((_conn, e)) => {
                    warn!("Error while closing database {:?}: {}", self.path, e)
                }
            }
        }
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::value::Value;
    use crate::test_utils::{fifa_fixture, FixtureDb};

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sqlite");

        match Database::open(&path) {
            Err(FifaStatError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert!(!path.exists(), "open must not create the file");
    }

    #[test]
    fn test_open_non_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.sqlite");
        std::fs::write(&path, "this is plainly not a sqlite database file, just some text").unwrap();

        match Database::open(&path) {
            Err(FifaStatError::OpenFailed { source, .. }) => {
                assert!(source.to_string().contains("not a database"))
            }
            other => panic!("Expected OpenFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::open(dir.path());
        assert!(matches!(result, Err(FifaStatError::OpenFailed { .. })));
    }

    #[test]
    fn test_list_tables_and_columns() {
        let fixture = fifa_fixture(20);
        let db = Database::open(fixture.path()).unwrap();

        assert_eq!(db.list_tables().unwrap(), vec!["Match", "Player"]);
        assert_eq!(
            db.get_table_columns("Match").unwrap(),
            vec!["id", "home", "away", "score_home", "score_away"]
        );
        assert!(db.get_table_columns("Nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_execute_query_limit() {
        let fixture = fifa_fixture(500);
        let db = Database::open(fixture.path()).unwrap();

        let rows = db.execute_query("SELECT * FROM Match LIMIT 10", &Params::None).unwrap();
        assert_eq!(rows.len(), 10);
        for row in &rows {
            assert_eq!(row.columns(), ["id", "home", "away", "score_home", "score_away"]);
        }
    }

    #[test]
    fn test_execute_query_with_params() {
        let fixture = fifa_fixture(50);
        let db = Database::open(fixture.path()).unwrap();

        let rows = db
            .execute_query(
                "SELECT id FROM Match WHERE id BETWEEN ? AND ? ORDER BY id",
                &Params::positional([5i64, 7i64]),
            )
            .unwrap();
        let ids: Vec<i64> = rows.iter().filter_map(|r| r.get("id")?.as_i64()).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn test_query_failure_returns_no_rows() {
        let fixture = fifa_fixture(5);
        let db = Database::open(fixture.path()).unwrap();

        let result = db.execute_query("SELECT * FROM Nonexistent", &Params::None);
        assert!(matches!(result, Err(FifaStatError::Query(_))));

        let result = db.execute_query_frame("SELEC oops", &Params::None);
        assert!(matches!(result, Err(FifaStatError::Query(_))));
    }

    #[test]
    fn test_export_all_tables() {
        let fixture = fifa_fixture(30);
        let db = Database::open(fixture.path()).unwrap();

        let frames = db.export_all_tables().unwrap();
        let keys: Vec<&String> = frames.keys().collect();
        assert_eq!(keys, vec!["Match", "Player"]);
        assert_eq!(frames["Match"].height(), 30);
        assert_eq!(frames["Player"].height(), FixtureDb::PLAYER_COUNT);
    }

    #[test]
    fn test_export_quotes_table_names() {
        let fixture = FixtureDb::with_schema(
            "CREATE TABLE \"Team Attributes\" (id INTEGER, speed INTEGER);
             INSERT INTO \"Team Attributes\" VALUES (1, 60), (2, 70);",
        );
        let db = Database::open(fixture.path()).unwrap();

        let frames = db.export_all_tables().unwrap();
        assert_eq!(frames["Team Attributes"].height(), 2);
    }

    #[test]
    fn test_close_is_idempotent() {
        let fixture = fifa_fixture(5);
        let mut db = Database::open(fixture.path()).unwrap();
        assert!(db.is_open());

        db.close();
        db.close();
        assert!(!db.is_open());
    }

    #[test]
    fn test_operations_after_close_fail() {
        let fixture = fifa_fixture(5);
        let mut db = Database::open(fixture.path()).unwrap();
        db.close();

        assert!(matches!(db.list_tables(), Err(FifaStatError::Closed)));
        assert!(matches!(
            db.execute_query("SELECT 1", &Params::None),
            Err(FifaStatError::Closed)
        ));
        assert!(matches!(db.get_table_columns("Match"), Err(FifaStatError::Closed)));
        assert!(matches!(db.export_all_tables(), Err(FifaStatError::Closed)));
    }

    #[test]
    fn test_scoped_returns_closure_result() {
        let fixture = fifa_fixture(12);

        let count = Database::scoped(fixture.path(), |db| {
            let rows = db.execute_query("SELECT COUNT(*) AS n FROM Match", &Params::None)?;
            Ok(rows[0].get("n").cloned())
        })
        .unwrap();
        assert_eq!(count, Some(Value::Integer(12)));
    }

    #[test]
    fn test_scoped_propagates_errors() {
        let fixture = fifa_fixture(3);

        let result: Result<()> = Database::scoped(fixture.path(), |db| {
            db.execute_query("SELECT * FROM Nonexistent", &Params::None)?;
            Ok(())
        });
        assert!(matches!(result, Err(FifaStatError::Query(_))));
    }
}
