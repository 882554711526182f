//! Shared fixtures for the integration tests
#![allow(dead_code)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A SQLite file in an isolated temporary directory
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestDb {
    pub fn new(sql: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FifaStat.sqlite");
        Connection::open(&path).unwrap().execute_batch(sql).unwrap();
        TestDb { dir, path }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `Match` with `rows` rows and an empty `Player` table
#[allow(dead_code)]
pub fn match_db(rows: usize) -> TestDb {
    let db = TestDb::new(
        "CREATE TABLE Match (id INTEGER, home TEXT, away TEXT, score_home INTEGER, score_away INTEGER);
         CREATE TABLE Player (id INTEGER PRIMARY KEY, name TEXT);",
    );
    if rows == 0 {
        return db;
    }
    let conn = Connection::open(db.path()).unwrap();
    conn.execute_batch(&format!(
        "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < {rows})
         INSERT INTO Match SELECT n, 'home' || n, 'away' || n, n % 5, n % 3 FROM seq;"
    ))
    .unwrap();
    db
}
