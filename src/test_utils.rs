/// # Test Utilities Module
///
/// File-backed database fixtures. The accessor only opens files that already
/// exist, so every fixture writes a real SQLite file into its own temporary
/// directory, removed when the fixture is dropped.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEAMS: [&str; 6] = [
    "Arsenal",
    "Barcelona",
    "Juventus",
    "Bayern Munich",
    "Ajax",
    "Porto",
];

/// A SQLite file in an isolated temporary directory
pub struct FixtureDb {
    _dir: TempDir,
    path: PathBuf,
}

impl FixtureDb {
    pub const PLAYER_COUNT: usize = 4;

    /// Creates a database file and runs `sql` against it
    pub fn with_schema(sql: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("FifaStat.sqlite");
        let conn = Connection::open(&path).expect("create fixture database");
        conn.execute_batch(sql).expect("apply fixture schema");
        FixtureDb { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A FifaStat-shaped database with `match_count` matches and a few players
pub fn fifa_fixture(match_count: usize) -> FixtureDb {
    let fixture = FixtureDb::with_schema(
        "
        CREATE TABLE Match (
            id INTEGER PRIMARY KEY,
            home TEXT,
            away TEXT,
            score_home INTEGER,
            score_away INTEGER
        );
        CREATE TABLE Player (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            nationality TEXT,
            rating REAL
        );
        INSERT INTO Player (name, nationality, rating) VALUES
            ('Lionel Messi', 'Argentina', 94.0),
            ('Cristiano Ronaldo', 'Portugal', 93.0),
            ('Neymar', 'Brazil', 92.0),
            ('Manuel Neuer', NULL, 90.5);
        ",
    );

    let mut conn = Connection::open(fixture.path()).expect("reopen fixture database");
    let tx = conn.transaction().expect("begin fixture transaction");
    {
        let mut stmt = tx
            .prepare("INSERT INTO Match (home, away, score_home, score_away) VALUES (?1, ?2, ?3, ?4)")
            .expect("prepare match insert");
        for i in 0..match_count {
            let home = TEAMS[i % TEAMS.len()];
            let away = TEAMS[(i + 1) % TEAMS.len()];
            stmt.execute(params![home, away, (i % 4) as i64, (i % 3) as i64])
                .expect("insert match");
        }
    }
    tx.commit().expect("commit fixture matches");
    fixture
}
