// src/database.rs
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    muscle_group TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    comment TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending',
    scheduled_at DATETIME,
    completed_at DATETIME,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id);

CREATE TABLE IF NOT EXISTS workout_exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
    exercise_id INTEGER NOT NULL REFERENCES exercises(id),
    sets INTEGER NOT NULL DEFAULT 0,
    reps INTEGER NOT NULL DEFAULT 0,
    weight_kg REAL NOT NULL DEFAULT 0,
    duration_sec INTEGER NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout_id ON workout_exercises(workout_id);
"#;

/// Opens the SQLite database at `path`, creating the file if needed.
/// `:memory:` gives a private in-memory database pinned to a single connection.
pub async fn create_pool(path: &str) -> Result<SqlitePool, sqlx::Error> {
    if path == ":memory:" {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Database schema ready");
    Ok(())
}

/// Opens the pool, creates the schema and seeds the catalog. Everything `main` needs before serving.
pub async fn prepare(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool(path).await?;
    migrate(&pool).await?;
    crate::seeder::seed_exercises(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_repeatable() {
        let pool = create_pool(":memory:").await.unwrap();
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["exercises", "users", "workout_exercises", "workouts"]);
    }

    #[tokio::test]
    async fn prepare_reports_an_unopenable_path_as_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tracker.db");
        assert!(prepare(path.to_str().unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn prepare_migrates_and_seeds() {
        let pool = prepare(":memory:").await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises").fetch_one(&pool).await.unwrap();
        assert_eq!(count as usize, crate::seeder::catalog_size());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = create_pool(":memory:").await.unwrap();
        migrate(&pool).await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys").fetch_one(&pool).await.unwrap();
        assert_eq!(enabled, 1);

        let result = sqlx::query("INSERT INTO workouts (user_id, title) VALUES (999, 'orphan')")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
