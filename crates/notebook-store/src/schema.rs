//! Schema definitions and migration utilities.
//!
//! This module provides embedded SQL schema definitions and utilities
//! for managing database migrations.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the notebook documents (001_notebooks.sql).
pub const NOTEBOOKS_MIGRATION: &str = include_str!("../../../migrations/001_notebooks.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
/// Migrations check for existing objects before creating them.
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running notebooks migration (001_notebooks.sql)...");
    sqlx::raw_sql(NOTEBOOKS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notebooks migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notebooks` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'notebooks'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notebooks_migration_embedded() {
        assert!(NOTEBOOKS_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notebooks"));
        assert!(NOTEBOOKS_MIGRATION.contains("notes JSONB"));
        assert!(NOTEBOOKS_MIGRATION.contains("USING GIN"));
    }

    #[test]
    fn test_migration_is_idempotent_sql() {
        // Every CREATE must be guarded so run_migrations can run on every boot.
        for line in NOTEBOOKS_MIGRATION.lines() {
            let line = line.trim_start();
            if line.starts_with("CREATE") {
                assert!(line.contains("IF NOT EXISTS"), "unguarded: {}", line);
            }
        }
    }
}
