//! Table definitions
//!
//! Names are unique case-insensitively at the database level through the
//! `UNICASE` collation, which folds the full Unicode range rather than
//! ASCII only. Every connection must register it (see [`unicase`]) before
//! touching the name columns. Association rows cascade away with either side.

use std::cmp::Ordering;

use sqlx::SqlitePool;

use super::errors::StorageResult;

const CREATE_TOPPINGS: &str = "
    CREATE TABLE IF NOT EXISTS toppings (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE UNICASE CHECK (length(name) <= 100)
    )";

const CREATE_PIZZAS: &str = "
    CREATE TABLE IF NOT EXISTS pizzas (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE UNICASE CHECK (length(name) <= 100)
    )";

const CREATE_PIZZA_TOPPING: &str = "
    CREATE TABLE IF NOT EXISTS pizza_topping (
        pizza_id   INTEGER NOT NULL REFERENCES pizzas(id) ON DELETE CASCADE,
        topping_id INTEGER NOT NULL REFERENCES toppings(id) ON DELETE CASCADE,
        PRIMARY KEY (pizza_id, topping_id)
    )";

const CREATE_PIZZA_TOPPING_INDEX: &str = "
    CREATE INDEX IF NOT EXISTS pizza_topping_topping_id
        ON pizza_topping (topping_id)";

/// Collation used by both name columns and by duplicate lookups
pub(crate) const UNICASE: &str = "UNICASE";

/// Case-insensitive ordering over the Unicode lowercase mapping
pub(crate) fn unicase(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Create every table and index that does not exist yet
pub async fn create_all(pool: &SqlitePool) -> StorageResult<()> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
    for statement in [
        CREATE_TOPPINGS,
        CREATE_PIZZAS,
        CREATE_PIZZA_TOPPING,
        CREATE_PIZZA_TOPPING_INDEX,
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, DbConfig};

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = Database::open(&DbConfig::in_memory()).await.unwrap();
        db.bootstrap().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert_eq!(tables, vec!["pizza_topping", "pizzas", "toppings"]);
    }

    #[tokio::test]
    async fn test_unique_name_ignores_case() {
        let db = Database::open(&DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO toppings (name) VALUES ('Basil')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO toppings (name) VALUES ('BASIL')")
            .execute(db.pool())
            .await
            .unwrap_err();

        assert!(err.as_database_error().unwrap().is_unique_violation());
    }

    #[tokio::test]
    async fn test_unique_name_folds_non_ascii_case() {
        let db = Database::open(&DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO toppings (name) VALUES ('Jalapeño')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO toppings (name) VALUES ('JALAPEÑO')")
            .execute(db.pool())
            .await
            .unwrap_err();

        assert!(err.as_database_error().unwrap().is_unique_violation());
    }

    #[test]
    fn test_unicase_ordering() {
        assert_eq!(unicase("Jalapeño", "JALAPEÑO"), Ordering::Equal);
        assert_eq!(unicase("Ölive", "öLIVE"), Ordering::Equal);
        assert_eq!(unicase("basil", "Capers"), Ordering::Less);
        assert_ne!(unicase("Jalapeño", "Jalapeno"), Ordering::Equal);
    }
}
