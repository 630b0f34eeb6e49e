//! Topping queries
//!
//! Every mutation runs in its own transaction; a failed check drops the
//! transaction and leaves the table untouched.

use sqlx::SqliteConnection;
use tracing::info;

use super::errors::{Entity, StorageError, StorageResult};
use super::lookup::name_taken;
use super::models::Topping;
use super::pool::Database;

/// All toppings ordered by id
pub async fn list(db: &Database) -> StorageResult<Vec<Topping>> {
    let toppings = sqlx::query_as::<_, Topping>("SELECT id, name FROM toppings ORDER BY id")
        .fetch_all(db.pool())
        .await?;
    Ok(toppings)
}

/// Fetch a single topping
pub async fn get(db: &Database, id: i64) -> StorageResult<Topping> {
    let mut conn = db.pool().acquire().await?;
    find(&mut conn, id).await?.ok_or(StorageError::NotFound {
        entity: Entity::Topping,
        id,
    })
}

/// Insert a topping whose name is not yet used (case-insensitive)
pub async fn create(db: &Database, name: &str) -> StorageResult<Topping> {
    let mut tx = db.begin().await?;

    if name_taken(&mut tx, Entity::Topping, name, None).await? {
        return Err(StorageError::Duplicate {
            entity: Entity::Topping,
            name: name.to_string(),
        });
    }

    let id = sqlx::query("INSERT INTO toppings (name) VALUES (?)")
        .bind(name)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, Entity::Topping, name))?
        .last_insert_rowid();

    tx.commit().await?;
    info!(topping_id = id, name, "Topping created");

    Ok(Topping {
        id,
        name: name.to_string(),
    })
}

/// Rename a topping. Keeping its own name, in any case, is allowed.
pub async fn rename(db: &Database, id: i64, name: &str) -> StorageResult<Topping> {
    let mut tx = db.begin().await?;

    if find(&mut tx, id).await?.is_none() {
        return Err(StorageError::NotFound {
            entity: Entity::Topping,
            id,
        });
    }

    if name_taken(&mut tx, Entity::Topping, name, Some(id)).await? {
        return Err(StorageError::Duplicate {
            entity: Entity::Topping,
            name: name.to_string(),
        });
    }

    sqlx::query("UPDATE toppings SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, Entity::Topping, name))?;

    tx.commit().await?;
    info!(topping_id = id, name, "Topping renamed");

    Ok(Topping {
        id,
        name: name.to_string(),
    })
}

/// Delete a topping; its associations cascade away with it
pub async fn delete(db: &Database, id: i64) -> StorageResult<()> {
    let affected = sqlx::query("DELETE FROM toppings WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(StorageError::NotFound {
            entity: Entity::Topping,
            id,
        });
    }

    info!(topping_id = id, "Topping deleted");
    Ok(())
}

pub(crate) async fn find(conn: &mut SqliteConnection, id: i64) -> StorageResult<Option<Topping>> {
    let topping = sqlx::query_as::<_, Topping>("SELECT id, name FROM toppings WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(topping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConfig;

    async fn setup() -> Database {
        Database::open(&DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = setup().await;
        let cheese = create(&db, "Cheese").await.unwrap();
        let basil = create(&db, "Basil").await.unwrap();

        assert_eq!(list(&db).await.unwrap(), vec![cheese, basil]);
    }

    #[tokio::test]
    async fn test_create_duplicate_any_case() {
        let db = setup().await;
        create(&db, "Pepperoni").await.unwrap();

        let err = create(&db, "pEPPERONI").await.unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { entity: Entity::Topping, .. }));
        assert_eq!(list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_non_ascii_case() {
        let db = setup().await;
        create(&db, "Jalapeño").await.unwrap();

        let err = create(&db, "JALAPEÑO").await.unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { .. }));
        assert_eq!(list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_to_own_name() {
        let db = setup().await;
        let onion = create(&db, "Onion").await.unwrap();

        let renamed = rename(&db, onion.id, "ONION").await.unwrap();
        assert_eq!(renamed.name, "ONION");
        assert_eq!(get(&db, onion.id).await.unwrap().name, "ONION");
    }

    #[tokio::test]
    async fn test_rename_conflict() {
        let db = setup().await;
        create(&db, "Onion").await.unwrap();
        let garlic = create(&db, "Garlic").await.unwrap();

        let err = rename(&db, garlic.id, "onion").await.unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { .. }));
        assert_eq!(get(&db, garlic.id).await.unwrap().name, "Garlic");
    }

    #[tokio::test]
    async fn test_rename_missing() {
        let db = setup().await;
        let err = rename(&db, 42, "Ham").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup().await;
        let ham = create(&db, "Ham").await.unwrap();

        delete(&db, ham.id).await.unwrap();
        assert!(list(&db).await.unwrap().is_empty());

        let err = delete(&db, ham.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    // ==================== Concurrent writers ====================

    async fn file_db(dir: &tempfile::TempDir) -> Database {
        let url = format!("sqlite://{}", dir.path().join("menu.db").display());
        Database::open(&DbConfig::new(url)).await.unwrap()
    }

    async fn create_concurrently(db: &Database, names: Vec<String>) -> Vec<StorageResult<Topping>> {
        let handles: Vec<_> = names
            .into_iter()
            .map(|name| {
                let db = db.clone();
                tokio::spawn(async move { create(&db, &name).await })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_same_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = file_db(&dir).await;

        for round in 0..20 {
            let name = format!("Olive {}", round);
            let names = (0..5).map(|_| name.clone()).collect();
            let results = create_concurrently(&db, names).await;

            let created = results.iter().filter(|r| r.is_ok()).count();
            let duplicates = results
                .iter()
                .filter(|r| matches!(r, Err(StorageError::Duplicate { .. })))
                .count();
            assert_eq!(created, 1, "round {}: {:?}", round, results);
            assert_eq!(duplicates, 4, "round {}: {:?}", round, results);
        }

        assert_eq!(list(&db).await.unwrap().len(), 20);
        db.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_distinct_names() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = file_db(&dir).await;

        for round in 0..20 {
            let names = (0..5).map(|i| format!("Pepper {}-{}", round, i)).collect();
            let results = create_concurrently(&db, names).await;
            assert!(results.iter().all(|r| r.is_ok()), "round {}: {:?}", round, results);
        }

        assert_eq!(list(&db).await.unwrap().len(), 100);
        db.close().await;
    }
}
