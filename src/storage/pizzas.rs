//! Pizza queries and topping associations

use sqlx::SqliteConnection;
use tracing::info;

use super::errors::{Entity, StorageError, StorageResult};
use super::lookup::{exists, name_taken};
use super::models::{group_pizza_rows, Pizza, PizzaToppingRow};
use super::pool::Database;

const SELECT_PIZZAS: &str = "
    SELECT p.id   AS pizza_id,
           p.name AS pizza_name,
           t.id   AS topping_id,
           t.name AS topping_name
    FROM pizzas p
    LEFT JOIN pizza_topping pt ON pt.pizza_id = p.id
    LEFT JOIN toppings t ON t.id = pt.topping_id";

/// All pizzas with their toppings, ordered by id
pub async fn list(db: &Database) -> StorageResult<Vec<Pizza>> {
    let sql = format!("{} ORDER BY p.id, t.id", SELECT_PIZZAS);
    let rows = sqlx::query_as::<_, PizzaToppingRow>(&sql)
        .fetch_all(db.pool())
        .await?;
    Ok(group_pizza_rows(rows))
}

/// Fetch a single pizza with its toppings
pub async fn get(db: &Database, id: i64) -> StorageResult<Pizza> {
    let mut conn = db.pool().acquire().await?;
    load(&mut conn, id).await
}

/// Fail with [`StorageError::NotFound`] unless the pizza exists
pub async fn ensure_exists(db: &Database, id: i64) -> StorageResult<()> {
    let mut conn = db.pool().acquire().await?;
    if exists(&mut conn, Entity::Pizza, id).await? {
        Ok(())
    } else {
        Err(StorageError::NotFound {
            entity: Entity::Pizza,
            id,
        })
    }
}

/// Create a pizza and attach the given toppings.
///
/// Fails with [`StorageError::ToppingNotFound`] on the first id that does not
/// resolve, in which case nothing is written.
pub async fn create(db: &Database, name: &str, topping_ids: &[i64]) -> StorageResult<Pizza> {
    let mut tx = db.begin().await?;

    if name_taken(&mut tx, Entity::Pizza, name, None).await? {
        return Err(StorageError::Duplicate {
            entity: Entity::Pizza,
            name: name.to_string(),
        });
    }

    let id = sqlx::query("INSERT INTO pizzas (name) VALUES (?)")
        .bind(name)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, Entity::Pizza, name))?
        .last_insert_rowid();

    attach_toppings(&mut tx, id, topping_ids).await?;
    let pizza = load(&mut tx, id).await?;

    tx.commit().await?;
    info!(pizza_id = id, name, toppings = ?pizza.topping_ids(), "Pizza created");

    Ok(pizza)
}

/// Replace a pizza's name and its full topping set
pub async fn update(
    db: &Database,
    id: i64,
    name: &str,
    topping_ids: &[i64],
) -> StorageResult<Pizza> {
    let mut tx = db.begin().await?;

    if !exists(&mut tx, Entity::Pizza, id).await? {
        return Err(StorageError::NotFound {
            entity: Entity::Pizza,
            id,
        });
    }

    if name_taken(&mut tx, Entity::Pizza, name, Some(id)).await? {
        return Err(StorageError::Duplicate {
            entity: Entity::Pizza,
            name: name.to_string(),
        });
    }

    sqlx::query("UPDATE pizzas SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, Entity::Pizza, name))?;

    sqlx::query("DELETE FROM pizza_topping WHERE pizza_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    attach_toppings(&mut tx, id, topping_ids).await?;
    let pizza = load(&mut tx, id).await?;

    tx.commit().await?;
    info!(pizza_id = id, name, toppings = ?pizza.topping_ids(), "Pizza updated");

    Ok(pizza)
}

/// Delete a pizza and its associations
pub async fn delete(db: &Database, id: i64) -> StorageResult<()> {
    let affected = sqlx::query("DELETE FROM pizzas WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(StorageError::NotFound {
            entity: Entity::Pizza,
            id,
        });
    }

    info!(pizza_id = id, "Pizza deleted");
    Ok(())
}

/// Link each topping to the pizza. Repeated ids collapse into one row.
async fn attach_toppings(
    conn: &mut SqliteConnection,
    pizza_id: i64,
    topping_ids: &[i64],
) -> StorageResult<()> {
    for &topping_id in topping_ids {
        if !exists(&mut *conn, Entity::Topping, topping_id).await? {
            return Err(StorageError::ToppingNotFound(topping_id));
        }

        sqlx::query("INSERT OR IGNORE INTO pizza_topping (pizza_id, topping_id) VALUES (?, ?)")
            .bind(pizza_id)
            .bind(topping_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn load(conn: &mut SqliteConnection, id: i64) -> StorageResult<Pizza> {
    let sql = format!("{} WHERE p.id = ? ORDER BY t.id", SELECT_PIZZAS);
    let rows = sqlx::query_as::<_, PizzaToppingRow>(&sql)
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

    group_pizza_rows(rows)
        .into_iter()
        .next()
        .ok_or(StorageError::NotFound {
            entity: Entity::Pizza,
            id,
        })
}
