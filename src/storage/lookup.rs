//! Existence and uniqueness checks shared by both entity tables

use sqlx::SqliteConnection;

use super::errors::{Entity, StorageResult};
use super::schema::UNICASE;

fn table(entity: Entity) -> &'static str {
    match entity {
        Entity::Topping => "toppings",
        Entity::Pizza => "pizzas",
    }
}

/// Whether a row with `id` exists
pub(crate) async fn exists(
    conn: &mut SqliteConnection,
    entity: Entity,
    id: i64,
) -> StorageResult<bool> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table(entity));
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await?;
    Ok(count > 0)
}

/// Whether another row already uses `name`, ignoring case.
///
/// `except` excludes the row being renamed so that keeping a name (or
/// changing only its case) is not a collision.
pub(crate) async fn name_taken(
    conn: &mut SqliteConnection,
    entity: Entity,
    name: &str,
    except: Option<i64>,
) -> StorageResult<bool> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE name = ? COLLATE {} AND (? IS NULL OR id != ?)",
        table(entity),
        UNICASE
    );
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(name)
        .bind(except)
        .bind(except)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}
