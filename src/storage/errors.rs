//! Storage error types
//!
//! Error codes:
//! - PIZZERIA_NOT_FOUND (row addressed by id does not exist)
//! - PIZZERIA_DUPLICATE_NAME (case-insensitive name collision)
//! - PIZZERIA_TOPPING_NOT_FOUND (pizza references a missing topping)
//! - PIZZERIA_DATABASE_ERROR (driver or SQL failure)

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Entity kinds addressed by the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Topping,
    Pizza,
}

impl Entity {
    /// Human readable entity name, capitalized for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Topping => "Topping",
            Entity::Pizza => "Pizza",
        }
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row with the given id does not exist
    #[error("{} not found", .entity.as_str())]
    NotFound { entity: Entity, id: i64 },

    /// Another row already uses this name (case-insensitive)
    #[error("{} '{name}' already exists.", .entity.as_str())]
    Duplicate { entity: Entity, name: String },

    /// A pizza references a topping id that does not exist
    #[error("Topping with ID {0} not found")]
    ToppingNotFound(i64),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::NotFound { .. } => "PIZZERIA_NOT_FOUND",
            StorageError::Duplicate { .. } => "PIZZERIA_DUPLICATE_NAME",
            StorageError::ToppingNotFound(_) => "PIZZERIA_TOPPING_NOT_FOUND",
            StorageError::Database(_) => "PIZZERIA_DATABASE_ERROR",
        }
    }

    /// Maps a unique-constraint violation on `name` to [`StorageError::Duplicate`].
    ///
    /// The constraint is the authoritative guard when two writers pass the
    /// read-side duplicate check at the same time.
    pub(crate) fn from_write(err: sqlx::Error, entity: Entity, name: &str) -> Self {
        let unique_violation = err
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);

        if unique_violation {
            StorageError::Duplicate {
                entity,
                name: name.to_string(),
            }
        } else {
            StorageError::Database(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, DbConfig};

    #[test]
    fn test_messages() {
        let err = StorageError::Duplicate {
            entity: Entity::Topping,
            name: "Olives".to_string(),
        };
        assert_eq!(err.to_string(), "Topping 'Olives' already exists.");

        let err = StorageError::NotFound {
            entity: Entity::Pizza,
            id: 4,
        };
        assert_eq!(err.to_string(), "Pizza not found");

        assert_eq!(
            StorageError::ToppingNotFound(9).to_string(),
            "Topping with ID 9 not found"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            StorageError::ToppingNotFound(1).code(),
            "PIZZERIA_TOPPING_NOT_FOUND"
        );
        assert_eq!(
            StorageError::Database(sqlx::Error::RowNotFound).code(),
            "PIZZERIA_DATABASE_ERROR"
        );
    }

    #[test]
    fn test_non_constraint_error_stays_database() {
        let err = StorageError::from_write(sqlx::Error::PoolTimedOut, Entity::Pizza, "x");
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_duplicate() {
        let db = Database::open(&DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO toppings (name) VALUES ('Basil')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO toppings (name) VALUES ('bASIL')")
            .execute(db.pool())
            .await
            .unwrap_err();

        match StorageError::from_write(err, Entity::Topping, "bASIL") {
            StorageError::Duplicate { entity, name } => {
                assert_eq!(entity, Entity::Topping);
                assert_eq!(name, "bASIL");
            }
            other => panic!("expected Duplicate, got {:?}", other),
        }
    }
}
