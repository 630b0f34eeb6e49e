//! Relational storage for the menu
//!
//! The store holds three tables: `toppings`, `pizzas`, and the association
//! table `pizza_topping`. The data access functions in [`toppings`] and
//! [`pizzas`] enforce name uniqueness and topping existence before writing.
//!
//! # Invariants Enforced
//!
//! - Topping and pizza names are unique ignoring case, checked before every
//!   write and backed by a `UNIQUE COLLATE UNICASE` constraint that folds
//!   non-ASCII letters too
//! - Write transactions take the write lock up front (`BEGIN IMMEDIATE`), so
//!   concurrent writers queue on the busy timeout instead of failing
//! - Every association points at existing rows at write time
//! - Deleting either side of an association removes the association
//! - A mutation that fails any check writes nothing

mod errors;
mod lookup;
mod models;
mod pool;
mod schema;

pub mod pizzas;
pub mod toppings;

pub use errors::{Entity, StorageError, StorageResult};
pub use models::{Pizza, Topping};
pub use pool::{Database, DbConfig};
