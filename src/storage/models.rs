//! Row types returned by the storage layer

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `toppings` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Topping {
    pub id: i64,
    pub name: String,
}

/// A pizza together with its toppings, ordered by topping id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub toppings: Vec<Topping>,
}

impl Pizza {
    /// Ids of the attached toppings
    pub fn topping_ids(&self) -> Vec<i64> {
        self.toppings.iter().map(|t| t.id).collect()
    }
}

/// One row of the pizzas ⟕ pizza_topping ⟕ toppings join.
///
/// A pizza without toppings yields a single row with null topping columns.
#[derive(Debug, FromRow)]
pub(crate) struct PizzaToppingRow {
    pub pizza_id: i64,
    pub pizza_name: String,
    pub topping_id: Option<i64>,
    pub topping_name: Option<String>,
}

/// Folds join rows (ordered by pizza id) into pizzas.
pub(crate) fn group_pizza_rows(rows: Vec<PizzaToppingRow>) -> Vec<Pizza> {
    let mut pizzas: Vec<Pizza> = Vec::new();

    for row in rows {
        let starts_new = pizzas.last().map(|p| p.id != row.pizza_id).unwrap_or(true);
        if starts_new {
            pizzas.push(Pizza {
                id: row.pizza_id,
                name: row.pizza_name,
                toppings: Vec::new(),
            });
        }

        if let (Some(id), Some(name), Some(pizza)) =
            (row.topping_id, row.topping_name, pizzas.last_mut())
        {
            pizza.toppings.push(Topping { id, name });
        }
    }

    pizzas
}
