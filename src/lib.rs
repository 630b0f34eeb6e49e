//! pizzeria - pizza and topping management API
//!
//! A JSON HTTP service over a SQLite store of toppings, pizzas, and the
//! many-to-many association between them.
//!
//! Request flow: router → payload validation → storage transaction → JSON
//! response.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod storage;
pub mod validation;
