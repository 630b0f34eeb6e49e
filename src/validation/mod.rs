//! Request validation
//!
//! Payloads are validated before they reach storage. Validation is pure:
//! it never touches the database, so duplicate names and missing topping
//! references are reported by the storage layer instead.

mod errors;
mod payload;

pub use errors::{messages, ValidationErrors, SCHEMA_KEY};
pub use payload::{parse_id, PizzaPayload, ToppingPayload, MAX_NAME_LEN};
