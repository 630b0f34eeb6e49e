//! # HTTP Server Module
//!
//! JSON API over the menu store, served with Axum.
//!
//! # Endpoints
//!
//! - `/` - Landing page
//! - `/health` - Health check
//! - `/toppings`, `/toppings/{id}` - Topping management
//! - `/pizzas`, `/pizzas/{id}` - Pizza management

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod pizza_routes;
pub mod response;
pub mod server;
pub mod state;
pub mod topping_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::MessageResponse;
pub use server::{app, HttpServer};
pub use state::MenuState;
