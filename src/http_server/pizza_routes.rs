//! Pizza HTTP Routes
//!
//! - `GET /pizzas` - list pizzas with their toppings
//! - `POST /pizzas` - create a pizza from a name and topping ids
//! - `PUT /pizzas/{id}` - replace a pizza's name and topping set (404 for an
//!   unknown pizza takes precedence over body validation)
//! - `DELETE /pizzas/{id}` - delete a pizza

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::storage::{pizzas, Pizza};
use crate::validation::{parse_id, PizzaPayload};

use super::errors::ApiResult;
use super::response::MessageResponse;
use super::state::MenuState;

/// Create pizza routes
pub fn pizza_routes(state: Arc<MenuState>) -> Router {
    Router::new()
        .route("/pizzas", get(list_pizzas_handler).post(create_pizza_handler))
        .route(
            "/pizzas/{id}",
            put(update_pizza_handler).delete(delete_pizza_handler),
        )
        .with_state(state)
}

async fn list_pizzas_handler(State(state): State<Arc<MenuState>>) -> ApiResult<Json<Vec<Pizza>>> {
    Ok(Json(pizzas::list(&state.db).await?))
}

async fn create_pizza_handler(
    State(state): State<Arc<MenuState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let payload = PizzaPayload::from_body(&body)?;
    let pizza = pizzas::create(&state.db, &payload.name, &payload.topping_ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("New Pizza added successfully", pizza.id)),
    ))
}

async fn update_pizza_handler(
    State(state): State<Arc<MenuState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    pizzas::ensure_exists(&state.db, id).await?;
    let payload = PizzaPayload::from_body(&body)?;
    let pizza = pizzas::update(&state.db, id, &payload.name, &payload.topping_ids).await?;

    Ok(Json(MessageResponse::new(
        "Pizza updated successfully",
        pizza.id,
    )))
}

async fn delete_pizza_handler(
    State(state): State<Arc<MenuState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    pizzas::delete(&state.db, id).await?;

    Ok(Json(MessageResponse::new("Pizza removed successfully", id)))
}
