//! Topping HTTP Routes
//!
//! - `GET /toppings` - list all toppings
//! - `POST /toppings` - create a topping
//! - `PUT /toppings/{id}` - rename a topping
//! - `DELETE /toppings/{id}` - delete a topping and detach it from pizzas

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::storage::{toppings, Topping};
use crate::validation::{parse_id, ToppingPayload};

use super::errors::ApiResult;
use super::response::MessageResponse;
use super::state::MenuState;

/// Create topping routes
pub fn topping_routes(state: Arc<MenuState>) -> Router {
    Router::new()
        .route("/toppings", get(list_toppings_handler).post(create_topping_handler))
        .route(
            "/toppings/{id}",
            put(update_topping_handler).delete(delete_topping_handler),
        )
        .with_state(state)
}

async fn list_toppings_handler(
    State(state): State<Arc<MenuState>>,
) -> ApiResult<Json<Vec<Topping>>> {
    Ok(Json(toppings::list(&state.db).await?))
}

async fn create_topping_handler(
    State(state): State<Arc<MenuState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let payload = ToppingPayload::from_body(&body)?;
    let topping = toppings::create(&state.db, &payload.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "New Topping added successfully",
            topping.id,
        )),
    ))
}

async fn update_topping_handler(
    State(state): State<Arc<MenuState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let payload = ToppingPayload::from_body(&body)?;
    let topping = toppings::rename(&state.db, id, &payload.name).await?;

    Ok(Json(MessageResponse::new(
        "Topping updated successfully",
        topping.id,
    )))
}

async fn delete_topping_handler(
    State(state): State<Arc<MenuState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    toppings::delete(&state.db, id).await?;

    Ok(Json(MessageResponse::new("Topping removed successfully", id)))
}
