use axum::{
    extract::{Path, State},
    Json,
};
use db::models::{NewTopping, Topping, ToppingChanges};
use db::repository::toppings as topping_repo;
use tracing::info;

use super::Message;
use crate::{error::ApiResult, extract::Payload, AppState};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Topping>>> {
    let toppings = topping_repo::list_toppings(&state.pool).await?;
    Ok(Json(toppings))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewTopping>,
) -> ApiResult<Json<Topping>> {
    let topping = topping_repo::create_topping(&state.pool, new).await?;
    info!(topping_id = %topping.topping_id, "Created topping");
    Ok(Json(topping))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Payload(changes): Payload<ToppingChanges>,
) -> ApiResult<Json<Topping>> {
    let topping = topping_repo::update_topping(&state.pool, &id, changes).await?;
    info!(topping_id = %id, "Updated topping");
    Ok(Json(topping))
}

/// Also removes the topping from every pizza type it was linked to.
pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Message>> {
    topping_repo::delete_topping(&state.pool, &id).await?;
    info!(topping_id = %id, "Deleted topping");
    Ok(Message::new("Topping deleted successfully"))
}
