//! Pizza type routes, including the topping links of a pizza type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::models::{NewPizzaType, PizzaTopping, PizzaType, PizzaTypeChanges};
use db::repository::{pizza_toppings as link_repo, pizza_types as pizza_repo};
use serde::Deserialize;
use tracing::info;

use super::Message;
use crate::{error::ApiResult, extract::Payload, AppState};

#[derive(Debug, Deserialize)]
pub struct LinkToppingDto {
    pub topping_id: String,
}

/// GET /pizzas
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PizzaType>>> {
    let pizzas = pizza_repo::list_pizza_types(&state.pool).await?;
    Ok(Json(pizzas))
}

/// POST /pizzas
pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewPizzaType>,
) -> ApiResult<Json<PizzaType>> {
    let pizza = pizza_repo::create_pizza_type(&state.pool, new).await?;
    info!(pizza_type_id = %pizza.pizza_type_id, "Created pizza type");
    Ok(Json(pizza))
}

/// PUT /pizzas/{pizza_type_id}
pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Payload(changes): Payload<PizzaTypeChanges>,
) -> ApiResult<Json<PizzaType>> {
    let pizza = pizza_repo::update_pizza_type(&state.pool, &id, changes).await?;
    info!(pizza_type_id = %id, "Updated pizza type");
    Ok(Json(pizza))
}

/// DELETE /pizzas/{pizza_type_id}
pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Message>> {
    pizza_repo::delete_pizza_type(&state.pool, &id).await?;
    info!(pizza_type_id = %id, "Deleted pizza type");
    Ok(Message::new("Pizza type deleted successfully"))
}

/// POST /pizzas/{pizza_type_id}/toppings
pub async fn link_topping(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Payload(dto): Payload<LinkToppingDto>,
) -> ApiResult<(StatusCode, Json<PizzaTopping>)> {
    let link = link_repo::link_topping(&state.pool, &id, &dto.topping_id).await?;
    info!(pizza_type_id = %id, topping_id = %dto.topping_id, "Linked topping");
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /pizzas/{pizza_type_id}/toppings - topping names only
pub async fn list_toppings(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<String>>> {
    let names = link_repo::list_topping_names(&state.pool, &id).await?;
    Ok(Json(names))
}
