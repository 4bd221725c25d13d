use axum::{
    extract::{Path, State},
    Json,
};
use db::models::{Beverage, BeverageChanges, NewBeverage};
use db::repository::beverages as beverage_repo;
use tracing::info;

use super::Message;
use crate::{error::ApiResult, extract::Payload, AppState};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Beverage>>> {
    let beverages = beverage_repo::list_beverages(&state.pool).await?;
    Ok(Json(beverages))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewBeverage>,
) -> ApiResult<Json<Beverage>> {
    let beverage = beverage_repo::create_beverage(&state.pool, new).await?;
    info!(beverage_id = %beverage.beverage_id, "Created beverage");
    Ok(Json(beverage))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Payload(changes): Payload<BeverageChanges>,
) -> ApiResult<Json<Beverage>> {
    let beverage = beverage_repo::update_beverage(&state.pool, &id, changes).await?;
    info!(beverage_id = %id, "Updated beverage");
    Ok(Json(beverage))
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Message>> {
    beverage_repo::delete_beverage(&state.pool, &id).await?;
    info!(beverage_id = %id, "Deleted beverage");
    Ok(Message::new("Beverage deleted successfully"))
}
