//! HTTP handlers for the meal API.
//!
//! Every mutating handler follows the same shape: validate the request,
//! run one precondition read, then issue a single store operation. The
//! precondition read and the write are not atomic.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::error::{ApiError, NO_SUCH_FOOD_GROUP, NO_SUCH_FOOD_ITEM};
use super::requests::{
    required, CreateMeal, CreateMealPayload, Payload, RemoveFoodGroup, RemoveFoodGroupPayload,
    RenameFoodItem, RenameFoodItemPayload,
};
use super::AppState;
use crate::models::Meal;

pub const SUCCESS: &str = "Success";

/// Successful response wrapper: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/create`
pub async fn create_meal(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateMealPayload>,
) -> Result<Json<DataResponse<Meal>>, ApiError> {
    let cmd = CreateMeal::validate(payload)?;

    if state.meals.meal_type_exists(&cmd.meal_type).await? {
        return Err(ApiError::Conflict);
    }

    let meal = state.meals.create(&cmd.into_meal()).await?;
    tracing::info!("Created meal {} ({})", meal.id, meal.meal_type);

    Ok(Json(DataResponse { data: meal }))
}

/// `PATCH /api/update/{updateValue}`
///
/// The existence check looks for `oldValue` anywhere in the meal while the
/// rename only touches the group named by `foodsId`, so a request can pass
/// the check and still change nothing.
pub async fn rename_food_item(
    State(state): State<AppState>,
    Path(update_value): Path<String>,
    Payload(payload): Payload<RenameFoodItemPayload>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    let cmd = RenameFoodItem::validate(update_value, payload)?;

    if !state
        .meals
        .contains_food_item(&cmd.meal_id, &cmd.old_value)
        .await?
    {
        return Err(ApiError::NotFound(NO_SUCH_FOOD_ITEM));
    }

    let renamed = state
        .meals
        .rename_food_item(&cmd.meal_id, &cmd.foods_id, &cmd.old_value, &cmd.update_value)
        .await?;
    if renamed == 0 {
        tracing::debug!(
            "No '{}' in food group {} of meal {}; nothing renamed",
            cmd.old_value,
            cmd.foods_id,
            cmd.meal_id
        );
    }

    Ok(Json(DataResponse { data: SUCCESS }))
}

/// `DELETE /api/delete/{id}`
pub async fn remove_food_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<RemoveFoodGroupPayload>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    let cmd = RemoveFoodGroup::validate(id, payload)?;

    if !state
        .meals
        .contains_food_group(&cmd.meal_id, &cmd.food_group_id)
        .await?
    {
        return Err(ApiError::NotFound(NO_SUCH_FOOD_GROUP));
    }

    state
        .meals
        .remove_food_group(&cmd.meal_id, &cmd.food_group_id)
        .await?;

    Ok(Json(DataResponse { data: SUCCESS }))
}

/// `GET /api/getAll`
pub async fn list_meals(State(state): State<AppState>) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(state.meals.list().await?))
}

/// `GET /api/{mealType}`
pub async fn list_meals_by_type(
    State(state): State<AppState>,
    Path(meal_type): Path<String>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    let meal_type = required(Some(meal_type))?;

    Ok(Json(state.meals.list_by_meal_type(&meal_type).await?))
}

/// `GET /api/create`
///
/// The `/create` route shadows `/{mealType}`, so meals typed "create" are
/// listed from here.
pub async fn list_create_meals(State(state): State<AppState>) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(state.meals.list_by_meal_type("create").await?))
}
