//! HTTP surface of the meal API.

pub mod error;
pub mod handlers;
pub mod requests;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::db::MealRepository;

pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub meals: MealRepository,
}

impl AppState {
    pub fn new(meals: MealRepository) -> Self {
        Self { meals }
    }
}

/// Builds the router. Static `/api/...` routes take priority over `/api/{meal_type}`.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/create",
            post(handlers::create_meal).get(handlers::list_create_meals),
        )
        .route("/update/{update_value}", patch(handlers::rename_food_item))
        .route("/delete/{id}", delete(handlers::remove_food_group))
        .route("/getAll", get(handlers::list_meals))
        .route("/{meal_type}", get(handlers::list_meals_by_type));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
