//! Error responses for the meal API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const INCOMPLETE_DATA: &str = "Incomplete data";
pub const MEAL_TYPE_EXISTS: &str = "A meal with this mealType exists already";
pub const NO_SUCH_FOOD_ITEM: &str = "There does not exists such food item";
pub const NO_SUCH_FOOD_GROUP: &str = "You do not have any document with the provided Data";
pub const STORE_FAILURE: &str = "We are facing some issue, please try again later";

#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field is missing or empty, or the body is not the expected JSON
    #[error("Incomplete data")]
    InvalidInput,

    /// A meal with the requested `mealType` already exists
    #[error("A meal with this mealType exists already")]
    Conflict,

    /// The referenced meal, food group, or food item does not exist
    #[error("{0}")]
    NotFound(&'static str),

    #[error("store failure: {0}")]
    StoreFailure(#[from] sqlx::Error),
}

/// Body of every error response
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::Conflict | ApiError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidInput => INCOMPLETE_DATA,
            ApiError::Conflict => MEAL_TYPE_EXISTS,
            ApiError::NotFound(message) => message,
            ApiError::StoreFailure(_) => STORE_FAILURE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StoreFailure(e) => tracing::error!("Store operation failed: {}", e),
            other => tracing::debug!("Rejected request: {}", other),
        }

        (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(ApiError::InvalidInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound(NO_SUCH_FOOD_ITEM).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), STORE_FAILURE);
        // The detail is kept for logging only
        assert!(err.to_string().starts_with("store failure"));
    }

    #[test]
    fn test_display_matches_response_message() {
        assert_eq!(ApiError::InvalidInput.to_string(), INCOMPLETE_DATA);
        assert_eq!(ApiError::Conflict.to_string(), MEAL_TYPE_EXISTS);
        assert_eq!(
            ApiError::NotFound(NO_SUCH_FOOD_GROUP).to_string(),
            NO_SUCH_FOOD_GROUP
        );
    }
}
