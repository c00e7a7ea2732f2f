//! Request payloads and their validation.
//!
//! Payload fields are all optional so that a missing field surfaces as
//! [`ApiError::InvalidInput`] instead of a deserialization rejection. Each
//! payload validates into a command type whose fields are guaranteed present
//! and non-empty.
//!
//! Bodies are read by [`Payload`], which accepts both JSON and
//! `application/x-www-form-urlencoded`. Form bodies are flat, so the nested
//! `foods` list of a create request can only be sent as JSON.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use super::error::ApiError;
use crate::models::Meal;

/// Request body decoded as a form when the content type says so, JSON otherwise.
///
/// Any rejection becomes [`ApiError::InvalidInput`].
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let decoded = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|e| e.to_string())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|e| e.to_string())
        };

        decoded.map(Payload).map_err(|e| {
            tracing::debug!("Unreadable request body: {}", e);
            ApiError::InvalidInput
        })
    }
}

/// A food group as submitted by the client: `{"food": ["...", ...]}`
#[derive(Debug, Deserialize)]
pub struct FoodGroupPayload {
    #[serde(default)]
    pub food: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMealPayload {
    #[serde(rename = "mealType")]
    pub meal_type: Option<String>,
    pub foods: Option<Vec<FoodGroupPayload>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenameFoodItemPayload {
    #[serde(rename = "mealId")]
    pub meal_id: Option<String>,
    #[serde(rename = "foodsId")]
    pub foods_id: Option<String>,
    #[serde(rename = "oldValue")]
    pub old_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoveFoodGroupPayload {
    #[serde(rename = "mealId")]
    pub meal_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMeal {
    pub meal_type: String,
    pub foods: Vec<Vec<String>>,
}

impl CreateMeal {
    pub fn validate(payload: CreateMealPayload) -> Result<Self, ApiError> {
        let meal_type = required(payload.meal_type)?;
        let foods = payload
            .foods
            .filter(|foods| !foods.is_empty())
            .ok_or(ApiError::InvalidInput)?;

        Ok(Self {
            meal_type,
            foods: foods.into_iter().map(|group| group.food).collect(),
        })
    }

    /// Builds the meal to persist, assigning fresh ids to it and its food groups.
    pub fn into_meal(self) -> Meal {
        Meal::new(self.meal_type).with_foods(self.foods)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFoodItem {
    pub meal_id: String,
    pub foods_id: String,
    pub old_value: String,
    pub update_value: String,
}

impl RenameFoodItem {
    pub fn validate(update_value: String, payload: RenameFoodItemPayload) -> Result<Self, ApiError> {
        Ok(Self {
            meal_id: required(payload.meal_id)?,
            foods_id: required(payload.foods_id)?,
            old_value: required(payload.old_value)?,
            update_value: required(Some(update_value))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFoodGroup {
    pub meal_id: String,
    pub food_group_id: String,
}

impl RemoveFoodGroup {
    pub fn validate(food_group_id: String, payload: RemoveFoodGroupPayload) -> Result<Self, ApiError> {
        Ok(Self {
            meal_id: required(payload.meal_id)?,
            food_group_id: required(Some(food_group_id))?,
        })
    }
}

/// Rejects absent and empty values.
pub fn required(value: Option<String>) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(json: &str) -> CreateMealPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_create_meal_valid() {
        let payload = create_payload(
            r#"{"mealType": "Lunch", "foods": [{"food": ["one", "two"]}, {"food": ["three"]}]}"#,
        );

        let cmd = CreateMeal::validate(payload).unwrap();
        assert_eq!(cmd.meal_type, "Lunch");
        assert_eq!(cmd.foods, vec![vec!["one", "two"], vec!["three"]]);

        let meal = cmd.into_meal();
        assert_eq!(meal.foods.len(), 2);
        assert_eq!(meal.foods[1].food, vec!["three"]);
    }

    #[test]
    fn test_create_meal_rejects_missing_or_empty_fields() {
        for json in [
            r#"{}"#,
            r#"{"foods": [{"food": ["one"]}]}"#,
            r#"{"mealType": "", "foods": [{"food": ["one"]}]}"#,
            r#"{"mealType": "Lunch"}"#,
            r#"{"mealType": "Lunch", "foods": null}"#,
            r#"{"mealType": "Lunch", "foods": []}"#,
        ] {
            let result = CreateMeal::validate(create_payload(json));
            assert!(matches!(result, Err(ApiError::InvalidInput)), "{}", json);
        }
    }

    #[test]
    fn test_food_group_without_items_is_empty() {
        let payload = create_payload(r#"{"mealType": "Snack", "foods": [{}]}"#);

        let cmd = CreateMeal::validate(payload).unwrap();
        assert_eq!(cmd.foods, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_rename_food_item_requires_every_field() {
        let payload: RenameFoodItemPayload =
            serde_json::from_str(r#"{"mealId": "m", "foodsId": "g", "oldValue": "two"}"#).unwrap();
        let cmd = RenameFoodItem::validate("deux".into(), payload).unwrap();
        assert_eq!(cmd.old_value, "two");
        assert_eq!(cmd.update_value, "deux");

        let payload: RenameFoodItemPayload =
            serde_json::from_str(r#"{"mealId": "m", "oldValue": "two"}"#).unwrap();
        assert!(RenameFoodItem::validate("deux".into(), payload).is_err());

        let payload: RenameFoodItemPayload =
            serde_json::from_str(r#"{"mealId": "m", "foodsId": "g", "oldValue": "two"}"#).unwrap();
        assert!(RenameFoodItem::validate(String::new(), payload).is_err());
    }

    #[test]
    fn test_remove_food_group_requires_meal_id() {
        let payload: RemoveFoodGroupPayload = serde_json::from_str(r#"{"mealId": "m"}"#).unwrap();
        let cmd = RemoveFoodGroup::validate("g".into(), payload).unwrap();
        assert_eq!(cmd.meal_id, "m");
        assert_eq!(cmd.food_group_id, "g");

        let payload: RemoveFoodGroupPayload = serde_json::from_str(r#"{"mealId": ""}"#).unwrap();
        assert!(RemoveFoodGroup::validate("g".into(), payload).is_err());
    }
}
