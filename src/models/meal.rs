use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered list of food item names, owned by exactly one meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodGroup {
    #[serde(rename = "_id")]
    pub id: String,
    pub food: Vec<String>,
}

impl FoodGroup {
    pub fn new(food: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            food,
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.food.iter().any(|f| f == item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "mealType")]
    pub meal_type: String,
    pub foods: Vec<FoodGroup>,
}

impl Meal {
    pub fn new(meal_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            meal_type: meal_type.into(),
            foods: Vec::new(),
        }
    }

    /// Attaches food groups built from plain item lists, assigning each a fresh id.
    pub fn with_foods<I>(mut self, foods: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        self.foods = foods.into_iter().map(FoodGroup::new).collect();
        self
    }

    pub fn food_group(&self, id: &str) -> Option<&FoodGroup> {
        self.foods.iter().find(|g| g.id == id)
    }
}
