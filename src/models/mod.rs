mod meal;

pub use meal::{FoodGroup, Meal};
