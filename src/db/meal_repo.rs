use sqlx::SqlitePool;

use crate::models::{FoodGroup, Meal};

/// Handle to the `meal` collection.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

/// Meals joined with their groups and items, one row per item.
///
/// A group without items yields one row with `name` NULL; a meal without
/// groups yields one row with `group_id` NULL.
const MEAL_DOCUMENTS: &str = r#"
    SELECT m.id, m.meal_type, fg.id AS group_id, fi.name
    FROM meals m
    LEFT JOIN food_groups fg ON fg.meal_id = m.id
    LEFT JOIN food_items fi ON fi.group_id = fg.id
"#;

const MEAL_DOCUMENT_ORDER: &str = "ORDER BY m.rowid, fg.position, fi.position";

#[derive(sqlx::FromRow)]
struct MealDocumentRow {
    id: String,
    meal_type: String,
    group_id: Option<String>,
    name: Option<String>,
}

impl MealRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Persists a meal with all of its food groups in a single transaction.
    pub async fn create(&self, meal: &Meal) -> Result<Meal, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO meals (id, meal_type) VALUES (?, ?)")
            .bind(&meal.id)
            .bind(&meal.meal_type)
            .execute(&mut *tx)
            .await?;

        for (group_position, group) in meal.foods.iter().enumerate() {
            sqlx::query("INSERT INTO food_groups (id, meal_id, position) VALUES (?, ?, ?)")
                .bind(&group.id)
                .bind(&meal.id)
                .bind(group_position as i64)
                .execute(&mut *tx)
                .await?;

            for (item_position, item) in group.food.iter().enumerate() {
                sqlx::query("INSERT INTO food_items (group_id, position, name) VALUES (?, ?, ?)")
                    .bind(&group.id)
                    .bind(item_position as i64)
                    .bind(item)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(meal.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Meal>, sqlx::Error> {
        let query = format!("{MEAL_DOCUMENTS} WHERE m.id = ? {MEAL_DOCUMENT_ORDER}");
        let rows: Vec<MealDocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(assemble_meals(rows).pop())
    }

    /// Whether a meal with this exact (case-sensitive) type exists.
    pub async fn meal_type_exists(&self, meal_type: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM meals WHERE meal_type = ?)")
            .bind(meal_type)
            .fetch_one(&self.pool)
            .await
    }

    /// Lists every meal in insertion order.
    pub async fn list(&self) -> Result<Vec<Meal>, sqlx::Error> {
        let query = format!("{MEAL_DOCUMENTS} {MEAL_DOCUMENT_ORDER}");
        let rows: Vec<MealDocumentRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        Ok(assemble_meals(rows))
    }

    pub async fn list_by_meal_type(&self, meal_type: &str) -> Result<Vec<Meal>, sqlx::Error> {
        let query = format!("{MEAL_DOCUMENTS} WHERE m.meal_type = ? {MEAL_DOCUMENT_ORDER}");
        let rows: Vec<MealDocumentRow> = sqlx::query_as(&query)
            .bind(meal_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(assemble_meals(rows))
    }

    /// Whether `item` appears in any food group of the meal.
    pub async fn contains_food_item(&self, meal_id: &str, item: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM food_items fi
                JOIN food_groups fg ON fi.group_id = fg.id
                WHERE fg.meal_id = ? AND fi.name = ?
            )
            "#,
        )
        .bind(meal_id)
        .bind(item)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn contains_food_group(
        &self,
        meal_id: &str,
        group_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM food_groups WHERE meal_id = ? AND id = ?)",
        )
        .bind(meal_id)
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Replaces every item equal to `old_value` inside one food group of a meal.
    ///
    /// Returns the number of items rewritten; zero when the group does not
    /// belong to the meal or holds no such item.
    pub async fn rename_food_item(
        &self,
        meal_id: &str,
        group_id: &str,
        old_value: &str,
        new_value: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE food_items
            SET name = ?
            WHERE group_id = ?
              AND name = ?
              AND group_id IN (SELECT id FROM food_groups WHERE meal_id = ?)
            "#,
        )
        .bind(new_value)
        .bind(group_id)
        .bind(old_value)
        .bind(meal_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Removes a food group from a meal. CASCADE drops its items.
    pub async fn remove_food_group(&self, meal_id: &str, group_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM food_groups WHERE meal_id = ? AND id = ?")
            .bind(meal_id)
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Folds joined rows, already ordered by meal, group and item, into meals.
fn assemble_meals(rows: Vec<MealDocumentRow>) -> Vec<Meal> {
    let mut meals: Vec<Meal> = Vec::new();

    for row in rows {
        if meals.last().map_or(true, |meal| meal.id != row.id) {
            meals.push(Meal {
                id: row.id,
                meal_type: row.meal_type,
                foods: Vec::new(),
            });
        }
        let (Some(meal), Some(group_id)) = (meals.last_mut(), row.group_id) else {
            continue;
        };

        if meal.foods.last().map_or(true, |group| group.id != group_id) {
            meal.foods.push(FoodGroup {
                id: group_id,
                food: Vec::new(),
            });
        }
        if let (Some(group), Some(name)) = (meal.foods.last_mut(), row.name) {
            group.food.push(name);
        }
    }

    meals
}
