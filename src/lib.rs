//! Eating Routine
//!
//! A small HTTP backend that keeps a collection of meals. Each meal has a
//! `mealType` label and an ordered list of food groups, each holding an
//! ordered list of food item names.
//!
//! # Endpoints
//!
//! - `POST /api/create`: Create a meal
//! - `PATCH /api/update/{updateValue}`: Rename a food item inside a food group
//! - `DELETE /api/delete/{id}`: Remove a food group from a meal
//! - `GET /api/getAll`: List every meal
//! - `GET /api/{mealType}`: List meals with the given type
//! - `GET /health`: Health check

pub mod config;
pub mod db;
pub mod models;
pub mod server;
