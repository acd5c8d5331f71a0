// verdant/app/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod plant_row;

pub use plant_row::{PlantRow, PLANT_COLUMNS};
