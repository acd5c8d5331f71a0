// verdant/app/src/web/handlers/mod.rs

// Declare handler modules
pub mod plant_handlers;
