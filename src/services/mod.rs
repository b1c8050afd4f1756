pub mod assistant;
pub mod catalog;
pub mod geocoding;
pub mod geometry;
pub mod llm;
pub mod map_view;
pub mod meal_slots;
pub mod narration;
pub mod pricing;
pub mod prompt;
pub mod tour_generator;
pub mod validation;
