pub mod analyze;
pub mod cards;
