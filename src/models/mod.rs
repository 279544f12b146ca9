//! Core data models for the pool grader.

mod analysis;
mod card;
mod color;
mod cost;
mod grade;
mod ids;
mod pool;
mod synergy;

pub use analysis::*;
pub use card::*;
pub use color::*;
pub use cost::*;
pub use grade::*;
pub use ids::*;
pub use pool::*;
pub use synergy::*;
