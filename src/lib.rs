//! # Pool Grader
//!
//! Grades a draft/sealed card pool against the ten two-color archetypes.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (grades, colors, costs, cards, analysis results)
//! - **catalog**: Rankings table loading and card name lookup
//! - **ingest**: Pool list parsing and resolution
//! - **calculate**: Archetype scoring, splash detection and synergies
//! - **session**: One analyzed pool plus the selected archetype
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod catalog;
pub mod config;
pub mod ingest;
pub mod models;
pub mod session;

pub use models::*;
