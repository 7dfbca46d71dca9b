//! Homescore - property comparison service for house hunting
//!
//! This library scores rated properties against weighted must-have and
//! nice-to-have criteria, ranks them into tiers, and resolves addresses to
//! coordinates through a cached, rate-limited geocoder.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    build_report, compute_score, haversine_distance, Report, ReportSort, ReportView,
};
pub use models::{Coordinates, Criterion, Property, PropertyScore, Rating, RatingScore, Tier};
pub use services::{GeocodeError, Geocoder};
