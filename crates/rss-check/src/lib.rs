//! RSS Check
//!
//! Responsibility-sensitive safety checks for one ego vehicle:
//! - Longitudinal safe distance (same and opposite direction)
//! - Intersection conflict areas
//! - Lateral safe distance
//! - Aggregation into one response per object and per cycle

pub mod aggregator;
pub mod checker;
pub mod config;
pub mod error;
pub mod intersection;
pub mod lateral;
pub mod longitudinal;

pub use aggregator::{evaluate, resolve_proper_response, select};
pub use checker::RssChecker;
pub use config::RssConfig;
pub use error::{RssError, RssResult};
pub use intersection::check_intersection;
pub use lateral::{check_lateral, safe_lateral_distance};
pub use longitudinal::{
    check_opposite_direction, check_same_direction, safe_distance_opposite_direction,
    safe_distance_same_direction, stated_braking_offset,
};
