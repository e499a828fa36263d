//! RSS Physics
//!
//! Physical quantity types and the closed-form kinematics every
//! responsibility-sensitive safety check is built on:
//! - Distance, Speed, Acceleration and Duration with precision-aware comparison
//! - Stopping distance under constant deceleration
//! - Speed and distance offset after a response time
//! - Time to cover a distance under an accelerate-then-brake profile

mod error;
mod kinematics;
mod quantity;

pub use error::PhysicsError;
pub use kinematics::{
    distance_offset_after_response_time, speed_after_response_time, stopping_distance,
    time_to_cover_distance, Arrival, CoordinateSystemAxis,
};
pub use quantity::{Acceleration, Distance, Duration, Quantity, Speed};
