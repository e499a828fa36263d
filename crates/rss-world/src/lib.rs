//! RSS World Model
//!
//! Inputs of a safety check, produced fresh every cycle by the situation
//! extraction stage and never mutated afterwards:
//! - Per-vehicle acceleration limits (dynamics)
//! - Vehicle kinematic snapshot (vehicle state)
//! - Relative position and situation type of an ego/object pair

mod dynamics;
mod error;
mod situation;
mod vehicle;

pub use dynamics::{Dynamics, LateralAccelerationValues, LongitudinalAccelerationValues};
pub use error::WorldError;
pub use situation::{
    LateralRelativePosition, LongitudinalRelativePosition, ObjectId, RelativePosition, Situation,
    SituationId, SituationType,
};
pub use vehicle::{VehicleState, Velocity};
