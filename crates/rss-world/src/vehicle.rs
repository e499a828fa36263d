//! Vehicle kinematic snapshot

use rss_physics::{Acceleration, Distance, Duration, Quantity, Speed};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dynamics::Dynamics;
use crate::error::{require, WorldError};

/// Velocity split into the two axes of the ego road frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Speed along the direction of travel, never negative
    pub speed_lon: Speed,
    /// Lateral speed, positive to the right
    pub speed_lat: Speed,
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Velocity(speed_lon:{},speed_lat:{})", self.speed_lon, self.speed_lat)
    }
}

/// Kinematic snapshot of one road user for one evaluation cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub velocity: Velocity,
    pub dynamics: Dynamics,
    /// Delay before the vehicle starts its response
    pub response_time: Duration,
    /// Currently measured longitudinal acceleration (negative when braking)
    pub acceleration_lon: Acceleration,
    /// Vehicle holds right of way
    pub has_priority: bool,
    /// Vehicle drives in its correct lane
    pub is_in_correct_lane: bool,
    /// Distance to the entry of the intersection conflict area
    pub distance_to_enter_intersection: Distance,
    /// Distance to the exit of the intersection conflict area
    pub distance_to_leave_intersection: Distance,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            velocity: Velocity::default(),
            dynamics: Dynamics::default(),
            response_time: Duration::new(1.0),
            acceleration_lon: Acceleration::ZERO,
            has_priority: false,
            is_in_correct_lane: true,
            distance_to_enter_intersection: Distance::ZERO,
            distance_to_leave_intersection: Distance::ZERO,
        }
    }
}

impl VehicleState {
    /// Validate all quantities and their cross-field constraints
    pub fn validate(&self) -> Result<(), WorldError> {
        let speed_lon = self.velocity.speed_lon;
        require(
            speed_lon.is_valid() && speed_lon >= Speed::ZERO,
            "velocity.speed_lon",
            speed_lon.value(),
            "must be a finite, non-negative speed",
        )?;
        require(
            self.velocity.speed_lat.is_valid(),
            "velocity.speed_lat",
            self.velocity.speed_lat.value(),
            "must be a finite speed within range",
        )?;
        require(
            self.response_time.is_valid(),
            "response_time",
            self.response_time.value(),
            "must be a finite, non-negative duration",
        )?;
        require(
            self.acceleration_lon.is_valid(),
            "acceleration_lon",
            self.acceleration_lon.value(),
            "must be a finite acceleration within range",
        )?;
        self.dynamics.validate()?;

        let alpha = self.dynamics.alpha_lon;
        require(
            self.acceleration_lon >= -alpha.brake_max && self.acceleration_lon <= alpha.accel_max,
            "acceleration_lon",
            self.acceleration_lon.value(),
            "must lie within -brake_max and accel_max",
        )?;

        let enter = self.distance_to_enter_intersection;
        let leave = self.distance_to_leave_intersection;
        require(
            enter.is_valid() && enter >= Distance::ZERO,
            "distance_to_enter_intersection",
            enter.value(),
            "must be a finite, non-negative distance",
        )?;
        require(
            leave.is_valid() && leave >= enter,
            "distance_to_leave_intersection",
            leave.value(),
            "must not be below distance_to_enter_intersection",
        )
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VehicleState(velocity:{},dynamics:{},response_time:{},acceleration_lon:{},has_priority:{},\
             is_in_correct_lane:{},distance_to_enter_intersection:{},distance_to_leave_intersection:{})",
            self.velocity,
            self.dynamics,
            self.response_time,
            self.acceleration_lon,
            self.has_priority,
            self.is_in_correct_lane,
            self.distance_to_enter_intersection,
            self.distance_to_leave_intersection
        )
    }
}
