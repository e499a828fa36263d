//! Vehicle dynamics limits

use rss_physics::{Acceleration, Distance, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{require, WorldError};

/// Longitudinal acceleration limits (all magnitudes in m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalAccelerationValues {
    /// Maximum acceleration during the response time
    pub accel_max: Acceleration,
    /// Maximum braking the vehicle is capable of
    pub brake_max: Acceleration,
    /// Minimum braking the vehicle applies when responding
    pub brake_min: Acceleration,
    /// Minimum braking when driving in the correct lane against oncoming traffic
    pub brake_min_correct: Acceleration,
}

impl Default for LongitudinalAccelerationValues {
    fn default() -> Self {
        Self {
            accel_max: Acceleration::new(3.5),
            brake_max: Acceleration::new(8.0),
            brake_min: Acceleration::new(4.0),
            brake_min_correct: Acceleration::new(3.0),
        }
    }
}

impl LongitudinalAccelerationValues {
    /// Check `accel_max >= 0` and `brake_max >= brake_min >= brake_min_correct > 0`
    pub fn validate(&self) -> Result<(), WorldError> {
        check_acceleration("alpha_lon.accel_max", self.accel_max)?;
        check_acceleration("alpha_lon.brake_max", self.brake_max)?;
        check_acceleration("alpha_lon.brake_min", self.brake_min)?;
        check_acceleration("alpha_lon.brake_min_correct", self.brake_min_correct)?;

        require(
            self.accel_max >= Acceleration::ZERO,
            "alpha_lon.accel_max",
            self.accel_max.value(),
            "must not be negative",
        )?;
        require(
            self.brake_min_correct > Acceleration::ZERO,
            "alpha_lon.brake_min_correct",
            self.brake_min_correct.value(),
            "must be positive",
        )?;
        require(
            self.brake_min >= self.brake_min_correct,
            "alpha_lon.brake_min",
            self.brake_min.value(),
            "must not be below brake_min_correct",
        )?;
        require(
            self.brake_max >= self.brake_min,
            "alpha_lon.brake_max",
            self.brake_max.value(),
            "must not be below brake_min",
        )
    }
}

impl fmt::Display for LongitudinalAccelerationValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LongitudinalAccelerationValues(accel_max:{},brake_max:{},brake_min:{},brake_min_correct:{})",
            self.accel_max, self.brake_max, self.brake_min, self.brake_min_correct
        )
    }
}

/// Lateral acceleration limits (magnitudes in m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralAccelerationValues {
    /// Maximum lateral acceleration during the response time
    pub accel_max: Acceleration,
    /// Minimum lateral braking when responding
    pub brake_min: Acceleration,
}

impl Default for LateralAccelerationValues {
    fn default() -> Self {
        Self {
            accel_max: Acceleration::new(0.2),
            brake_min: Acceleration::new(0.8),
        }
    }
}

impl LateralAccelerationValues {
    /// Check `accel_max >= 0` and `brake_min > 0`
    pub fn validate(&self) -> Result<(), WorldError> {
        check_acceleration("alpha_lat.accel_max", self.accel_max)?;
        check_acceleration("alpha_lat.brake_min", self.brake_min)?;

        require(
            self.accel_max >= Acceleration::ZERO,
            "alpha_lat.accel_max",
            self.accel_max.value(),
            "must not be negative",
        )?;
        require(
            self.brake_min > Acceleration::ZERO,
            "alpha_lat.brake_min",
            self.brake_min.value(),
            "must be positive",
        )
    }
}

impl fmt::Display for LateralAccelerationValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LateralAccelerationValues(accel_max:{},brake_min:{})",
            self.accel_max, self.brake_min
        )
    }
}

/// Per-vehicle dynamics limits, supplied by the embedding application
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    /// Longitudinal limits
    pub alpha_lon: LongitudinalAccelerationValues,
    /// Lateral limits
    pub alpha_lat: LateralAccelerationValues,
    /// Lateral margin covering small lateral fluctuations (m)
    pub lateral_fluctuation_margin: Distance,
}

impl Dynamics {
    /// Validate both axes and the fluctuation margin
    pub fn validate(&self) -> Result<(), WorldError> {
        self.alpha_lon.validate()?;
        self.alpha_lat.validate()?;

        let margin = self.lateral_fluctuation_margin;
        require(
            margin.is_valid() && margin >= Distance::ZERO,
            "lateral_fluctuation_margin",
            margin.value(),
            "must be a finite, non-negative distance",
        )
    }
}

impl fmt::Display for Dynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dynamics(alpha_lon:{},alpha_lat:{},lateral_fluctuation_margin:{})",
            self.alpha_lon, self.alpha_lat, self.lateral_fluctuation_margin
        )
    }
}

fn check_acceleration(field: &'static str, value: Acceleration) -> Result<(), WorldError> {
    require(
        value.is_valid(),
        field,
        value.value(),
        "must be a finite acceleration within range",
    )
}
