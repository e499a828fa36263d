//! Closed-form Kinematics
//!
//! Constant-acceleration motion along one axis. Every function validates its
//! inputs and returns a [`PhysicsError`] instead of a number when a
//! precondition is violated.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::quantity::{Acceleration, Distance, Duration, Quantity, Speed};

/// Axis a calculation is performed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSystemAxis {
    /// Direction of travel: speed is non-negative and never reverses
    Longitudinal,
    /// Perpendicular to travel: speed is signed and may change sign
    Lateral,
}

/// Point in time at which a distance is covered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Arrival {
    /// Covered after the given time
    After(Duration),
    /// The vehicle comes to a stop before covering the distance
    Never,
}

impl Arrival {
    /// Arrival time, if the distance is ever covered
    pub fn duration(self) -> Option<Duration> {
        match self {
            Arrival::After(duration) => Some(duration),
            Arrival::Never => None,
        }
    }

    /// Strictly earlier than `other`. `Never` is earlier than nothing.
    pub fn is_before(self, other: Arrival) -> bool {
        match (self, other) {
            (Arrival::After(a), Arrival::After(b)) => a < b,
            (Arrival::After(_), Arrival::Never) => true,
            (Arrival::Never, _) => false,
        }
    }
}

fn ensure_valid<Q: Quantity>(field: &'static str, quantity: Q) -> Result<(), PhysicsError> {
    if quantity.is_valid() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidInput {
            field,
            kind: Q::KIND,
            value: quantity.value(),
        })
    }
}

fn ensure_deceleration(deceleration: Acceleration) -> Result<(), PhysicsError> {
    ensure_valid("deceleration", deceleration)?;
    if deceleration.value() < Acceleration::PRECISION {
        return Err(PhysicsError::InvalidDeceleration {
            value: deceleration.value(),
            min: Acceleration::PRECISION,
        });
    }
    Ok(())
}

/// Validate a speed for the axis and return its raw value.
/// Longitudinal speeds within precision of zero are snapped to zero.
fn axis_speed(axis: CoordinateSystemAxis, speed: Speed) -> Result<f64, PhysicsError> {
    ensure_valid("current_speed", speed)?;
    match axis {
        CoordinateSystemAxis::Longitudinal => {
            if speed < Speed::ZERO {
                return Err(PhysicsError::NegativeLongitudinalSpeed(speed.value()));
            }
            Ok(speed.value().max(0.0))
        }
        CoordinateSystemAxis::Lateral => Ok(speed.value()),
    }
}

fn checked<Q: Quantity>(quantity: Q) -> Result<Q, PhysicsError> {
    if quantity.is_valid() {
        Ok(quantity)
    } else {
        Err(PhysicsError::ResultOutOfRange {
            kind: Q::KIND,
            value: quantity.value(),
        })
    }
}

/// Distance needed to reach zero speed under constant `deceleration`.
///
/// `deceleration` is a positive magnitude. The sign of the result equals the
/// sign of `current_speed`.
pub fn stopping_distance(
    current_speed: Speed,
    deceleration: Acceleration,
) -> Result<Distance, PhysicsError> {
    ensure_valid("current_speed", current_speed)?;
    ensure_deceleration(deceleration)?;

    let speed = current_speed.value();
    let magnitude = speed * speed / (2.0 * deceleration.value());
    let distance = if speed < 0.0 { -magnitude } else { magnitude };
    checked(Distance::new(distance))
}

/// Speed after keeping `acceleration` for `response_time`.
///
/// Longitudinally the result is clamped at zero: a vehicle braking to a
/// stop does not start reversing. Laterally the sign may flip.
pub fn speed_after_response_time(
    axis: CoordinateSystemAxis,
    current_speed: Speed,
    acceleration: Acceleration,
    response_time: Duration,
) -> Result<Speed, PhysicsError> {
    let speed = axis_speed(axis, current_speed)?;
    ensure_valid("acceleration", acceleration)?;
    ensure_valid("response_time", response_time)?;

    let resulting = speed + acceleration.value() * response_time.value();
    let resulting = match axis {
        CoordinateSystemAxis::Longitudinal => resulting.max(0.0),
        CoordinateSystemAxis::Lateral => resulting,
    };
    checked(Speed::new(resulting))
}

/// Displacement after keeping `acceleration` for `response_time`.
///
/// Longitudinally decelerating, the motion ends when the vehicle stops, so
/// the offset never exceeds the stopping distance and is never negative.
/// Laterally the offset is signed:
/// `position_after = offset + position_before`.
pub fn distance_offset_after_response_time(
    axis: CoordinateSystemAxis,
    current_speed: Speed,
    acceleration: Acceleration,
    response_time: Duration,
) -> Result<Distance, PhysicsError> {
    let speed = axis_speed(axis, current_speed)?;
    ensure_valid("acceleration", acceleration)?;
    ensure_valid("response_time", response_time)?;

    let acceleration = acceleration.value();
    let mut duration = response_time.value();
    if axis == CoordinateSystemAxis::Longitudinal && acceleration < 0.0 {
        duration = duration.min(speed / -acceleration);
    }

    checked(Distance::new(
        speed * duration + 0.5 * acceleration * duration * duration,
    ))
}

/// Time to travel `distance` from `speed` under constant `acceleration`,
/// or `None` if the motion stops short of it.
fn time_for_distance(speed: f64, acceleration: f64, distance: f64) -> Option<f64> {
    if acceleration.abs() < Acceleration::PRECISION {
        return if speed > 0.0 {
            Some(distance / speed)
        } else {
            None
        };
    }

    let discriminant = speed * speed + 2.0 * acceleration * distance;
    let tolerance = 2.0 * acceleration.abs() * Distance::PRECISION;
    if discriminant < -tolerance {
        return None;
    }

    let root = discriminant.max(0.0).sqrt();
    Some(((root - speed) / acceleration).max(0.0))
}

/// Time needed to cover `distance_to_cover` longitudinally.
///
/// The vehicle keeps `acceleration` for `response_time`, then brakes with
/// the positive `deceleration` until standstill. If it stops before covering
/// the distance the result is [`Arrival::Never`], which is a regular
/// outcome and not an error.
pub fn time_to_cover_distance(
    current_speed: Speed,
    response_time: Duration,
    acceleration: Acceleration,
    deceleration: Acceleration,
    distance_to_cover: Distance,
) -> Result<Arrival, PhysicsError> {
    let axis = CoordinateSystemAxis::Longitudinal;
    let speed = axis_speed(axis, current_speed)?;
    ensure_valid("response_time", response_time)?;
    ensure_valid("acceleration", acceleration)?;
    ensure_deceleration(deceleration)?;
    ensure_valid("distance_to_cover", distance_to_cover)?;

    if distance_to_cover < Distance::ZERO {
        return Err(PhysicsError::NegativeDistance(distance_to_cover.value()));
    }
    if distance_to_cover.is_zero() {
        return Ok(Arrival::After(Duration::ZERO));
    }

    // covered while still reacting
    let offset = distance_offset_after_response_time(axis, current_speed, acceleration, response_time)?;
    if offset >= distance_to_cover {
        return match time_for_distance(speed, acceleration.value(), distance_to_cover.value()) {
            Some(time) => checked(Duration::new(time)).map(Arrival::After),
            None => Ok(Arrival::Never),
        };
    }

    let speed_after = speed_after_response_time(axis, current_speed, acceleration, response_time)?;
    let remaining = distance_to_cover - offset;
    if stopping_distance(speed_after, deceleration)? < remaining {
        return Ok(Arrival::Never);
    }

    match time_for_distance(speed_after.value(), -deceleration.value(), remaining.value()) {
        Some(time) => checked(Duration::new(response_time.value() + time)).map(Arrival::After),
        None => Ok(Arrival::Never),
    }
}
