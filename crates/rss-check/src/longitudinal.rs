//! Longitudinal Safety
//!
//! Safe distances for vehicles sharing a corridor:
//! - Same direction: the follower must be able to stop behind the leader
//! - Opposite direction: both vehicles brake towards each other
//!
//! An unsafe verdict is refined by what the ego vehicle is already doing.
//! A vehicle braking hard enough to keep the gap open is compliant, one that
//! cannot avoid closing the gap at the required braking escalates to
//! `BrakeMax`.

use rss_physics::{
    distance_offset_after_response_time, speed_after_response_time, stopping_distance,
    Acceleration, CoordinateSystemAxis, Distance, PhysicsError, Speed,
};
use rss_state::{LongitudinalResponse, LongitudinalRssState, ResponseEvaluator, ResponseInformation};
use rss_world::{LongitudinalRelativePosition, RelativePosition, Situation, VehicleState};

use crate::config::RssConfig;

/// Distance covered when accelerating with `accel_max` for the response
/// time and then braking with `brake` until standstill.
///
/// A vehicle at standstill keeps standing during its response time.
pub fn stated_braking_offset(
    vehicle: &VehicleState,
    brake: Acceleration,
) -> Result<Distance, PhysicsError> {
    let speed = vehicle.velocity.speed_lon;
    if speed.is_zero() {
        return Ok(Distance::ZERO);
    }

    let axis = CoordinateSystemAxis::Longitudinal;
    let accel_max = vehicle.dynamics.alpha_lon.accel_max;
    let offset = distance_offset_after_response_time(axis, speed, accel_max, vehicle.response_time)?;
    let speed_after = speed_after_response_time(axis, speed, accel_max, vehicle.response_time)?;
    Ok(offset + stopping_distance(speed_after, brake)?)
}

/// Minimum gap the `follower` has to keep behind the `leader`
pub fn safe_distance_same_direction(
    follower: &VehicleState,
    leader: &VehicleState,
    config: &RssConfig,
) -> Result<Distance, PhysicsError> {
    let follower_offset = stated_braking_offset(follower, follower.dynamics.alpha_lon.brake_min)?;
    let leader_stop = stopping_distance(
        leader.velocity.speed_lon,
        leader.dynamics.alpha_lon.brake_max,
    )?;
    Ok((follower_offset - leader_stop).max(config.min_longitudinal_distance))
}

/// Braking of the ego and the other vehicle in an opposite direction
/// situation. The vehicle in its correct lane brakes with `brake_min_correct`.
fn opposite_direction_brakes(ego: &VehicleState, other: &VehicleState) -> (Acceleration, Acceleration) {
    if ego.is_in_correct_lane {
        (ego.dynamics.alpha_lon.brake_min_correct, other.dynamics.alpha_lon.brake_min)
    } else {
        (ego.dynamics.alpha_lon.brake_min, other.dynamics.alpha_lon.brake_min_correct)
    }
}

/// Minimum gap between two vehicles approaching each other
pub fn safe_distance_opposite_direction(
    ego: &VehicleState,
    other: &VehicleState,
    config: &RssConfig,
) -> Result<Distance, PhysicsError> {
    let (ego_brake, other_brake) = opposite_direction_brakes(ego, other);
    let total = stated_braking_offset(ego, ego_brake)? + stated_braking_offset(other, other_brake)?;
    Ok(total.max(config.min_longitudinal_distance))
}

/// Current longitudinal gap, zero while the vehicles overlap
fn current_gap(position: &RelativePosition) -> Distance {
    match position.longitudinal_position {
        LongitudinalRelativePosition::Overlap => Distance::ZERO,
        _ => position.longitudinal_distance,
    }
}

/// Braking the ego vehicle has to apply for a response
pub(crate) fn required_braking(ego: &VehicleState, response: LongitudinalResponse) -> Acceleration {
    let alpha = ego.dynamics.alpha_lon;
    match response {
        LongitudinalResponse::None => Acceleration::ZERO,
        LongitudinalResponse::BrakeMinCorrect => alpha.brake_min_correct,
        LongitudinalResponse::BrakeMin => alpha.brake_min,
        LongitudinalResponse::BrakeMax => alpha.brake_max,
    }
}

/// Turn an unsafe verdict into the ego state.
///
/// `closing` is the part of `current` the ego consumes when it brakes right
/// now with the given deceleration. `floor` bounds the compliant safe
/// distance from below. The measured braking never counts for more than
/// `brake_max`.
pub(crate) fn resolve_response<F>(
    ego: &VehicleState,
    response: LongitudinalResponse,
    information: ResponseInformation,
    current: Distance,
    floor: Distance,
    closing: F,
) -> Result<LongitudinalRssState, PhysicsError>
where
    F: Fn(Acceleration) -> Result<Distance, PhysicsError>,
{
    let required = required_braking(ego, response);

    let measured = (-ego.acceleration_lon).min(ego.dynamics.alpha_lon.brake_max);
    if measured >= required {
        let consumed = closing(measured)?.max(floor);
        if consumed <= current {
            return Ok(LongitudinalRssState::safe(ResponseInformation::new(
                consumed,
                current,
                information.response_evaluator,
            )));
        }
    }

    if closing(required)? > current {
        return Ok(LongitudinalRssState::violated(LongitudinalResponse::BrakeMax, information));
    }
    Ok(LongitudinalRssState::violated(response, information))
}

/// Ego and other drive in the same direction.
///
/// Only a following ego vehicle is responsible for the gap in front of it.
pub fn check_same_direction(
    situation: &Situation,
    config: &RssConfig,
) -> Result<LongitudinalRssState, PhysicsError> {
    let ego = &situation.ego;
    let other = &situation.other;
    let position = &situation.relative_position;
    let current = current_gap(position);
    let evaluator = ResponseEvaluator::LongitudinalSameDirection;

    if position.longitudinal_position.is_ego_leading() {
        return Ok(LongitudinalRssState::safe(ResponseInformation::new(
            Distance::ZERO,
            current,
            evaluator,
        )));
    }

    let safe_distance = safe_distance_same_direction(ego, other, config)?;
    let information = ResponseInformation::new(safe_distance, current, evaluator);
    if information.is_distance_safe() {
        return Ok(LongitudinalRssState::safe(information));
    }

    let closing_speed = ego.velocity.speed_lon - other.velocity.speed_lon;
    resolve_response(
        ego,
        LongitudinalResponse::BrakeMin,
        information,
        current,
        config.min_longitudinal_distance,
        |deceleration| {
            if closing_speed > Speed::ZERO {
                stopping_distance(closing_speed, deceleration)
            } else {
                Ok(Distance::ZERO)
            }
        },
    )
}

/// Ego and other drive towards each other
pub fn check_opposite_direction(
    situation: &Situation,
    config: &RssConfig,
) -> Result<LongitudinalRssState, PhysicsError> {
    let ego = &situation.ego;
    let other = &situation.other;
    let current = current_gap(&situation.relative_position);

    let safe_distance = safe_distance_opposite_direction(ego, other, config)?;
    let information = ResponseInformation::new(
        safe_distance,
        current,
        ResponseEvaluator::LongitudinalOppositeDirection,
    );
    if information.is_distance_safe() {
        return Ok(LongitudinalRssState::safe(information));
    }

    let response = if ego.is_in_correct_lane {
        LongitudinalResponse::BrakeMinCorrect
    } else {
        LongitudinalResponse::BrakeMin
    };
    let (_, other_brake) = opposite_direction_brakes(ego, other);
    let other_stop = stopping_distance(other.velocity.speed_lon, other_brake)?;

    resolve_response(
        ego,
        response,
        information,
        current,
        config.min_longitudinal_distance,
        |deceleration| Ok(stopping_distance(ego.velocity.speed_lon, deceleration)? + other_stop),
    )
}
