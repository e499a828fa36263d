//! Intersection Safety
//!
//! Two paths cross inside a conflict area. The vehicle expected to yield has
//! to be able to stop in front of the area, otherwise the vehicles have to
//! pass the area one after the other.

use rss_physics::{
    stopping_distance, time_to_cover_distance, Arrival, Distance, PhysicsError,
};
use rss_state::{LongitudinalResponse, LongitudinalRssState, ResponseEvaluator, ResponseInformation};
use rss_world::{Situation, VehicleState};

use crate::longitudinal::{resolve_response, stated_braking_offset};

/// Can-stop verdict of one vehicle in front of the conflict area
#[derive(Debug, Clone, Copy)]
struct StopCheck {
    information: ResponseInformation,
}

impl StopCheck {
    fn new(vehicle: &VehicleState, evaluator: ResponseEvaluator) -> Result<Self, PhysicsError> {
        let offset = stated_braking_offset(vehicle, vehicle.dynamics.alpha_lon.brake_min)?;
        Ok(Self {
            information: ResponseInformation::new(
                offset,
                vehicle.distance_to_enter_intersection,
                evaluator,
            ),
        })
    }

    fn can_stop(&self) -> bool {
        self.information.is_distance_safe()
    }
}

/// Earliest time the vehicle can reach the conflict area
fn earliest_entry(vehicle: &VehicleState) -> Result<Arrival, PhysicsError> {
    let alpha = vehicle.dynamics.alpha_lon;
    time_to_cover_distance(
        vehicle.velocity.speed_lon,
        vehicle.response_time,
        alpha.accel_max,
        alpha.brake_min,
        vehicle.distance_to_enter_intersection,
    )
}

/// Latest time the vehicle has left the conflict area, braking with
/// `brake_max` from now on
fn latest_exit(vehicle: &VehicleState) -> Result<Arrival, PhysicsError> {
    let brake_max = vehicle.dynamics.alpha_lon.brake_max;
    time_to_cover_distance(
        vehicle.velocity.speed_lon,
        vehicle.response_time,
        -brake_max,
        brake_max,
        vehicle.distance_to_leave_intersection,
    )
}

/// One vehicle has left the conflict area before the other can enter it
fn passes_one_after_the_other(ego: &VehicleState, other: &VehicleState) -> Result<bool, PhysicsError> {
    let ego_clears = latest_exit(ego)?.is_before(earliest_entry(other)?);
    let other_clears = latest_exit(other)?.is_before(earliest_entry(ego)?);
    Ok(ego_clears || other_clears)
}

/// Ego and other approach a shared conflict area
pub fn check_intersection(situation: &Situation) -> Result<LongitudinalRssState, PhysicsError> {
    let ego = &situation.ego;
    let other = &situation.other;

    let ego_stop = StopCheck::new(ego, ResponseEvaluator::IntersectionEgoAbleToStop)?;
    let other_stop = StopCheck::new(other, ResponseEvaluator::IntersectionOtherAbleToStop)?;

    let yielding_stops = match (ego.has_priority, other.has_priority) {
        (true, false) => other_stop.can_stop().then_some(other_stop.information),
        (false, true) => ego_stop.can_stop().then_some(ego_stop.information),
        _ => (ego_stop.can_stop() && other_stop.can_stop()).then(|| {
            if ego_stop.information.cmp_restrictiveness(&other_stop.information).is_ge() {
                ego_stop.information
            } else {
                other_stop.information
            }
        }),
    };
    if let Some(information) = yielding_stops {
        return Ok(LongitudinalRssState::safe(information));
    }

    let current = ego.distance_to_enter_intersection;
    if passes_one_after_the_other(ego, other)? {
        return Ok(LongitudinalRssState::safe(ResponseInformation::new(
            Distance::ZERO,
            current,
            ResponseEvaluator::IntersectionOverlap,
        )));
    }

    // report a vehicle that failed its can-stop check
    let ego_yields = !ego.has_priority || other.has_priority;
    let failed = if (ego_yields && !ego_stop.can_stop()) || other_stop.can_stop() {
        ego_stop
    } else {
        other_stop
    };
    let information = ResponseInformation::new(
        failed.information.safe_distance,
        failed.information.current_distance,
        ResponseEvaluator::IntersectionOverlap,
    );

    resolve_response(
        ego,
        LongitudinalResponse::BrakeMin,
        information,
        current,
        Distance::ZERO,
        |deceleration| stopping_distance(ego.velocity.speed_lon, deceleration),
    )
}
