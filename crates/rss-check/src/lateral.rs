//! Lateral Safety
//!
//! The left vehicle may drift to the right with `accel_max` during its
//! response time, the right vehicle to the left. Afterwards both brake their
//! lateral motion with `brake_min`. Positive lateral speed points right.

use rss_physics::{
    distance_offset_after_response_time, speed_after_response_time, stopping_distance,
    Acceleration, CoordinateSystemAxis, Distance, PhysicsError,
};
use rss_state::{LateralResponse, LateralRssState, ResponseEvaluator, ResponseInformation};
use rss_world::{LateralRelativePosition, Situation, VehicleState};

use crate::config::RssConfig;

/// Signed lateral position change of `vehicle` when accelerating with
/// `acceleration` for the response time and braking afterwards
fn lateral_braking_offset(
    vehicle: &VehicleState,
    acceleration: Acceleration,
) -> Result<Distance, PhysicsError> {
    let axis = CoordinateSystemAxis::Lateral;
    let speed = vehicle.velocity.speed_lat;
    let offset = distance_offset_after_response_time(axis, speed, acceleration, vehicle.response_time)?;
    let speed_after = speed_after_response_time(axis, speed, acceleration, vehicle.response_time)?;
    Ok(offset + stopping_distance(speed_after, vehicle.dynamics.alpha_lat.brake_min)?)
}

/// Minimum lateral gap between the vehicle on the `left` and the one on the `right`
pub fn safe_lateral_distance(
    left: &VehicleState,
    right: &VehicleState,
    config: &RssConfig,
) -> Result<Distance, PhysicsError> {
    let left_offset = lateral_braking_offset(left, left.dynamics.alpha_lat.accel_max)?;
    let right_offset = lateral_braking_offset(right, -right.dynamics.alpha_lat.accel_max)?;

    let margins = (left.dynamics.lateral_fluctuation_margin
        + right.dynamics.lateral_fluctuation_margin)
        / 2.0;
    let distance = (left_offset - right_offset).max(Distance::ZERO) + margins;
    Ok(distance.max(config.min_lateral_distance))
}

/// Lateral check for situations where the vehicles drive side by side
pub fn check_lateral(situation: &Situation, config: &RssConfig) -> Result<LateralRssState, PhysicsError> {
    let ego = &situation.ego;
    let other = &situation.other;
    let position = &situation.relative_position;

    let safe_distance = match position.lateral_position {
        LateralRelativePosition::AtLeft => safe_lateral_distance(ego, other, config)?,
        LateralRelativePosition::AtRight => safe_lateral_distance(other, ego, config)?,
        LateralRelativePosition::Overlap => {
            safe_lateral_distance(ego, other, config)?.max(safe_lateral_distance(other, ego, config)?)
        }
    };

    let information = ResponseInformation::new(
        safe_distance,
        position.lateral_distance,
        ResponseEvaluator::LateralDistance,
    );
    if information.is_distance_safe() {
        return Ok(LateralRssState::safe(information));
    }

    let response = if ego.is_in_correct_lane {
        LateralResponse::BrakeMin
    } else {
        LateralResponse::ReturnToCorrectLane
    };
    Ok(LateralRssState::violated(response, information))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rss_physics::{Duration, Speed};
    use rss_state::AxisState;
    use rss_world::{Dynamics, LateralAccelerationValues, RelativePosition, SituationType, Velocity};

    fn vehicle(speed_lat: f64) -> VehicleState {
        VehicleState {
            velocity: Velocity {
                speed_lon: Speed::new(10.0),
                speed_lat: Speed::new(speed_lat),
            },
            dynamics: Dynamics {
                alpha_lat: LateralAccelerationValues {
                    accel_max: Acceleration::new(0.2),
                    brake_min: Acceleration::new(0.8),
                },
                lateral_fluctuation_margin: Distance::new(0.1),
                ..Default::default()
            },
            response_time: Duration::new(1.0),
            ..Default::default()
        }
    }

    fn side_by_side(
        ego: VehicleState,
        other: VehicleState,
        lateral_position: LateralRelativePosition,
        gap: f64,
    ) -> Situation {
        Situation {
            situation_type: SituationType::SameDirection,
            ego,
            other,
            relative_position: RelativePosition {
                lateral_position,
                lateral_distance: Distance::new(gap),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_safe_lateral_distance() {
        // left: 0.6 + 0.49/1.6, right: -0.1 - 0.04/1.6, plus 0.1 margin
        let distance = safe_lateral_distance(&vehicle(0.5), &vehicle(0.0), &RssConfig::default()).unwrap();
        assert_eq!(distance, Distance::new(1.13125));
    }

    #[test]
    fn test_diverging_vehicles_only_need_margin() {
        let distance = safe_lateral_distance(&vehicle(-2.0), &vehicle(2.0), &RssConfig::default()).unwrap();
        assert_eq!(distance, Distance::new(0.1));
    }

    #[test]
    fn test_minimum_lateral_distance() {
        let config = RssConfig {
            min_lateral_distance: Distance::new(1.5),
            ..Default::default()
        };
        let distance = safe_lateral_distance(&vehicle(0.0), &vehicle(0.0), &config).unwrap();
        assert_eq!(distance, Distance::new(1.5));
    }

    #[test]
    fn test_drifting_towards_other_brakes() {
        let situation = side_by_side(vehicle(0.5), vehicle(0.0), LateralRelativePosition::AtLeft, 0.5);
        let state = check_lateral(&situation, &RssConfig::default()).unwrap();

        assert!(!state.is_safe);
        assert_eq!(state.response, LateralResponse::BrakeMin);
        assert_eq!(state.response_information.response_evaluator, ResponseEvaluator::LateralDistance);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_wide_gap_is_safe() {
        let situation = side_by_side(vehicle(0.5), vehicle(0.0), LateralRelativePosition::AtLeft, 2.0);
        let state = check_lateral(&situation, &RssConfig::default()).unwrap();
        assert!(state.is_safe);
        assert_eq!(state.response, LateralResponse::None);
    }

    #[test]
    fn test_mirrored_position() {
        // ego on the right moving left mirrors the left case
        let situation = side_by_side(vehicle(-0.5), vehicle(0.0), LateralRelativePosition::AtRight, 0.5);
        let state = check_lateral(&situation, &RssConfig::default()).unwrap();
        assert_eq!(state.response_information.safe_distance, Distance::new(1.13125));
    }

    #[test]
    fn test_wrong_lane_returns_to_correct_lane() {
        let mut ego = vehicle(0.5);
        ego.is_in_correct_lane = false;
        let situation = side_by_side(ego, vehicle(0.0), LateralRelativePosition::AtLeft, 0.5);
        let state = check_lateral(&situation, &RssConfig::default()).unwrap();
        assert_eq!(state.response, LateralResponse::ReturnToCorrectLane);
    }

    #[test]
    fn test_overlap_takes_larger_ordering() {
        let situation = side_by_side(vehicle(0.5), vehicle(0.0), LateralRelativePosition::Overlap, 0.0);
        let state = check_lateral(&situation, &RssConfig::default()).unwrap();
        assert!(!state.is_safe);
        assert_eq!(state.response_information.safe_distance, Distance::new(1.13125));
    }
}
