//! Checker facade
//!
//! Validates each situation, runs the rules for its type, aggregates the
//! verdicts and hands the rendered states to the sink.

use rss_state::{NoopSink, ProperResponse, RssState, StateSink};
use rss_world::Situation;
use tracing::{debug, warn};

use crate::aggregator::{evaluate, resolve_proper_response};
use crate::config::RssConfig;
use crate::error::RssResult;

/// Stateless safety checker, one instance per ego vehicle
#[derive(Debug, Clone)]
pub struct RssChecker<S: StateSink = NoopSink> {
    config: RssConfig,
    sink: S,
}

impl RssChecker {
    /// Create a checker that renders nothing
    pub fn new(config: RssConfig) -> RssResult<Self> {
        Self::with_sink(config, NoopSink)
    }
}

impl<S: StateSink> RssChecker<S> {
    /// Create a checker reporting its states to `sink`
    pub fn with_sink(config: RssConfig, sink: S) -> RssResult<Self> {
        config.validate()?;
        Ok(Self { config, sink })
    }

    /// Configuration the checks run with
    pub fn config(&self) -> &RssConfig {
        &self.config
    }

    /// Check one ego/object pair
    pub fn check_situation(&self, situation: &Situation) -> RssResult<RssState> {
        self.sink.emit("situation", situation);

        let state = situation
            .validate()
            .map_err(Into::into)
            .and_then(|()| evaluate(situation, &self.config))
            .map_err(|e| {
                warn!(
                    "RSS check of situation {} (object {}) failed: {}",
                    situation.situation_id, situation.object_id, e
                );
                e
            })?;

        if !state.is_safe {
            debug!(
                "Object {} unsafe: longitudinal {}, lateral {}",
                state.object_id, state.longitudinal_state.response, state.lateral_state.response
            );
        }
        self.sink.emit("rss_state", &state);
        Ok(state)
    }

    /// Check all pairs of one cycle. The first failure aborts the cycle.
    pub fn check_situations(&self, situations: &[Situation]) -> RssResult<Vec<RssState>> {
        situations
            .iter()
            .map(|situation| self.check_situation(situation))
            .collect()
    }

    /// Check all pairs of one cycle and resolve the response to execute
    pub fn proper_response(&self, situations: &[Situation]) -> RssResult<ProperResponse> {
        let states = self.check_situations(situations)?;
        let proper = resolve_proper_response(&states);
        if !proper.is_safe {
            debug!(
                "{} dangerous objects, executing {}/{}",
                proper.dangerous_objects.len(),
                proper.longitudinal_response,
                proper.lateral_response
            );
        }
        Ok(proper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RssError;
    use rss_physics::{Acceleration, Distance, Duration, Speed};
    use rss_state::{LateralResponse, LongitudinalResponse, ResponseEvaluator};
    use rss_world::{
        Dynamics, LateralAccelerationValues, LateralRelativePosition, LongitudinalAccelerationValues,
        LongitudinalRelativePosition, ObjectId, RelativePosition, SituationId, SituationType,
        VehicleState, Velocity,
    };
    use std::cell::RefCell;
    use std::fmt;

    #[derive(Default)]
    struct RecordingSink {
        labels: RefCell<Vec<&'static str>>,
    }

    impl StateSink for RecordingSink {
        fn emit(&self, label: &'static str, _value: &dyn fmt::Display) {
            self.labels.borrow_mut().push(label);
        }
    }

    // no lateral drift, so vehicles sharing a lane are laterally safe
    fn vehicle(speed: f64) -> VehicleState {
        VehicleState {
            velocity: Velocity {
                speed_lon: Speed::new(speed),
                speed_lat: Speed::ZERO,
            },
            dynamics: Dynamics {
                alpha_lon: LongitudinalAccelerationValues {
                    accel_max: Acceleration::new(2.0),
                    brake_max: Acceleration::new(4.0),
                    brake_min: Acceleration::new(4.0),
                    brake_min_correct: Acceleration::new(3.0),
                },
                alpha_lat: LateralAccelerationValues {
                    accel_max: Acceleration::ZERO,
                    brake_min: Acceleration::new(0.8),
                },
                lateral_fluctuation_margin: Distance::ZERO,
            },
            response_time: Duration::new(1.0),
            ..Default::default()
        }
    }

    fn following(id: u64, ego_speed: f64, other_speed: f64, gap: f64) -> Situation {
        Situation {
            situation_id: SituationId(id),
            object_id: ObjectId(id),
            situation_type: SituationType::SameDirection,
            ego: vehicle(ego_speed),
            other: vehicle(other_speed),
            relative_position: RelativePosition {
                longitudinal_position: LongitudinalRelativePosition::AtBack,
                longitudinal_distance: Distance::new(gap),
                lateral_position: LateralRelativePosition::Overlap,
                lateral_distance: Distance::ZERO,
            },
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RssConfig {
            min_longitudinal_distance: Distance::new(-1.0),
            ..Default::default()
        };
        assert!(matches!(RssChecker::new(config), Err(RssError::Config(_))));
    }

    #[test]
    fn test_following_too_close() {
        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let state = checker.check_situation(&following(1, 20.0, 15.0, 10.0)).unwrap();

        assert!(!state.is_safe);
        assert_eq!(state.object_id, ObjectId(1));
        assert_eq!(state.longitudinal_state.response, LongitudinalResponse::BrakeMin);
        assert_eq!(
            state.longitudinal_state.response_information.safe_distance,
            Distance::new(53.375)
        );
        assert!(state.lateral_state.is_safe);
        assert!(!state.is_dangerous());
    }

    #[test]
    fn test_both_stationary() {
        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let state = checker.check_situation(&following(2, 0.0, 0.0, 5.0)).unwrap();
        assert!(state.is_safe);
        assert_eq!(state.longitudinal_state.response, LongitudinalResponse::None);
    }

    #[test]
    fn test_head_on() {
        let mut situation = following(3, 10.0, 10.0, 50.0);
        situation.situation_type = SituationType::OppositeDirection;
        situation.relative_position.longitudinal_position = LongitudinalRelativePosition::InFront;
        situation.other.is_in_correct_lane = false;

        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let state = checker.check_situation(&situation).unwrap();
        assert_eq!(state.longitudinal_state.response, LongitudinalResponse::BrakeMinCorrect);

        situation.relative_position.longitudinal_distance = Distance::new(70.0);
        assert!(checker.check_situation(&situation).unwrap().is_safe);
    }

    #[test]
    fn test_intersection_behind_other_adds_following_rule() {
        // other cannot stop and crosses together with the ego; the gap behind it is
        // also far too small
        let mut situation = following(4, 15.0, 15.0, 1.0);
        situation.situation_type = SituationType::Intersection;
        for vehicle in [&mut situation.ego, &mut situation.other] {
            vehicle.distance_to_enter_intersection = Distance::new(10.0);
            vehicle.distance_to_leave_intersection = Distance::new(20.0);
        }
        situation.other.has_priority = true;

        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let state = checker.check_situation(&situation).unwrap();

        assert!(!state.is_safe);
        assert_eq!(state.longitudinal_state.response, LongitudinalResponse::BrakeMax);
        // intersection: 52.125 - 10, same direction: 52.125 - 28.125 - 1
        assert_eq!(
            state.longitudinal_state.response_information.response_evaluator,
            ResponseEvaluator::IntersectionOverlap
        );
        assert!(state.lateral_state.is_safe);
    }

    #[test]
    fn test_lateral_situation() {
        let mut situation = following(5, 10.0, 10.0, 0.0);
        situation.situation_type = SituationType::Lateral;
        situation.ego.velocity.speed_lat = Speed::new(0.5);
        situation.relative_position.lateral_position = LateralRelativePosition::AtLeft;
        situation.relative_position.lateral_distance = Distance::new(0.5);

        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let state = checker.check_situation(&situation).unwrap();

        // 0.5 m/s towards the other needs 0.65625 m
        assert!(state.longitudinal_state.is_safe);
        assert_eq!(state.lateral_state.response, LateralResponse::BrakeMin);
        assert!(!state.is_safe);
    }

    #[test]
    fn test_invalid_situation_is_an_error() {
        let mut situation = following(6, 20.0, 15.0, 10.0);
        situation.ego.velocity.speed_lon = Speed::new(-3.0);

        let checker = RssChecker::new(RssConfig::default()).unwrap();
        assert!(matches!(checker.check_situation(&situation), Err(RssError::World(_))));
    }

    #[test]
    fn test_sink_receives_situation_and_state() {
        let sink = RecordingSink::default();
        let checker = RssChecker::with_sink(RssConfig::default(), &sink).unwrap();
        checker.check_situation(&following(7, 20.0, 15.0, 10.0)).unwrap();

        assert_eq!(*sink.labels.borrow(), vec!["situation", "rss_state"]);
    }

    #[test]
    fn test_proper_response_over_cycle() {
        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let situations = [
            following(1, 20.0, 15.0, 100.0),
            following(2, 20.0, 15.0, 10.0),
            following(3, 20.0, 15.0, 2.0),
        ];

        let proper = checker.proper_response(&situations).unwrap();
        assert!(!proper.is_safe);
        assert_eq!(proper.dangerous_objects, vec![ObjectId(2), ObjectId(3)]);
        assert_eq!(proper.longitudinal_response, LongitudinalResponse::BrakeMax);
        assert_eq!(proper.lateral_response, LateralResponse::None);
    }

    #[test]
    fn test_failure_aborts_cycle() {
        let checker = RssChecker::new(RssConfig::default()).unwrap();
        let mut broken = following(2, 20.0, 15.0, 10.0);
        broken.relative_position.longitudinal_distance = Distance::new(-1.0);

        let result = checker.check_situations(&[following(1, 20.0, 15.0, 100.0), broken]);
        assert!(result.is_err());
    }
}
