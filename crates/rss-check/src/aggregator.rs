//! Response Aggregation
//!
//! Several rules may judge the same ego/object pair. The aggregation picks
//! one authoritative state per axis and combines the states of all objects
//! into the response the ego vehicle has to execute.

use rss_physics::Distance;
use rss_state::{
    AxisState, LateralRssState, LongitudinalRssState, ProperResponse, ResponseEvaluator,
    ResponseInformation, RssState,
};
use rss_world::{LongitudinalRelativePosition, Situation, SituationType};

use crate::config::RssConfig;
use crate::error::RssResult;
use crate::intersection::check_intersection;
use crate::lateral::check_lateral;
use crate::longitudinal::{check_opposite_direction, check_same_direction};

/// Select the authoritative state among the candidates of one axis.
///
/// Unsafe candidates win over safe ones. Among them the one with the largest
/// `safe - current` is reported, ties go to the higher evaluator rank. The
/// response is the most severe one over all unsafe candidates.
pub fn select<S: AxisState>(candidates: &[S]) -> Option<S> {
    let most_restrictive = |a: &&S, b: &&S| {
        a.response_information()
            .cmp_restrictiveness(b.response_information())
    };

    let violated = candidates
        .iter()
        .filter(|candidate| !candidate.is_safe())
        .max_by(most_restrictive);

    match violated {
        Some(selected) => {
            let response = candidates
                .iter()
                .filter(|candidate| !candidate.is_safe())
                .map(|candidate| candidate.response())
                .max()
                .unwrap_or_default();
            Some(selected.with_response(response))
        }
        None => candidates.iter().max_by(most_restrictive).copied(),
    }
}

/// Safe state for an axis the situation type does not evaluate
fn not_evaluated(current: Distance) -> ResponseInformation {
    ResponseInformation::new(Distance::ZERO, current, ResponseEvaluator::None)
}

fn longitudinal_state(situation: &Situation, config: &RssConfig) -> RssResult<LongitudinalRssState> {
    let current = situation.relative_position.longitudinal_distance;
    let state = match situation.situation_type {
        SituationType::SameDirection => check_same_direction(situation, config)?,
        SituationType::OppositeDirection => check_opposite_direction(situation, config)?,
        SituationType::Intersection => {
            let crossing = check_intersection(situation)?;
            let ego_behind = matches!(
                situation.relative_position.longitudinal_position,
                LongitudinalRelativePosition::AtBack | LongitudinalRelativePosition::OverlapBack
            );
            if ego_behind {
                let following = check_same_direction(situation, config)?;
                select(&[crossing, following]).unwrap_or(crossing)
            } else {
                crossing
            }
        }
        SituationType::Lateral | SituationType::NotRelevant => {
            LongitudinalRssState::safe(not_evaluated(current))
        }
    };
    Ok(state)
}

fn lateral_state(situation: &Situation, config: &RssConfig) -> RssResult<LateralRssState> {
    let current = situation.relative_position.lateral_distance;
    let state = match situation.situation_type {
        SituationType::SameDirection | SituationType::OppositeDirection | SituationType::Lateral => {
            check_lateral(situation, config)?
        }
        SituationType::Intersection | SituationType::NotRelevant => {
            LateralRssState::safe(not_evaluated(current))
        }
    };
    Ok(state)
}

/// Evaluate every rule that applies to the situation type and build the
/// state of the ego/object pair
pub fn evaluate(situation: &Situation, config: &RssConfig) -> RssResult<RssState> {
    Ok(RssState::new(
        situation.object_id,
        longitudinal_state(situation, config)?,
        lateral_state(situation, config)?,
    ))
}

/// Combine the states of all objects into the response for this cycle
pub fn resolve_proper_response(states: &[RssState]) -> ProperResponse {
    states
        .iter()
        .filter(|state| !state.is_safe)
        .fold(ProperResponse::default(), |mut proper, state| {
            proper.is_safe = false;
            proper.dangerous_objects.push(state.object_id);
            proper.longitudinal_response = proper
                .longitudinal_response
                .max(state.longitudinal_state.response);
            proper.lateral_response = proper.lateral_response.max(state.lateral_state.response);
            proper
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rss_state::{LateralResponse, LongitudinalResponse};
    use rss_world::{ObjectId, RelativePosition};

    fn info(safe: f64, current: f64, evaluator: ResponseEvaluator) -> ResponseInformation {
        ResponseInformation::new(Distance::new(safe), Distance::new(current), evaluator)
    }

    #[test]
    fn test_select_empty() {
        assert!(select::<LongitudinalRssState>(&[]).is_none());
    }

    #[test]
    fn test_select_prefers_unsafe() {
        let safe = LongitudinalRssState::safe(info(5.0, 50.0, ResponseEvaluator::IntersectionOverlap));
        let unsafe_state = LongitudinalRssState::violated(
            LongitudinalResponse::BrakeMin,
            info(30.0, 10.0, ResponseEvaluator::LongitudinalSameDirection),
        );

        let selected = select(&[safe, unsafe_state]).unwrap();
        assert_eq!(selected, unsafe_state);
    }

    #[test]
    fn test_select_largest_violation_with_most_severe_response() {
        let small = LongitudinalRssState::violated(
            LongitudinalResponse::BrakeMax,
            info(12.0, 10.0, ResponseEvaluator::IntersectionOverlap),
        );
        let large = LongitudinalRssState::violated(
            LongitudinalResponse::BrakeMin,
            info(40.0, 10.0, ResponseEvaluator::LongitudinalSameDirection),
        );

        let selected = select(&[small, large]).unwrap();
        assert_eq!(
            selected.response_information.response_evaluator,
            ResponseEvaluator::LongitudinalSameDirection
        );
        assert_eq!(selected.response, LongitudinalResponse::BrakeMax);
    }

    #[test]
    fn test_select_tie_goes_to_rank() {
        let lateral = LateralRssState::violated(
            LateralResponse::BrakeMin,
            info(2.0, 1.0, ResponseEvaluator::LateralDistance),
        );
        let overlap = LateralRssState::violated(
            LateralResponse::BrakeMin,
            info(3.0, 2.0, ResponseEvaluator::IntersectionOverlap),
        );

        for candidates in [[lateral, overlap], [overlap, lateral]] {
            let selected = select(&candidates).unwrap();
            assert_eq!(
                selected.response_information.response_evaluator,
                ResponseEvaluator::IntersectionOverlap
            );
        }
    }

    #[test]
    fn test_select_all_safe() {
        let a = LongitudinalRssState::safe(info(5.0, 50.0, ResponseEvaluator::LongitudinalSameDirection));
        let b = LongitudinalRssState::safe(info(20.0, 30.0, ResponseEvaluator::IntersectionOverlap));
        let selected = select(&[a, b]).unwrap();
        assert!(selected.is_safe);
        assert_eq!(selected, b);
    }

    #[test]
    fn test_not_relevant_is_safe() {
        let situation = Situation {
            relative_position: RelativePosition {
                longitudinal_distance: Distance::new(3.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let state = evaluate(&situation, &RssConfig::default()).unwrap();
        assert!(state.is_safe);
        assert_eq!(
            state.longitudinal_state.response_information.response_evaluator,
            ResponseEvaluator::None
        );
    }

    #[test]
    fn test_resolve_proper_response() {
        let unsafe_lon = LongitudinalRssState::violated(
            LongitudinalResponse::BrakeMin,
            info(30.0, 10.0, ResponseEvaluator::LongitudinalSameDirection),
        );
        let unsafe_lat = LateralRssState::violated(
            LateralResponse::ReturnToCorrectLane,
            info(1.0, 0.5, ResponseEvaluator::LateralDistance),
        );
        let states = [
            RssState::new(ObjectId(1), Default::default(), Default::default()),
            RssState::new(ObjectId(2), unsafe_lon, Default::default()),
            RssState::new(ObjectId(3), Default::default(), unsafe_lat),
        ];

        let proper = resolve_proper_response(&states);
        assert!(!proper.is_safe);
        assert_eq!(proper.dangerous_objects, vec![ObjectId(2), ObjectId(3)]);
        assert_eq!(proper.longitudinal_response, LongitudinalResponse::BrakeMin);
        assert_eq!(proper.lateral_response, LateralResponse::ReturnToCorrectLane);
    }

    #[test]
    fn test_resolve_nothing_is_safe() {
        assert_eq!(resolve_proper_response(&[]), ProperResponse::default());
    }

    #[test]
    fn test_default_states_are_not_dangerous() {
        let proper = resolve_proper_response(&[RssState::default(), RssState::default()]);
        assert_eq!(proper, ProperResponse::default());
    }
}
