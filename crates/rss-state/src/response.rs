//! Response categories and evaluator tags

use rss_physics::Distance;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Required longitudinal response, ordered by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LongitudinalResponse {
    #[default]
    None,
    /// Brake at least with `brake_min_correct`
    BrakeMinCorrect,
    /// Brake at least with `brake_min`
    BrakeMin,
    /// Brake with everything the vehicle has
    BrakeMax,
}

/// Required lateral response, ordered by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LateralResponse {
    #[default]
    None,
    /// Brake lateral motion towards the object with at least `brake_min`
    BrakeMin,
    /// Steer back into the correct lane before anything else
    ReturnToCorrectLane,
}

/// Situational rule that produced a verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseEvaluator {
    #[default]
    None,
    LongitudinalSameDirection,
    LongitudinalOppositeDirection,
    IntersectionEgoAbleToStop,
    IntersectionOtherAbleToStop,
    IntersectionOverlap,
    LateralDistance,
}

impl ResponseEvaluator {
    /// Tie-break rank between evaluators reporting equally restrictive
    /// violations. Higher wins. This is the only place the order is defined.
    pub fn rank(self) -> u8 {
        match self {
            ResponseEvaluator::IntersectionOverlap => 6,
            ResponseEvaluator::LongitudinalOppositeDirection => 5,
            ResponseEvaluator::LongitudinalSameDirection => 4,
            ResponseEvaluator::IntersectionEgoAbleToStop => 3,
            ResponseEvaluator::IntersectionOtherAbleToStop => 2,
            ResponseEvaluator::LateralDistance => 1,
            ResponseEvaluator::None => 0,
        }
    }
}

macro_rules! display_as_debug {
    ($($name:ty),*) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self)
            }
        })*
    };
}

display_as_debug!(LongitudinalResponse, LateralResponse, ResponseEvaluator);

/// Distances behind one axis verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseInformation {
    /// Distance required to be safe
    pub safe_distance: Distance,
    /// Distance actually available
    pub current_distance: Distance,
    /// Rule that produced the verdict
    pub response_evaluator: ResponseEvaluator,
}

impl ResponseInformation {
    pub fn new(
        safe_distance: Distance,
        current_distance: Distance,
        response_evaluator: ResponseEvaluator,
    ) -> Self {
        Self {
            safe_distance,
            current_distance,
            response_evaluator,
        }
    }

    /// `safe_distance - current_distance`; positive when violated
    pub fn margin(&self) -> Distance {
        self.safe_distance - self.current_distance
    }

    /// Available distance covers the required one
    pub fn is_distance_safe(&self) -> bool {
        self.current_distance >= self.safe_distance
    }

    /// Total order by restrictiveness: larger margin first, then evaluator rank
    pub fn cmp_restrictiveness(&self, other: &Self) -> Ordering {
        match self.margin().partial_cmp(&other.margin()) {
            Some(Ordering::Equal) | None => self
                .response_evaluator
                .rank()
                .cmp(&other.response_evaluator.rank()),
            Some(ordering) => ordering,
        }
    }
}

impl fmt::Display for ResponseInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResponseInformation(safe_distance:{},current_distance:{},response_evaluator:{})",
            self.safe_distance, self.current_distance, self.response_evaluator
        )
    }
}
