//! Ego/object situation description

use rss_physics::{Distance, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{require, WorldError};
use crate::vehicle::VehicleState;

/// Identifier of a tracked object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a situation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SituationId(pub u64);

impl fmt::Display for SituationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Situation type decided by the situation extraction stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SituationType {
    /// Object does not interact with the ego vehicle
    #[default]
    NotRelevant,
    /// Both drive in the same direction on a shared corridor
    SameDirection,
    /// Both drive towards each other on a shared corridor
    OppositeDirection,
    /// Paths cross inside an intersection conflict area
    Intersection,
    /// Side by side, only the lateral axis is evaluated
    Lateral,
}

/// Longitudinal position of the ego vehicle relative to the object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LongitudinalRelativePosition {
    InFront,
    OverlapFront,
    #[default]
    Overlap,
    OverlapBack,
    AtBack,
}

impl LongitudinalRelativePosition {
    /// Ego drives ahead of the object
    pub fn is_ego_leading(self) -> bool {
        matches!(self, Self::InFront | Self::OverlapFront)
    }

    /// Ego drives behind the object (including partial overlap)
    pub fn is_ego_following(self) -> bool {
        matches!(self, Self::AtBack | Self::OverlapBack)
    }
}

/// Lateral position of the ego vehicle relative to the object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LateralRelativePosition {
    AtLeft,
    #[default]
    Overlap,
    AtRight,
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

display_as_debug!(SituationType, LongitudinalRelativePosition, LateralRelativePosition);

/// Relative position of the ego vehicle with respect to the object
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    pub longitudinal_position: LongitudinalRelativePosition,
    /// Current longitudinal gap, zero when overlapping
    pub longitudinal_distance: Distance,
    pub lateral_position: LateralRelativePosition,
    /// Current lateral gap, zero when overlapping
    pub lateral_distance: Distance,
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RelativePosition(longitudinal_position:{},longitudinal_distance:{},lateral_position:{},lateral_distance:{})",
            self.longitudinal_position,
            self.longitudinal_distance,
            self.lateral_position,
            self.lateral_distance
        )
    }
}

/// One ego/object pair to evaluate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    pub situation_id: SituationId,
    pub object_id: ObjectId,
    pub situation_type: SituationType,
    pub ego: VehicleState,
    pub other: VehicleState,
    pub relative_position: RelativePosition,
}

impl Situation {
    /// Validate both vehicle states and the relative position
    pub fn validate(&self) -> Result<(), WorldError> {
        self.ego.validate()?;
        self.other.validate()?;

        let lon = self.relative_position.longitudinal_distance;
        require(
            lon.is_valid() && lon >= Distance::ZERO,
            "relative_position.longitudinal_distance",
            lon.value(),
            "must be a finite, non-negative distance",
        )?;
        let lat = self.relative_position.lateral_distance;
        require(
            lat.is_valid() && lat >= Distance::ZERO,
            "relative_position.lateral_distance",
            lat.value(),
            "must be a finite, non-negative distance",
        )
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Situation(situation_id:{},object_id:{},situation_type:{},ego:{},other:{},relative_position:{})",
            self.situation_id,
            self.object_id,
            self.situation_type,
            self.ego,
            self.other,
            self.relative_position
        )
    }
}
