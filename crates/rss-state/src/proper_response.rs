//! Combined response over all objects of one cycle

use rss_world::ObjectId;
use serde::{Deserialize, Serialize};

use crate::response::{LateralResponse, LongitudinalResponse};

/// Most severe response the ego vehicle has to execute this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProperResponse {
    /// No object requires a response
    pub is_safe: bool,
    /// Objects with an unsafe verdict, in evaluation order
    pub dangerous_objects: Vec<ObjectId>,
    pub longitudinal_response: LongitudinalResponse,
    pub lateral_response: LateralResponse,
}

impl Default for ProperResponse {
    fn default() -> Self {
        Self {
            is_safe: true,
            dangerous_objects: Vec::new(),
            longitudinal_response: LongitudinalResponse::None,
            lateral_response: LateralResponse::None,
        }
    }
}
