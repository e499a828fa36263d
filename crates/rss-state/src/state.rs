//! Per-axis and aggregate RSS states

use rss_world::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::response::{LateralResponse, LongitudinalResponse, ResponseInformation};

/// Common view on the two axis states, used by the aggregation
pub trait AxisState: Copy {
    type Response: Copy + Ord + Default + fmt::Debug;

    fn is_safe(&self) -> bool;

    fn response(&self) -> Self::Response;

    fn response_information(&self) -> &ResponseInformation;

    /// Same verdict with a different response category
    fn with_response(self, response: Self::Response) -> Self;

    /// `response == None` iff safe, and the distances agree with the verdict
    fn is_consistent(&self) -> bool {
        let responds = self.response() != Self::Response::default();
        self.is_safe() != responds && self.is_safe() == self.response_information().is_distance_safe()
    }
}

macro_rules! axis_state {
    ($(#[$meta:meta])* $name:ident, $response:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub is_safe: bool,
            pub response: $response,
            pub response_information: ResponseInformation,
        }

        impl $name {
            /// Safe verdict, no response required
            pub fn safe(response_information: ResponseInformation) -> Self {
                Self {
                    is_safe: true,
                    response: $response::None,
                    response_information,
                }
            }

            /// Unsafe verdict with the required response
            pub fn violated(response: $response, response_information: ResponseInformation) -> Self {
                debug_assert!(response != $response::None);
                Self {
                    is_safe: false,
                    response,
                    response_information,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::safe(ResponseInformation::default())
            }
        }

        impl AxisState for $name {
            type Response = $response;

            fn is_safe(&self) -> bool {
                self.is_safe
            }

            fn response(&self) -> $response {
                self.response
            }

            fn response_information(&self) -> &ResponseInformation {
                &self.response_information
            }

            fn with_response(self, response: $response) -> Self {
                Self { response, ..self }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}(is_safe:{},response:{},response_information:{})",
                    stringify!($name),
                    self.is_safe,
                    self.response,
                    self.response_information
                )
            }
        }
    };
}

axis_state!(
    /// Longitudinal verdict for the ego vehicle
    LongitudinalRssState, LongitudinalResponse
);

axis_state!(
    /// Lateral verdict for the ego vehicle
    LateralRssState, LateralResponse
);

/// Verdict for one ego/object pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RssState {
    pub object_id: ObjectId,
    /// Both axes are safe
    pub is_safe: bool,
    pub longitudinal_state: LongitudinalRssState,
    pub lateral_state: LateralRssState,
}

impl Default for RssState {
    fn default() -> Self {
        Self::new(ObjectId::default(), Default::default(), Default::default())
    }
}

impl RssState {
    pub fn new(
        object_id: ObjectId,
        longitudinal_state: LongitudinalRssState,
        lateral_state: LateralRssState,
    ) -> Self {
        Self {
            object_id,
            is_safe: longitudinal_state.is_safe && lateral_state.is_safe,
            longitudinal_state,
            lateral_state,
        }
    }

    /// Both axes are violated at the same time
    pub fn is_dangerous(&self) -> bool {
        !self.longitudinal_state.is_safe && !self.lateral_state.is_safe
    }
}

impl fmt::Display for RssState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RssState(object_id:{},is_safe:{},longitudinal_state:{},lateral_state:{})",
            self.object_id, self.is_safe, self.longitudinal_state, self.lateral_state
        )
    }
}
