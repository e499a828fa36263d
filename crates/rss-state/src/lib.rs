//! RSS State
//!
//! Outputs of the safety checks:
//! - Longitudinal and lateral response categories
//! - Evaluator tags with their tie-break rank
//! - Per-axis states, the per-object state and the combined proper response
//! - Logging sinks for rendered states

mod proper_response;
mod response;
mod sink;
mod state;

pub use proper_response::ProperResponse;
pub use response::{LateralResponse, LongitudinalResponse, ResponseEvaluator, ResponseInformation};
pub use sink::{NoopSink, StateSink, TracingSink};
pub use state::{AxisState, LateralRssState, LongitudinalRssState, RssState};
