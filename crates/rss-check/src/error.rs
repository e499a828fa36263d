//! RSS Check Error Types

use rss_physics::PhysicsError;
use rss_world::WorldError;
use thiserror::Error;

/// Errors of a safety check. A failed check never yields a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RssError {
    /// Kinematic calculation rejected its inputs
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Vehicle or situation input is invalid
    #[error("Invalid input: {0}")]
    World(#[from] WorldError),

    /// Checker configuration is invalid or could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for the checks
pub type RssResult<T> = Result<T, RssError>;
