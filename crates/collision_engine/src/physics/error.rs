//! Collision system errors

use crate::config::ConfigError;
use crate::physics::collision_manager::ColliderHandle;
use thiserror::Error;

/// Errors reported by handle- or name-addressed collision world operations
#[derive(Error, Debug)]
pub enum CollisionError {
    /// The handle's collider was removed (or never belonged to this world)
    #[error("Stale collider handle: {0:?}")]
    StaleHandle(ColliderHandle),

    /// No collider is registered under this name
    #[error("No collider named {0:?}")]
    UnknownName(String),

    /// Loading or saving configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
