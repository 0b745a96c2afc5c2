//! Physics module for collision detection
//!
//! Exhaustive pairwise collision detection between sphere, AABB and OBB
//! colliders, with Enter / Stay / Exit event semantics tracked per pair.

pub mod collision;
pub mod collider;
pub mod collision_config;
pub mod collision_manager;
pub mod error;
pub mod settings;

#[cfg(test)]
mod tests;

pub use collision::{Aabb, Obb, Sphere};
pub use collider::{
    Collidable,
    Collider,
    CollisionHandler,
    CollisionPeer,
    Positionable,
    ShapeFlags,
    ShapeKind,
};
pub use collision_config::{CollisionConfig, CollisionDebugColors};
pub use collision_manager::{
    ColliderHandle,
    CollisionEvent,
    CollisionEventKind,
    CollisionManager,
    CollisionPair,
};
pub use error::CollisionError;
pub use settings::{ColliderOffsets, ColliderSettings, ColliderSettingsTable, SettingsStore};
