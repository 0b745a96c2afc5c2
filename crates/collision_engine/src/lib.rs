//! # Collision Engine
//!
//! Frame-driven collision detection for 3D game objects.
//!
//! ## Features
//!
//! - **Three shape kinds**: spheres, axis-aligned boxes and oriented boxes,
//!   any combination active per collider
//! - **Exact narrow phase**: closed-form sphere tests and 15-axis SAT for
//!   oriented boxes
//! - **Transition events**: Enter, Stay and Out hooks on the owning object,
//!   plus a per-frame event log
//! - **Persistent tuning**: per-collider offsets stored in RON or TOML
//! - **Debug wireframes**: line output for any renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! struct Rock {
//!     position: Vec3,
//! }
//!
//! impl Positionable for Rock {
//!     fn center_position(&self) -> Vec3 {
//!         self.position
//!     }
//!
//!     fn center_rotation(&self) -> Vec3 {
//!         Vec3::zeros()
//!     }
//! }
//!
//! impl CollisionHandler for Rock {
//!     fn on_collision_enter(&mut self, other: &CollisionPeer<'_>) {
//!         log::info!("hit {}", other.name);
//!     }
//! }
//!
//! let mut world = CollisionManager::new();
//! let a = world.add_collider("Rock", Box::new(Rock { position: Vec3::zeros() }));
//! let b = world.add_collider("Rock", Box::new(Rock { position: Vec3::new(1.0, 0.0, 0.0) }));
//!
//! world.update();
//! assert!(world.was_colliding(a, b));
//! assert_eq!(world.get(b).map(Collider::name), Some("Rock_1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        debug::{DebugDrawSystem, LineRenderer},
        foundation::math::{Mat4, Vec3, Vec4},
        physics::{
            ColliderHandle, ColliderSettings, ColliderSettingsTable, Collidable, Collider,
            CollisionConfig, CollisionError, CollisionEventKind, CollisionHandler,
            CollisionManager, CollisionPeer, Positionable, SettingsStore, ShapeKind,
        },
    };
}
