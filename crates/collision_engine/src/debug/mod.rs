//! Debug module for collider visualization
//!
//! Only line segments are produced; turning them into pixels is up to
//! whatever implements [`LineRenderer`].

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugDrawSystem, DebugLine, LineRenderer};
pub use collision_debug::CollisionDebugVisualizer;
