//! Collision geometry
//!
//! World-space shape primitives and the narrow-phase tests between them.
//!
//! # Module Organization
//!
//! - [`primitives`] - [`Sphere`], [`Aabb`] and [`Obb`] value types
//! - [`intersection`] - Pure intersection tests for every pair of shape kinds

pub mod primitives;
pub mod intersection;

// Re-export commonly used types
pub use primitives::{Aabb, Obb, Sphere};
