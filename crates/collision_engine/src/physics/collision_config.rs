//! Collision world configuration

use crate::config::{Config, Deserialize, Serialize};
use crate::foundation::math::{Vec3, Vec4};

/// Color scheme for collider visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionDebugColors {
    /// Color for colliders not touching anything
    pub shape_default: Vec4,

    /// Color for colliders in contact this frame
    pub shape_colliding: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vec4::new(0.0, 1.0, 0.0, 1.0),   // Green
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 1.0), // Red
        }
    }
}

impl CollisionDebugColors {
    /// Color matching a collision state
    pub fn for_state(&self, is_colliding: bool) -> Vec4 {
        if is_colliding {
            self.shape_colliding
        } else {
            self.shape_default
        }
    }
}

/// Settings shared by every collider in a [`CollisionManager`](super::CollisionManager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Sphere radius before the per-collider radius offset
    pub base_sphere_radius: f32,

    /// AABB half-size around the owner before the per-collider corner offsets
    pub base_aabb_half_extent: Vec3,

    /// Debug colors
    pub debug_colors: CollisionDebugColors,

    /// Line segments per circle when drawing spheres
    pub sphere_segments: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            base_sphere_radius: 1.0,
            base_aabb_half_extent: Vec3::new(1.0, 1.0, 1.0),
            debug_colors: CollisionDebugColors::default(),
            sphere_segments: 16,
        }
    }
}

impl Config for CollisionConfig {}
