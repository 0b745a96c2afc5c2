//! Collider wireframes
//!
//! Spheres are drawn as three axis-aligned great circles; boxes as their
//! twelve edges.

use crate::debug::draw::LineRenderer;
use crate::foundation::math::{constants, Vec3, Vec4};
use crate::physics::collider::{Collider, ShapeKind};
use crate::physics::collision::{Aabb, Obb, Sphere};

/// Corner index pairs forming the edges of a box, for corners ordered as
/// [`Aabb::corners`] returns them
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // bottom
    (4, 5), (5, 6), (6, 7), (7, 4), // top
    (0, 4), (1, 5), (2, 6), (3, 7), // sides
];

/// Emits collider wireframes to a [`LineRenderer`]
#[derive(Debug, Clone)]
pub struct CollisionDebugVisualizer {
    sphere_segments: u32,

    /// Draw sphere shapes
    pub show_spheres: bool,

    /// Draw AABB shapes
    pub show_aabbs: bool,

    /// Draw OBB shapes
    pub show_obbs: bool,
}

impl CollisionDebugVisualizer {
    /// Create a visualizer drawing circles with `sphere_segments` segments
    pub fn new(sphere_segments: u32) -> Self {
        Self {
            sphere_segments: sphere_segments.max(3),
            show_spheres: true,
            show_aabbs: true,
            show_obbs: true,
        }
    }

    /// Line segments per circle
    pub fn sphere_segments(&self) -> u32 {
        self.sphere_segments
    }

    /// Draw every active shape of a collider in its current color
    pub fn draw_collider(&self, renderer: &mut dyn LineRenderer, collider: &Collider) {
        let color = collider.color();

        if self.show_spheres && collider.has_shape(ShapeKind::Sphere) {
            self.draw_sphere(renderer, collider.sphere(), color);
        }
        if self.show_aabbs && collider.has_shape(ShapeKind::Aabb) {
            self.draw_aabb(renderer, collider.aabb(), color);
        }
        if self.show_obbs && collider.has_shape(ShapeKind::Obb) {
            self.draw_obb(renderer, collider.obb(), color);
        }
    }

    /// Draw a sphere as circles in the XY, YZ and ZX planes
    pub fn draw_sphere(&self, renderer: &mut dyn LineRenderer, sphere: &Sphere, color: Vec4) {
        let planes = [
            (Vec3::x(), Vec3::y()),
            (Vec3::y(), Vec3::z()),
            (Vec3::z(), Vec3::x()),
        ];
        let step = 2.0 * constants::PI / self.sphere_segments as f32;

        for (u, v) in planes {
            let point_at = |index: u32| {
                let angle = step * index as f32;
                sphere.center + (u * angle.cos() + v * angle.sin()) * sphere.radius
            };
            for index in 0..self.sphere_segments {
                renderer.draw_line(point_at(index), point_at(index + 1), Some(color));
            }
        }
    }

    /// Draw the twelve edges of an AABB
    pub fn draw_aabb(&self, renderer: &mut dyn LineRenderer, aabb: &Aabb, color: Vec4) {
        Self::draw_box_edges(renderer, &aabb.corners(), color);
    }

    /// Draw the twelve edges of an OBB
    pub fn draw_obb(&self, renderer: &mut dyn LineRenderer, obb: &Obb, color: Vec4) {
        Self::draw_box_edges(renderer, &obb.corners(), color);
    }

    fn draw_box_edges(renderer: &mut dyn LineRenderer, corners: &[Vec3; 8], color: Vec4) {
        for (from, to) in BOX_EDGES {
            renderer.draw_line(corners[from], corners[to], Some(color));
        }
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new(16)
    }
}
