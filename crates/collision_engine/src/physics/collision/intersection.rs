//! Pairwise intersection tests
//!
//! Every test treats touching shapes as intersecting. Box-versus-box tests
//! use the Separating Axis Theorem over 15 candidate axes: three face normals
//! from each box plus the nine cross products of those normals.

use super::primitives::{Aabb, Obb, Sphere};
use crate::foundation::math::{world_axes, Vec3};
use nalgebra::Point3;

/// Squared length below which a candidate separating axis is ignored
pub const DEGENERATE_AXIS_EPSILON: f32 = 1.0e-6;

/// Sphere vs sphere: center distance no greater than the radius sum
pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> bool {
    let distance_squared = (a.center - b.center).magnitude_squared();
    let radius_sum = a.radius + b.radius;
    distance_squared <= radius_sum * radius_sum
}

/// AABB vs AABB: the intervals overlap on all three axes
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// AABB vs sphere via the closest point inside the box
pub fn aabb_sphere(aabb: &Aabb, sphere: &Sphere) -> bool {
    let closest = aabb.closest_point(sphere.center);
    (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
}

/// OBB vs sphere
///
/// The sphere center is taken into the box's local frame, where the box is
/// an AABB, and the AABB/sphere test runs there.
pub fn obb_sphere(obb: &Obb, sphere: &Sphere) -> bool {
    let Some(world_to_local) = obb.world_matrix().try_inverse() else {
        log::warn!("OBB frame is not invertible, treating sphere test as a miss");
        return false;
    };

    let local_center = world_to_local
        .transform_point(&Point3::from(sphere.center))
        .coords;
    aabb_sphere(&obb.local_aabb(), &Sphere::new(local_center, sphere.radius))
}

/// OBB vs OBB (SAT)
pub fn obb_obb(a: &Obb, b: &Obb) -> bool {
    boxes_overlap(
        &BoxProjection::from_obb(a),
        &BoxProjection::from_obb(b),
    )
}

/// AABB vs OBB (SAT)
///
/// The AABB contributes the world axes as its face normals.
pub fn aabb_obb(aabb: &Aabb, obb: &Obb) -> bool {
    boxes_overlap(
        &BoxProjection::from_aabb(aabb),
        &BoxProjection::from_obb(obb),
    )
}

/// A box reduced to what SAT needs: center, face normals, half-extents
struct BoxProjection {
    center: Vec3,
    axes: [Vec3; 3],
    half_extents: Vec3,
}

impl BoxProjection {
    fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            axes: world_axes(),
            half_extents: aabb.extents(),
        }
    }

    fn from_obb(obb: &Obb) -> Self {
        Self {
            center: obb.center(),
            axes: obb.orientations,
            half_extents: obb.size,
        }
    }

    fn projected_radius(&self, axis: &Vec3) -> f32 {
        self.axes
            .iter()
            .zip(self.half_extents.iter())
            .map(|(face, half)| face.dot(axis).abs() * half)
            .sum()
    }
}

fn boxes_overlap(a: &BoxProjection, b: &BoxProjection) -> bool {
    let offset = b.center - a.center;

    let overlaps_on = |axis: Vec3| -> bool {
        let length_squared = axis.magnitude_squared();
        if length_squared < DEGENERATE_AXIS_EPSILON {
            // Parallel edges; a face axis already covers this direction
            return true;
        }
        let axis = axis / length_squared.sqrt();
        let distance = offset.dot(&axis).abs();
        a.projected_radius(&axis) + b.projected_radius(&axis) >= distance
    };

    if !a.axes.iter().chain(b.axes.iter()).all(|axis| overlaps_on(*axis)) {
        return false;
    }

    a.axes
        .iter()
        .flat_map(|edge_a| b.axes.iter().map(move |edge_b| edge_a.cross(edge_b)))
        .all(|axis| overlaps_on(axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, euler_rotation, Mat3};

    fn unit_box_at(min: Vec3) -> Aabb {
        Aabb::new(min, min + Vec3::new(1.0, 1.0, 1.0))
    }

    fn rotated_obb(center: Vec3, size: Vec3, euler: Vec3) -> Obb {
        Obb::from_rotation(center, center, size, &euler_rotation(euler))
    }

    #[test]
    fn test_aabb_touching_faces_collide() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(aabb_aabb(&a, &b));
        assert!(aabb_aabb(&b, &a));
    }

    #[test]
    fn test_aabb_commutative() {
        let boxes = [
            unit_box_at(Vec3::zeros()),
            unit_box_at(Vec3::new(0.5, 0.5, 0.5)),
            unit_box_at(Vec3::new(1.01, 0.0, 0.0)),
            Aabb::new(Vec3::new(-3.0, -3.0, -3.0), Vec3::new(3.0, 3.0, 3.0)),
            unit_box_at(Vec3::new(0.0, -2.0, 0.0)),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(aabb_aabb(a, b), aabb_aabb(b, a));
            }
        }
    }

    #[test]
    fn test_aabb_separated_on_single_axis() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(0.0, 0.0, 1.5));
        assert!(!aabb_aabb(&a, &b));
    }

    #[test]
    fn test_sphere_boundary_is_inclusive() {
        let a = Sphere::new(Vec3::zeros(), 1.0);
        let touching = Sphere::new(Vec3::new(3.0, 0.0, 0.0), 2.0);
        let apart = Sphere::new(Vec3::new(3.0 + 1.0e-3, 0.0, 0.0), 2.0);
        assert!(sphere_sphere(&a, &touching));
        assert!(!sphere_sphere(&a, &apart));
    }

    #[test]
    fn test_sphere_matches_distance_rule() {
        let a = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.75);
        for step in 0..40 {
            let x = step as f32 * 0.1;
            let b = Sphere::new(Vec3::new(1.0 + x, 2.0, 3.0), 0.5);
            let expected = (a.center - b.center).magnitude() <= a.radius + b.radius;
            assert_eq!(sphere_sphere(&a, &b), expected, "offset {x}");
        }
    }

    #[test]
    fn test_aabb_sphere_uses_closest_point() {
        let aabb = unit_box_at(Vec3::zeros());
        // Off the corner: per-axis gaps of 0.5 give distance ~0.866
        let near_corner = Sphere::new(Vec3::new(1.5, 1.5, 1.5), 0.8);
        let touching_corner = Sphere::new(Vec3::new(1.5, 1.5, 1.5), 0.9);
        assert!(!aabb_sphere(&aabb, &near_corner));
        assert!(aabb_sphere(&aabb, &touching_corner));
    }

    #[test]
    fn test_aabb_sphere_center_inside_box() {
        let aabb = unit_box_at(Vec3::zeros());
        let sphere = Sphere::new(Vec3::new(0.5, 0.5, 0.5), 0.0);
        assert!(aabb_sphere(&aabb, &sphere));
    }

    #[test]
    fn test_obb_separated_along_x() {
        let size = Vec3::new(1.0, 1.0, 1.0);
        let a = Obb::axis_aligned(Vec3::zeros(), size);
        let apart = Obb::axis_aligned(Vec3::new(2.01, 0.0, 0.0), size);
        let overlapping = Obb::axis_aligned(Vec3::new(1.99, 0.0, 0.0), size);
        assert!(!obb_obb(&a, &apart));
        assert!(obb_obb(&a, &overlapping));
    }

    #[test]
    fn test_obb_rotated_corner_reaches_further() {
        // Rotated 45 degrees about Z, the corner reaches sqrt(2) along X
        let size = Vec3::new(1.0, 1.0, 1.0);
        let a = rotated_obb(Vec3::zeros(), size, Vec3::new(0.0, 0.0, constants::QUARTER_PI));
        let b = Obb::axis_aligned(Vec3::new(2.3, 0.0, 0.0), size);
        let c = Obb::axis_aligned(Vec3::new(2.5, 0.0, 0.0), size);
        assert!(obb_obb(&a, &b));
        assert!(!obb_obb(&a, &c));
    }

    #[test]
    fn test_obb_edge_edge_axis_separates() {
        // Along (1,1,1) every face axis overlaps; only the cross product of
        // A's Y and B's X edges separates the boxes
        let size = Vec3::new(1.0, 1.0, 1.0);
        let about_x = Vec3::new(constants::QUARTER_PI, 0.0, 0.0);
        let about_y = Vec3::new(0.0, constants::QUARTER_PI, 0.0);
        let a = rotated_obb(Vec3::zeros(), size, about_x);
        let separated = rotated_obb(Vec3::new(1.75, 1.75, 1.75), size, about_y);
        let touching = rotated_obb(Vec3::new(1.5, 1.5, 1.5), size, about_y);
        assert!(!obb_obb(&a, &separated));
        assert!(obb_obb(&a, &touching));
    }

    #[test]
    fn test_obb_invariant_under_rigid_rotation() {
        let size_a = Vec3::new(1.0, 0.5, 2.0);
        let size_b = Vec3::new(0.7, 1.2, 0.4);
        let frame = euler_rotation(Vec3::new(0.4, 1.3, -0.8));
        let cases = [
            (Vec3::new(1.5, 0.2, 0.0), Vec3::new(0.0, 0.3, 0.9)),
            (Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.2)),
            (Vec3::new(0.0, 1.0, 2.5), Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.2, 0.2, 0.2)),
        ];

        for (center_b, euler_b) in cases {
            let a = Obb::axis_aligned(Vec3::zeros(), size_a);
            let b = rotated_obb(center_b, size_b, euler_b);

            let rotate = |obb: &Obb| -> Obb {
                let rotation: Mat3 = frame * obb.rotation_matrix();
                let center = frame * obb.center();
                Obb::from_rotation(center, center, obb.size, &rotation)
            };

            assert_eq!(obb_obb(&a, &b), obb_obb(&rotate(&a), &rotate(&b)));
        }
    }

    #[test]
    fn test_obb_sphere_in_local_frame() {
        let obb = rotated_obb(
            Vec3::zeros(),
            Vec3::new(2.0, 0.5, 0.5),
            Vec3::new(0.0, 0.0, constants::HALF_PI),
        );
        // Long axis now points along world Y
        let along_long_axis = Sphere::new(Vec3::new(0.0, 2.4, 0.0), 0.5);
        let along_short_axis = Sphere::new(Vec3::new(2.4, 0.0, 0.0), 0.5);
        assert!(obb_sphere(&obb, &along_long_axis));
        assert!(!obb_sphere(&obb, &along_short_axis));
    }

    #[test]
    fn test_obb_sphere_uses_rotated_scale_center() {
        let rotation = euler_rotation(Vec3::new(0.0, 0.0, constants::HALF_PI));
        let obb = Obb::from_rotation(
            Vec3::zeros(),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            &rotation,
        );
        assert!(obb_sphere(&obb, &Sphere::new(Vec3::new(0.0, 5.0, 0.0), 0.1)));
        assert!(!obb_sphere(&obb, &Sphere::new(Vec3::new(5.0, 0.0, 0.0), 0.1)));
    }

    #[test]
    fn test_aabb_obb_identity_matches_aabb_aabb() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let size = Vec3::new(0.5, 1.0, 1.5);
        for step in -10..=10 {
            let center = Vec3::new(step as f32 * 0.25, 0.3, -0.2);
            let obb = Obb::axis_aligned(center, size);
            let equivalent = Aabb::from_center_extents(center, size);
            assert_eq!(
                aabb_obb(&aabb, &obb),
                aabb_aabb(&aabb, &equivalent),
                "center {center:?}"
            );
        }
    }

    #[test]
    fn test_aabb_obb_rotated_box() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let size = Vec3::new(1.0, 1.0, 1.0);
        let euler = Vec3::new(0.0, 0.0, constants::QUARTER_PI);
        let reaching = rotated_obb(Vec3::new(2.3, 0.0, 0.0), size, euler);
        let short = rotated_obb(Vec3::new(2.5, 0.0, 0.0), size, euler);
        assert!(aabb_obb(&aabb, &reaching));
        assert!(!aabb_obb(&aabb, &short));
    }

    #[test]
    fn test_degenerate_axes_are_skipped() {
        // Identical orientations make every cross product zero
        let a = Obb::axis_aligned(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Obb::axis_aligned(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 1.0, 1.0));
        assert!(obb_obb(&a, &b));
    }
}
