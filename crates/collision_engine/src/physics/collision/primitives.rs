//! Primitive collision shapes
//!
//! Value types for the three world-space shape kinds a collider can carry.
//! They are rebuilt every frame from the owner's transform, so none of them
//! cache anything beyond what the intersection tests read.

use crate::foundation::math::{world_axes, Mat3, Mat4, Vec3};

/// A sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &Sphere) -> bool {
        super::intersection::sphere_sphere(self, other)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 0.0)
    }
}

/// An axis-aligned bounding box defined by its min and max corners
///
/// `min` is expected to be component-wise less than or equal to `max`;
/// nothing enforces it, and an inverted box simply never overlaps anything
/// along the inverted axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point (boundary included)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        crate::foundation::math::utils::clamp_vec3(point, self.min, self.max)
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        super::intersection::aabb_aabb(self, other)
    }

    /// The eight corners, bottom face (min z) first
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }
}

/// An oriented bounding box
///
/// The box rotates about `rotation_center` but is sized about `scale_center`,
/// so its effective center is `scale_center` swung around the rotation pivot.
/// That derived point is kept in `scale_center_rotated` and is what the
/// intersection tests treat as the box center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Pivot the box rotates about
    pub rotation_center: Vec3,
    /// Pivot the box is sized about, before rotation
    pub scale_center: Vec3,
    /// Half-extents along each local axis
    pub size: Vec3,
    /// Local X, Y, Z axes in world space; must stay orthonormal
    pub orientations: [Vec3; 3],
    /// `scale_center` rotated about `rotation_center`
    pub scale_center_rotated: Vec3,
}

impl Obb {
    /// Create an OBB, deriving `scale_center_rotated` from the other fields
    pub fn new(rotation_center: Vec3, scale_center: Vec3, size: Vec3, orientations: [Vec3; 3]) -> Self {
        let offset = scale_center - rotation_center;
        let scale_center_rotated = rotation_center
            + orientations[0] * offset.x
            + orientations[1] * offset.y
            + orientations[2] * offset.z;

        Self {
            rotation_center,
            scale_center,
            size,
            orientations,
            scale_center_rotated,
        }
    }

    /// Create an OBB from a rotation matrix whose columns are the local axes
    pub fn from_rotation(rotation_center: Vec3, scale_center: Vec3, size: Vec3, rotation: &Mat3) -> Self {
        let orientations = [
            rotation.column(0).into_owned(),
            rotation.column(1).into_owned(),
            rotation.column(2).into_owned(),
        ];
        Self::new(rotation_center, scale_center, size, orientations)
    }

    /// Create an axis-aligned OBB centered at `center`
    pub fn axis_aligned(center: Vec3, size: Vec3) -> Self {
        Self::new(center, center, size, world_axes())
    }

    /// Effective center of the box
    pub fn center(&self) -> Vec3 {
        self.scale_center_rotated
    }

    /// Rotation matrix whose columns are the local axes
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_columns(&self.orientations)
    }

    /// Local-to-world matrix (rotation then translation to the box center)
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.center()) * self.rotation_matrix().to_homogeneous()
    }

    /// The box expressed in its own local frame
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), self.size)
    }

    /// Tightest world-space AABB enclosing the box
    pub fn bounding_aabb(&self) -> Aabb {
        let extents = Vec3::new(
            self.projected_radius(&Vec3::x()),
            self.projected_radius(&Vec3::y()),
            self.projected_radius(&Vec3::z()),
        );
        Aabb::from_center_extents(self.center(), extents)
    }

    /// Half-length of the box's shadow on `axis`
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        self.orientations
            .iter()
            .zip(self.size.iter())
            .map(|(orientation, half)| orientation.dot(axis).abs() * half)
            .sum()
    }

    /// The eight world-space corners, in the same order as [`Aabb::corners`]
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.center();
        self.local_aabb().corners().map(|local| {
            center
                + self.orientations[0] * local.x
                + self.orientations[1] * local.y
                + self.orientations[2] * local.z
        })
    }

    /// Check if this OBB intersects another OBB
    pub fn intersects(&self, other: &Obb) -> bool {
        super::intersection::obb_obb(self, other)
    }
}

impl Default for Obb {
    fn default() -> Self {
        Self::axis_aligned(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, euler_rotation};
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_center_and_extents() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 2.0, 4.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 1.0, 3.0));
        assert_eq!(aabb.extents(), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_closest_point_clamps_outside_point() {
        let aabb = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let closest = aabb.closest_point(Vec3::new(3.0, 0.5, -2.0));
        assert_eq!(closest, Vec3::new(1.0, 0.5, 0.0));
        assert!(aabb.contains_point(closest));
    }

    #[test]
    fn test_aabb_contains_point_per_axis() {
        let aabb = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(Vec3::new(1.0, 0.0, 1.0)));
        assert!(!aabb.contains_point(Vec3::new(0.5, 1.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(0.5, 0.5, -0.1)));
    }

    #[test]
    fn test_obb_scale_center_rotates_about_pivot() {
        // A quarter turn about Z swings a +X offset onto +Y
        let rotation = euler_rotation(Vec3::new(0.0, 0.0, constants::HALF_PI));
        let obb = Obb::from_rotation(
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            &rotation,
        );
        assert_relative_eq!(obb.center(), Vec3::new(1.0, 3.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_axis_aligned_obb_bounding_aabb() {
        let obb = Obb::axis_aligned(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
        let aabb = obb.bounding_aabb();
        assert_relative_eq!(aabb.min, Vec3::new(1.0, -2.0, -3.0));
        assert_relative_eq!(aabb.max, Vec3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotated_obb_bounding_aabb_grows() {
        let rotation = euler_rotation(Vec3::new(0.0, 0.0, constants::QUARTER_PI));
        let obb = Obb::from_rotation(Vec3::zeros(), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), &rotation);
        let extents = obb.bounding_aabb().extents();
        assert_relative_eq!(extents.x, 2.0_f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(extents.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_obb_corners_match_aabb_when_unrotated() {
        let obb = Obb::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        let aabb = obb.bounding_aabb();
        for (obb_corner, aabb_corner) in obb.corners().iter().zip(aabb.corners().iter()) {
            assert_relative_eq!(*obb_corner, *aabb_corner, epsilon = 1e-6);
        }
    }
}
