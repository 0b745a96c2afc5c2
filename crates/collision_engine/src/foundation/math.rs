//! Math utilities and types
//!
//! Provides the fundamental math types used by the collision shapes.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Rotation3,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D rotation type
pub type Rot3 = Rotation3<f32>;

/// Build the rotation matrix for Euler angles in radians.
///
/// Rotation is applied about X first, then Y, then Z. The columns of the
/// returned matrix are the rotated local X, Y and Z axes in world space.
pub fn euler_rotation(euler: Vec3) -> Mat3 {
    Rot3::from_euler_angles(euler.x, euler.y, euler.z).into_inner()
}

/// Unit basis vectors in X, Y, Z order
pub fn world_axes() -> [Vec3; 3] {
    [Vec3::x(), Vec3::y(), Vec3::z()]
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert a vector of Euler angles from degrees to radians
    pub fn euler_deg_to_rad(degrees: Vec3) -> Vec3 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp each component of `point` into `[min, max]`
    pub fn clamp_vec3(point: Vec3, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(min.y, max.y),
            point.z.clamp(min.z, max.z),
        )
    }
}
