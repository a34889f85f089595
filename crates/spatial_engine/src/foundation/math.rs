//! Math utilities and types
//!
//! Provides the fundamental math types for spatial reasoning: vectors,
//! quaternions, and the transform used to pose placed props.

pub use nalgebra::{Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA debug colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build the rotation that orients an object's forward (+Z) axis along
/// `forward`, keeping `up` as the secondary reference axis.
///
/// This is the orientation applied to placed props: the solver's surface
/// normal becomes the forward axis, world up the reference. A reference axis
/// parallel to `forward` (the floor case, where both are +Y) falls back to
/// +Z so the result is always a valid rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let reference = if forward.cross(&up).norm_squared() < 1e-6 {
        Vec3::z()
    } else {
        up
    };
    Quat::face_towards(&forward, &reference)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from position, rotation, and scale
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Combine this transform with a child transform (parent * child)
    pub fn combine(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * self.scale.component_mul(&child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_rotation_aligns_forward() {
        let rotation = look_rotation(Vec3::x(), Vec3::y());
        let forward = rotation * Vec3::z();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(forward.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_rotation_degenerate_up() {
        // Floor normals point along world up; the fallback axis keeps the
        // rotation finite.
        let rotation = look_rotation(Vec3::y(), Vec3::y());
        let forward = rotation * Vec3::z();
        assert!(forward.iter().all(|c| c.is_finite()));
        assert_relative_eq!(forward.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_combine_scales_child_position() {
        let parent = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::identity(),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));

        let combined = parent.combine(&child);
        assert_relative_eq!(combined.position.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(combined.scale.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_matrix_applies_translation_and_scale() {
        let transform = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::identity(),
            Vec3::new(2.0, 2.0, 2.0),
        );

        let point = transform
            .to_matrix()
            .transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(point.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(point.z, 3.0, epsilon = 1e-5);
    }
}
