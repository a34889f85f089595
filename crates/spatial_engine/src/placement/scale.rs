//! Proportional scale fitting
//!
//! Shrinks (or grows) an object uniformly so its most oversized axis
//! matches a desired footprint, preserving proportions.

use crate::foundation::math::Vec3;
use crate::scene::Aabb;

/// Compute the uniform scale factor that fits `bounds` into `desired`.
///
/// For each bounding box the axis with the largest `current - desired`
/// difference is selected and the ratio `desired / current` on that axis
/// alone becomes the candidate factor; the smallest candidate across all
/// boxes wins. Ties between axes resolve with priority x > y > z: the z
/// branch takes every tie, including the all-equal case.
///
/// A zero component on the selected axis yields an infinite ratio. Callers
/// own validation; degenerate bounds are passed through unguarded.
pub fn proportional_fit(bounds: &[Aabb], desired: Vec3) -> f32 {
    let mut max_scale = f32::MAX;

    for aabb in bounds {
        let current = aabb.size();
        let difference = current - desired;

        let ratio = if difference.x > difference.y && difference.x > difference.z {
            desired.x / current.x
        } else if difference.y > difference.x && difference.y > difference.z {
            desired.y / current.y
        } else {
            desired.z / current.z
        };

        if ratio < max_scale {
            max_scale = ratio;
        }
    }

    max_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds_of_size(size: Vec3) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), size * 0.5)
    }

    #[test]
    fn test_all_axes_equal_ties_to_z_branch() {
        let bounds = bounds_of_size(Vec3::new(2.0, 2.0, 2.0));
        let factor = proportional_fit(&[bounds], Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(factor, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_widest_axis_wins() {
        let bounds = bounds_of_size(Vec3::new(4.0, 1.0, 1.0));
        let factor = proportional_fit(&[bounds], Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(factor, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_tallest_axis_wins() {
        let bounds = bounds_of_size(Vec3::new(1.0, 8.0, 1.0));
        let factor = proportional_fit(&[bounds], Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(factor, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_pure_function_is_idempotent() {
        let bounds = bounds_of_size(Vec3::new(3.0, 2.0, 1.0));
        let desired = Vec3::new(1.5, 1.5, 1.5);

        let first = proportional_fit(&[bounds], desired);
        let second = proportional_fit(&[bounds], desired);
        assert_eq!(first, second);
    }

    #[test]
    fn test_minimum_ratio_across_multiple_bounds() {
        let small = bounds_of_size(Vec3::new(2.0, 2.0, 2.0));
        let large = bounds_of_size(Vec3::new(8.0, 2.0, 2.0));

        let factor = proportional_fit(&[small, large], Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(factor, 0.25, epsilon = 1e-6);
    }
}
