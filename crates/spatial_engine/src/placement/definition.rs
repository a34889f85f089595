//! Request and response shapes for placement queries

use crate::foundation::math::Vec3;

/// Surface class an object may be placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSurface {
    /// Horizontal floor surfaces
    Floor,

    /// Vertical wall surfaces
    Wall,

    /// Ceiling surfaces
    Ceiling,
}

/// Footprint and surface class requested for one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementDefinition {
    /// Surface class to search
    pub surface: PlacementSurface,

    /// Half-dimensions of the object's bounding box
    pub half_dims: Vec3,
}

impl PlacementDefinition {
    /// Definition for an object standing on the floor
    pub fn on_floor(half_dims: Vec3) -> Self {
        Self {
            surface: PlacementSurface::Floor,
            half_dims,
        }
    }

    /// Definition for an object mounted on a wall
    pub fn on_wall(half_dims: Vec3) -> Self {
        Self {
            surface: PlacementSurface::Wall,
            half_dims,
        }
    }
}

/// Hard rule a candidate pose must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementRule {
    /// Keep at least `min_distance` away from every previously placed object
    AwayFromOtherObjects {
        /// Minimum separation distance
        min_distance: f32,
    },

    /// Keep at least `min_distance` away from a fixed position
    AwayFromPosition {
        /// Position to avoid
        position: Vec3,

        /// Minimum separation distance
        min_distance: f32,
    },
}

/// Soft preference used to rank candidate poses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementConstraint {
    /// Prefer poses near the center of the playspace
    NearCenter,

    /// Prefer poses near a fixed point
    NearPoint(Vec3),
}

/// One accepted pose returned by the solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedPlacement {
    /// Center position of the placed bounding box
    pub position: Vec3,

    /// Normal of the surface the object rests against
    pub normal: Vec3,
}
