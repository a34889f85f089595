//! Placement query construction

use spatial_engine::placement::{PlacementConstraint, PlacementDefinition, PlacementRule};
use spatial_engine::prelude::Vec3;

use crate::components::InstrumentKind;

/// One placement request for the solver
///
/// Immutable once constructed; the placer turns each query into a single
/// solver call.
#[derive(Debug, Clone)]
pub struct PlacementQuery {
    /// Footprint and surface class handed to the solver
    pub definition: PlacementDefinition,

    /// Full bounding dimensions of the requested footprint
    pub dimensions: Vec3,

    /// Which instrument this query places
    pub kind: InstrumentKind,

    /// Hard rules candidate poses must satisfy
    pub rules: Vec<PlacementRule>,

    /// Soft preferences used to rank candidates
    pub constraints: Vec<PlacementConstraint>,
}

/// Separation distance for the away-from-other-objects rule
///
/// A buffer scaled to the object: three times the larger of the footprint's
/// half width and half depth.
pub fn avoidance_distance(full_dims: Vec3) -> f32 {
    let half_dims = full_dims * 0.5;
    if half_dims.x > half_dims.z {
        half_dims.x * 3.0
    } else {
        half_dims.z * 3.0
    }
}

/// Build floor-placement queries for `count` instruments of one kind
///
/// Every query carries the same footprint and a single avoidance rule; the
/// constraint list is empty today but flows through to the solver.
pub fn queries_for_kind(count: usize, full_dims: Vec3, kind: InstrumentKind) -> Vec<PlacementQuery> {
    let half_dims = full_dims * 0.5;
    let distance_from_other_objects = avoidance_distance(full_dims);

    (0..count)
        .map(|_| PlacementQuery {
            definition: PlacementDefinition::on_floor(half_dims),
            dimensions: full_dims,
            kind,
            rules: vec![PlacementRule::AwayFromOtherObjects {
                min_distance: distance_from_other_objects,
            }],
            constraints: Vec::new(),
        })
        .collect()
}
