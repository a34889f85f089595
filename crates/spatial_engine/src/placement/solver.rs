//! Placement solver trait and errors

use thiserror::Error;

use crate::placement::{PlacementConstraint, PlacementDefinition, PlacementRule, SolvedPlacement};

/// Constraint solver searching the scanned playspace for valid poses
///
/// Implementations are shared between the frame loop and the background
/// placement worker, so the trait requires `Send + Sync` and takes `&self`.
pub trait PlacementSolver: Send + Sync {
    /// Initialize the solver
    ///
    /// Must be called once before the first [`Self::place_object`] call.
    /// Subsequent calls are allowed and must be no-ops.
    fn init(&self) -> Result<(), PlacementError>;

    /// Search for one pose satisfying the definition and rules
    ///
    /// `name` identifies the query for the solver's internal bookkeeping
    /// (placed objects are remembered for later avoidance rules). Returns
    /// `None` when no valid pose exists; such queries are simply skipped by
    /// callers.
    fn place_object(
        &self,
        name: &str,
        definition: &PlacementDefinition,
        rules: &[PlacementRule],
        constraints: &[PlacementConstraint],
    ) -> Option<SolvedPlacement>;
}

/// Placement subsystem errors
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Solver initialization failed
    #[error("Solver initialization failed: {0}")]
    InitFailed(String),

    /// The understanding service is not available in this session
    #[error("Spatial understanding unavailable: {0}")]
    Unavailable(String),
}
