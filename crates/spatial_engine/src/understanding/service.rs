//! Service traits for the device-side understanding pipeline
//!
//! Implementations wrap whatever actually performs the scan (device
//! runtime, simulation, test double). Methods take `&self`: real backends
//! sit on top of their own synchronization, and handles are shared across
//! the frame loop and placement worker threads via `Arc`.

use crate::understanding::{PlayspaceStats, ScanState};

/// Access to the scanning service of the playspace
pub trait SpatialUnderstanding: Send + Sync {
    /// Whether spatial understanding is enabled for this session
    ///
    /// When false, scan completion is never detected and scene creation is
    /// a no-op.
    fn allow_spatial_understanding(&self) -> bool;

    /// Current scan lifecycle state
    fn scan_state(&self) -> ScanState;

    /// Ask the service to stop scanning and finalize the playspace
    ///
    /// The transition to [`ScanState::Done`] is asynchronous; callers keep
    /// polling [`Self::scan_state`].
    fn request_finish_scan(&self);

    /// Query aggregate surface statistics
    ///
    /// Returns `None` while the service has no data yet. Callers treat that
    /// as "not yet complete" and retry on a later frame.
    fn query_playspace_stats(&self) -> Option<PlayspaceStats>;
}

/// Control over the scanned-mesh visualization
///
/// Kept separate from [`SpatialUnderstanding`]: mesh drawing belongs to the
/// host renderer, and the placement pipeline only ever flips it off once
/// placement is finished (enabling occlusion).
pub trait UnderstandingMesh: Send + Sync {
    /// Show or hide the processed playspace mesh
    fn set_draw_processed_mesh(&self, draw: bool);
}
