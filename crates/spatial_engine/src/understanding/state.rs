//! Scan lifecycle state and playspace statistics

/// Lifecycle of the playspace scan as reported by the understanding service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Understanding has not been set up yet
    None,

    /// Ready to start scanning, no data captured
    ReadyToScan,

    /// Actively scanning the playspace
    Scanning,

    /// A finish request was accepted; the service is finalizing the mesh
    Finishing,

    /// Scanning is complete and queries may be issued
    Done,
}

/// Aggregate surface statistics for the scanned playspace
///
/// Areas are in square meters. The service may report "no data" instead of
/// stats early in the scan; see
/// [`SpatialUnderstanding::query_playspace_stats`](crate::understanding::SpatialUnderstanding::query_playspace_stats).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayspaceStats {
    /// Total scanned surface area
    pub total_surface_area: f32,

    /// Horizontal (floor and table) surface area
    pub horiz_surface_area: f32,

    /// Wall surface area
    pub wall_surface_area: f32,
}
