//! Scan completion monitoring
//!
//! Polls the understanding service once per frame and decides when enough
//! of the room has been scanned. Both outward transitions fire at most once
//! per session; the state enum makes re-firing unrepresentable.

use std::sync::Arc;

use spatial_engine::understanding::{ScanState, SpatialUnderstanding};

use crate::config::ScanConfig;

/// Lifecycle of the monitor itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Waiting for the service to start scanning
    Idle,

    /// Service is scanning; completion thresholds are checked every frame
    Scanning,

    /// Finish was requested; waiting for the service to report done
    FinishRequested,

    /// Scene population has been triggered; the monitor is done
    Populated,
}

/// One-shot events produced by [`ScanMonitor::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// Enough surface area was scanned; finish was requested from the service
    FinishRequested,

    /// The service finished the scan; the scene should be created now
    ScanComplete,
}

/// Per-frame scan watcher
pub struct ScanMonitor {
    understanding: Arc<dyn SpatialUnderstanding>,
    thresholds: ScanConfig,
    phase: ScanPhase,
}

impl ScanMonitor {
    /// Create a monitor over an understanding service
    pub fn new(understanding: Arc<dyn SpatialUnderstanding>, thresholds: ScanConfig) -> Self {
        Self {
            understanding,
            thresholds,
            phase: ScanPhase::Idle,
        }
    }

    /// Current monitor phase
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Poll the service; returns at most one event per call
    ///
    /// [`ScanEvent::FinishRequested`] and [`ScanEvent::ScanComplete`] are
    /// each returned exactly once across the session, in that order.
    pub fn poll(&mut self) -> Option<ScanEvent> {
        match self.phase {
            ScanPhase::Idle | ScanPhase::Scanning => {
                if self.phase == ScanPhase::Idle
                    && self.understanding.scan_state() == ScanState::Scanning
                {
                    log::info!("Playspace scan started");
                    self.phase = ScanPhase::Scanning;
                }

                if self.meets_min_bar_for_completion() {
                    // Let the service know we're done scanning
                    self.understanding.request_finish_scan();
                    self.phase = ScanPhase::FinishRequested;
                    return Some(ScanEvent::FinishRequested);
                }
                None
            }
            ScanPhase::FinishRequested => {
                if self.understanding.scan_state() == ScanState::Done {
                    self.phase = ScanPhase::Populated;
                    Some(ScanEvent::ScanComplete)
                } else {
                    None
                }
            }
            ScanPhase::Populated => None,
        }
    }

    /// Whether enough of the room has been scanned
    ///
    /// True only while the service is actively scanning with understanding
    /// allowed, and ANY of the three area thresholds is exceeded. A stats
    /// query with no data counts as "not yet complete" and is retried on a
    /// later frame.
    fn meets_min_bar_for_completion(&self) -> bool {
        if self.understanding.scan_state() != ScanState::Scanning
            || !self.understanding.allow_spatial_understanding()
        {
            return false;
        }

        let Some(stats) = self.understanding.query_playspace_stats() else {
            return false;
        };

        stats.total_surface_area > self.thresholds.min_area_for_complete
            || stats.horiz_surface_area > self.thresholds.min_horiz_area_for_complete
            || stats.wall_surface_area > self.thresholds.min_wall_area_for_complete
    }
}
