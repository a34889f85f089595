//! Spatial understanding service boundary
//!
//! The device-side scanning pipeline (mesh reconstruction, playspace
//! statistics, scan lifecycle) is an opaque collaborator. This module
//! defines the state it reports and the trait through which applications
//! reach it, so a simulated playspace can stand in for the real device in
//! tests and demos.

mod service;
mod state;

pub use service::{SpatialUnderstanding, UnderstandingMesh};
pub use state::{PlayspaceStats, ScanState};
