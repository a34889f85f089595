//! Scene state for placed props
//!
//! Holds what the session actually produces: prop instances posed in the
//! playspace. There is no renderer here; the scene is the in-memory
//! artifact consumers read back.

mod bounds;
mod prop;

pub use bounds::Aabb;
pub use prop::{PropInstance, PropKey, PropRegistry};
