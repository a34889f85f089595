//! Debug drawing primitives and system
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing facilities allow programmers to render simple shapes like
//! lines, points, spheres and boxes for debugging and visualization purposes."
//!
//! Accepted placement boxes are the main client: each one is registered as
//! a persistent wireframe box and expanded into edge segments for whatever
//! line renderer the host provides.

use std::collections::HashMap;

use crate::foundation::math::{Quat, Vec3, Vec4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
        /// RGBA color
        color: Vec4,
        /// Remaining lifetime in seconds
        duration: f32,
    },

    /// Oriented box at center with half-extents
    Box {
        /// Box center
        center: Vec3,
        /// Half-extents per axis
        extents: Vec3,
        /// Box orientation
        rotation: Quat,
        /// RGBA color
        color: Vec4,
        /// Remaining lifetime in seconds
        duration: f32,
    },
}

impl DebugShape {
    /// Decrease duration by delta_time, returns true if expired
    fn tick(&mut self, delta_time: f32) -> bool {
        let duration = match self {
            DebugShape::Line { duration, .. } | DebugShape::Box { duration, .. } => duration,
        };
        *duration -= delta_time;
        *duration <= 0.0
    }

    /// Expand this shape into line segments for a wireframe renderer
    ///
    /// A box contributes its 12 edges; a line contributes itself.
    pub fn edge_segments(&self) -> Vec<(Vec3, Vec3)> {
        match self {
            DebugShape::Line { start, end, .. } => vec![(*start, *end)],
            DebugShape::Box {
                center,
                extents,
                rotation,
                ..
            } => {
                let corner = |x: f32, y: f32, z: f32| {
                    center + rotation * Vec3::new(x * extents.x, y * extents.y, z * extents.z)
                };

                // Eight corners, indexed by sign of each axis
                let c = [
                    corner(-1.0, -1.0, -1.0),
                    corner(1.0, -1.0, -1.0),
                    corner(1.0, 1.0, -1.0),
                    corner(-1.0, 1.0, -1.0),
                    corner(-1.0, -1.0, 1.0),
                    corner(1.0, -1.0, 1.0),
                    corner(1.0, 1.0, 1.0),
                    corner(-1.0, 1.0, 1.0),
                ];

                // Bottom face, top face, verticals
                const EDGES: [(usize, usize); 12] = [
                    (0, 1), (1, 2), (2, 3), (3, 0),
                    (4, 5), (5, 6), (6, 7), (7, 4),
                    (0, 4), (1, 5), (2, 6), (3, 7),
                ];

                EDGES.iter().map(|&(a, b)| (c[a], c[b])).collect()
            }
        }
    }
}

/// Debug drawing system for rendering debug shapes
///
/// GEA 10.2: "Debug rendering systems typically support both temporary shapes
/// (which expire after a certain time) and persistent shapes (which remain
/// until explicitly removed)."
pub struct DebugDrawSystem {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.push(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Draw an oriented box that persists until explicitly removed
    pub fn draw_persistent_box(
        &mut self,
        id: impl Into<DebugShapeId>,
        center: Vec3,
        extents: Vec3,
        rotation: Quat,
        color: Vec4,
    ) {
        if !self.enabled {
            return;
        }

        self.persistent_shapes.insert(
            id.into(),
            DebugShape::Box {
                center,
                extents,
                rotation,
                color,
                duration: f32::INFINITY,
            },
        );
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering (both temporary and persistent)
    pub fn shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_shape_expiration() {
        let mut system = DebugDrawSystem::new();

        system.draw_line(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            1.0,
        );
        assert_eq!(system.shape_count(), 1);

        system.update(0.5);
        assert_eq!(system.shape_count(), 1);

        system.update(0.6);
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_line_expands_to_itself() {
        let shape = DebugShape::Line {
            start: Vec3::zeros(),
            end: Vec3::new(0.0, 2.0, 0.0),
            color: Vec4::new(0.0, 1.0, 0.0, 1.0),
            duration: 1.0,
        };

        let edges = shape.edge_segments();
        assert_eq!(edges, vec![(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0))]);
    }

    #[test]
    fn test_persistent_boxes_survive_updates() {
        let mut system = DebugDrawSystem::new();

        system.draw_persistent_box(
            "placement0",
            Vec3::zeros(),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(system.shape_count(), 1);

        for _ in 0..100 {
            system.update(1.0);
        }
        assert_eq!(system.shape_count(), 1);

        system.clear_persistent("placement0");
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_box_expands_to_twelve_edges() {
        let shape = DebugShape::Box {
            center: Vec3::new(1.0, 2.0, 3.0),
            extents: Vec3::new(0.5, 0.5, 0.5),
            rotation: Quat::identity(),
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            duration: f32::INFINITY,
        };

        let edges = shape.edge_segments();
        assert_eq!(edges.len(), 12);

        // Every edge of an axis-aligned unit box has length 1
        for (start, end) in edges {
            let length = (end - start).norm();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_disabled_system_records_nothing() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;

        system.draw_line(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            1.0,
        );
        assert_eq!(system.shape_count(), 0);
    }
}
