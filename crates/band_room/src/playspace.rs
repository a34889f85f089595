//! Simulated playspace
//!
//! Stands in for the device-side scanning and placement stack: a
//! rectangular room whose scanned surface area grows over time, plus a
//! floor-grid placement solver that honors avoidance rules and remembers
//! what it already placed. One instance backs all three service traits so
//! the composition root can hand out `Arc` clones of a single object.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spatial_engine::placement::{
    PlacementConstraint, PlacementDefinition, PlacementError, PlacementRule, PlacementSolver,
    PlacementSurface, SolvedPlacement,
};
use spatial_engine::prelude::Vec3;
use spatial_engine::understanding::{
    PlayspaceStats, ScanState, SpatialUnderstanding, UnderstandingMesh,
};

use crate::config::RoomConfig;

/// Frames the simulation spends in `Finishing` before reporting `Done`
const FINISH_FRAMES: u32 = 3;

/// Candidate grid spacing across the floor, in meters
const GRID_STEP: f32 = 0.5;

struct Inner {
    scan_state: ScanState,
    stats: PlayspaceStats,
    finish_countdown: u32,
    draw_mesh: bool,
    solver_ready: bool,
    placed: Vec<Vec3>,
    rng: StdRng,
}

/// Simulated scanning device and placement solver
pub struct SimulatedPlayspace {
    allow: bool,
    half_extents: Vec3,
    scan_rate: f32,
    inner: Mutex<Inner>,
}

impl SimulatedPlayspace {
    /// Create a playspace from room settings
    pub fn new(config: &RoomConfig) -> Self {
        Self {
            allow: config.allow_spatial_understanding,
            half_extents: config.half_extents,
            scan_rate: config.scan_rate,
            inner: Mutex::new(Inner {
                scan_state: ScanState::ReadyToScan,
                stats: PlayspaceStats::default(),
                finish_countdown: 0,
                draw_mesh: true,
                solver_ready: false,
                placed: Vec::new(),
                rng: StdRng::seed_from_u64(config.seed),
            }),
        }
    }

    /// Advance the simulation by one frame
    pub fn step(&self, delta_time: f32) {
        let mut inner = self.inner.lock().expect("playspace lock");

        match inner.scan_state {
            ScanState::ReadyToScan => inner.scan_state = ScanState::Scanning,
            ScanState::Scanning => {
                // Coverage grows unevenly, like a person sweeping a headset
                // around a room
                let jitter = inner.rng.gen_range(0.5..1.5);
                let gained = self.scan_rate * delta_time * jitter;
                inner.stats.total_surface_area += gained;
                inner.stats.horiz_surface_area += gained * 0.5;
                inner.stats.wall_surface_area += gained * 0.3;
            }
            ScanState::Finishing => {
                inner.finish_countdown = inner.finish_countdown.saturating_sub(1);
                if inner.finish_countdown == 0 {
                    log::info!("Playspace scan finalized");
                    inner.scan_state = ScanState::Done;
                }
            }
            ScanState::None | ScanState::Done => {}
        }
    }

    /// Whether the processed mesh is currently drawn
    pub fn draws_processed_mesh(&self) -> bool {
        self.inner.lock().expect("playspace lock").draw_mesh
    }

    fn satisfies_rules(candidate: Vec3, placed: &[Vec3], rules: &[PlacementRule]) -> bool {
        rules.iter().all(|rule| match rule {
            PlacementRule::AwayFromOtherObjects { min_distance } => placed
                .iter()
                .all(|other| (candidate - other).norm() >= *min_distance),
            PlacementRule::AwayFromPosition {
                position,
                min_distance,
            } => (candidate - position).norm() >= *min_distance,
        })
    }

    fn constraint_score(candidate: Vec3, constraints: &[PlacementConstraint]) -> f32 {
        constraints
            .iter()
            .map(|constraint| match constraint {
                PlacementConstraint::NearCenter => -candidate.norm(),
                PlacementConstraint::NearPoint(point) => -(candidate - point).norm(),
            })
            .sum()
    }
}

impl SpatialUnderstanding for SimulatedPlayspace {
    fn allow_spatial_understanding(&self) -> bool {
        self.allow
    }

    fn scan_state(&self) -> ScanState {
        self.inner.lock().expect("playspace lock").scan_state
    }

    fn request_finish_scan(&self) {
        let mut inner = self.inner.lock().expect("playspace lock");
        if inner.scan_state == ScanState::Scanning {
            log::info!("Finish scan requested");
            inner.scan_state = ScanState::Finishing;
            inner.finish_countdown = FINISH_FRAMES;
        }
    }

    fn query_playspace_stats(&self) -> Option<PlayspaceStats> {
        let inner = self.inner.lock().expect("playspace lock");
        // No data until the scan has captured something
        if inner.stats.total_surface_area <= 0.0 {
            return None;
        }
        Some(inner.stats)
    }
}

impl UnderstandingMesh for SimulatedPlayspace {
    fn set_draw_processed_mesh(&self, draw: bool) {
        self.inner.lock().expect("playspace lock").draw_mesh = draw;
    }
}

impl PlacementSolver for SimulatedPlayspace {
    fn init(&self) -> Result<(), PlacementError> {
        let mut inner = self.inner.lock().expect("playspace lock");
        if !self.allow {
            return Err(PlacementError::Unavailable(
                "understanding disabled for this session".into(),
            ));
        }
        inner.solver_ready = true;
        Ok(())
    }

    fn place_object(
        &self,
        name: &str,
        definition: &PlacementDefinition,
        rules: &[PlacementRule],
        constraints: &[PlacementConstraint],
    ) -> Option<SolvedPlacement> {
        let mut inner = self.inner.lock().expect("playspace lock");
        if !inner.solver_ready {
            log::warn!("place_object({name}) before solver init");
            return None;
        }

        // Only floor placement is modeled
        if definition.surface != PlacementSurface::Floor {
            return None;
        }

        let half = definition.half_dims;
        let max_x = self.half_extents.x - half.x;
        let max_z = self.half_extents.z - half.z;
        if max_x < 0.0 || max_z < 0.0 {
            return None;
        }

        let mut best: Option<(f32, Vec3)> = None;
        let mut x = -max_x;
        while x <= max_x {
            let mut z = -max_z;
            while z <= max_z {
                // Box center resting on the floor
                let candidate = Vec3::new(x, half.y, z);
                if Self::satisfies_rules(candidate, &inner.placed, rules) {
                    let score = Self::constraint_score(candidate, constraints);
                    if best.map_or(true, |(best_score, _)| score > best_score) {
                        best = Some((score, candidate));
                    }
                }
                z += GRID_STEP;
            }
            x += GRID_STEP;
        }

        let (_, position) = best?;
        inner.placed.push(position);
        log::debug!("Solved {name} at ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);

        Some(SolvedPlacement {
            position,
            normal: Vec3::y(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> RoomConfig {
        RoomConfig {
            half_extents: Vec3::new(4.0, 1.5, 3.0),
            allow_spatial_understanding: true,
            scan_rate: 10.0,
            seed: 42,
        }
    }

    #[test]
    fn test_scan_progresses_to_done() {
        let playspace = SimulatedPlayspace::new(&test_room());
        assert_eq!(playspace.scan_state(), ScanState::ReadyToScan);
        assert_eq!(playspace.query_playspace_stats(), None);

        playspace.step(0.016);
        assert_eq!(playspace.scan_state(), ScanState::Scanning);

        for _ in 0..10 {
            playspace.step(0.016);
        }
        let stats = playspace.query_playspace_stats().expect("stats after scanning");
        assert!(stats.total_surface_area > 0.0);
        assert!(stats.horiz_surface_area > 0.0);
        assert!(stats.wall_surface_area > 0.0);

        playspace.request_finish_scan();
        assert_eq!(playspace.scan_state(), ScanState::Finishing);

        for _ in 0..FINISH_FRAMES {
            playspace.step(0.016);
        }
        assert_eq!(playspace.scan_state(), ScanState::Done);
    }

    #[test]
    fn test_solver_requires_init() {
        let playspace = SimulatedPlayspace::new(&test_room());
        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.5, 0.5));

        assert!(playspace.place_object("cube0", &definition, &[], &[]).is_none());

        playspace.init().unwrap();
        assert!(playspace.place_object("cube0", &definition, &[], &[]).is_some());
    }

    #[test]
    fn test_floor_placement_rests_on_floor() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.7, 0.5));
        let solved = playspace.place_object("cube0", &definition, &[], &[]).unwrap();

        assert_eq!(solved.position.y, 0.7);
        assert_eq!(solved.normal, Vec3::y());
    }

    #[test]
    fn test_away_from_other_objects_rule_respected() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.5, 0.5));
        let rules = [PlacementRule::AwayFromOtherObjects { min_distance: 2.0 }];

        let first = playspace.place_object("cube0", &definition, &rules, &[]).unwrap();
        let second = playspace.place_object("cube1", &definition, &rules, &[]).unwrap();

        let separation = (first.position - second.position).norm();
        assert!(separation >= 2.0, "separation {separation} below rule distance");
    }

    #[test]
    fn test_away_from_position_rule_respected() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let keep_out = Vec3::new(0.0, 0.5, 0.0);
        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.5, 0.5));
        let rules = [PlacementRule::AwayFromPosition {
            position: keep_out,
            min_distance: 2.0,
        }];
        // NearCenter pulls toward the keep-out point; the rule must win
        let solved = playspace
            .place_object("cube0", &definition, &rules, &[PlacementConstraint::NearCenter])
            .unwrap();

        assert!((solved.position - keep_out).norm() >= 2.0);
    }

    #[test]
    fn test_near_point_constraint_prefers_point() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let target = Vec3::new(2.0, 0.5, 1.0);
        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.5, 0.5));
        let solved = playspace
            .place_object("cube0", &definition, &[], &[PlacementConstraint::NearPoint(target)])
            .unwrap();

        assert!((solved.position - target).norm() < GRID_STEP);
    }

    #[test]
    fn test_near_center_constraint_prefers_origin() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let definition = PlacementDefinition::on_floor(Vec3::new(0.5, 0.5, 0.5));
        let solved = playspace
            .place_object("cube0", &definition, &[], &[PlacementConstraint::NearCenter])
            .unwrap();

        assert!(solved.position.x.abs() < GRID_STEP);
        assert!(solved.position.z.abs() < GRID_STEP);
    }

    #[test]
    fn test_wall_placement_unsupported() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let definition = PlacementDefinition::on_wall(Vec3::new(0.5, 0.5, 0.1));
        assert!(playspace.place_object("poster0", &definition, &[], &[]).is_none());
    }

    #[test]
    fn test_oversized_footprint_fails() {
        let playspace = SimulatedPlayspace::new(&test_room());
        playspace.init().unwrap();

        let definition = PlacementDefinition::on_floor(Vec3::new(10.0, 0.5, 10.0));
        assert!(playspace.place_object("stage0", &definition, &[], &[]).is_none());
    }
}
