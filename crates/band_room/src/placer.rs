//! Placement pipeline
//!
//! Turns placement queries into posed instruments: builds the queries,
//! submits them to the solver (on a worker thread when enabled), then
//! drains at most one accepted pose per frame into the scene. Results
//! travel through a bounded channel; query completion is a single atomic
//! flag written once by the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread;

use spatial_engine::debug::DebugDrawSystem;
use spatial_engine::placement::{
    proportional_fit, PlacementError, PlacementSolver, SolvedPlacement,
};
use spatial_engine::prelude::{look_rotation, Transform, Vec3, Vec4};
use spatial_engine::scene::{PropInstance, PropKey, PropRegistry};
use spatial_engine::understanding::{SpatialUnderstanding, UnderstandingMesh};

use crate::components::{InstrumentKind, InstrumentPrefab};
use crate::config::PlacementSetupConfig;
use crate::query::{queries_for_kind, PlacementQuery};

/// One accepted solver response, queued until its frame comes up
#[derive(Debug, Clone)]
pub struct PlacementResult {
    /// Pose returned by the solver
    pub placement: SolvedPlacement,

    /// Full bounding dimensions that were requested
    pub dimensions: Vec3,

    /// Which instrument to instantiate
    pub kind: InstrumentKind,
}

/// Places instruments in the scanned playspace
pub struct ObjectPlacer {
    understanding: Arc<dyn SpatialUnderstanding>,
    mesh: Arc<dyn UnderstandingMesh>,
    solver: Arc<dyn PlacementSolver>,
    prefab: InstrumentPrefab,
    settings: PlacementSetupConfig,

    solver_ready: bool,
    root: Option<PropKey>,
    results: Option<Receiver<PlacementResult>>,
    queries_done: Arc<AtomicBool>,
    mesh_hidden: bool,
    placed: Vec<PropKey>,
}

impl ObjectPlacer {
    /// Create a placer over the given services
    pub fn new(
        understanding: Arc<dyn SpatialUnderstanding>,
        mesh: Arc<dyn UnderstandingMesh>,
        solver: Arc<dyn PlacementSolver>,
        prefab: InstrumentPrefab,
        settings: PlacementSetupConfig,
    ) -> Self {
        Self {
            understanding,
            mesh,
            solver,
            prefab,
            settings,
            solver_ready: false,
            root: None,
            results: None,
            queries_done: Arc::new(AtomicBool::new(false)),
            mesh_hidden: false,
            placed: Vec::new(),
        }
    }

    /// Spawn the placer's own scene node; placed instruments parent to it
    pub fn attach(&mut self, scene: &mut PropRegistry) {
        let root = scene.spawn(PropInstance::new("object_placer", Transform::identity()));
        self.root = Some(root);
    }

    /// Keys of every instrument placed so far
    pub fn placed(&self) -> &[PropKey] {
        &self.placed
    }

    /// Whether all submitted queries have been solved and drained
    pub fn is_idle(&self) -> bool {
        self.queries_done.load(Ordering::Acquire) && self.results.is_none()
    }

    /// Build queries for the configured footprint and hand them to the solver
    ///
    /// No-op when spatial understanding is not allowed. The solver is
    /// initialized on the first effective call.
    pub fn create_scene(&mut self) -> Result<(), PlacementError> {
        log::info!("Create scene");
        // Only if we're enabled
        if !self.understanding.allow_spatial_understanding() {
            return Ok(());
        }

        if !self.solver_ready {
            self.solver.init()?;
            self.solver_ready = true;
        }

        log::info!("Generating world");

        let queries = queries_for_kind(
            self.settings.location_count,
            self.settings.instrument_size,
            self.prefab.kind,
        );

        self.submit_to_solver(queries);
        Ok(())
    }

    /// Per-frame step: drain at most one result, then apply the one-shot
    /// mesh hide once the worker has finished
    pub fn update(&mut self, scene: &mut PropRegistry, debug: &mut DebugDrawSystem) {
        self.process_placement_results(scene, debug);

        if !self.mesh_hidden && self.queries_done.load(Ordering::Acquire) {
            self.hide_grid_enable_occlusion();
            self.mesh_hidden = true;
        }
    }

    fn hide_grid_enable_occlusion(&self) {
        log::info!("Hiding processed mesh, enabling occlusion");
        self.mesh.set_draw_processed_mesh(false);
    }

    fn submit_to_solver(&mut self, queries: Vec<PlacementQuery>) {
        // Capacity covers every possible result, so the inline path can
        // never block on its own channel.
        let (sender, receiver) = mpsc::sync_channel(queries.len() + 1);
        self.results = Some(receiver);

        let solver = Arc::clone(&self.solver);
        let queries_done = Arc::clone(&self.queries_done);

        let job = move || {
            run_queries(&*solver, &queries, &sender);
            queries_done.store(true, Ordering::Release);
        };

        if self.settings.background_placement {
            // Fire and forget: queries run to completion on their own
            let _worker = thread::spawn(job);
        } else {
            job();
        }
    }

    fn process_placement_results(&mut self, scene: &mut PropRegistry, debug: &mut DebugDrawSystem) {
        let Some(receiver) = &self.results else {
            return;
        };

        match receiver.try_recv() {
            Ok(result) => self.place_instrument(&result, scene, debug),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.results = None,
        }
    }

    fn place_instrument(
        &mut self,
        result: &PlacementResult,
        scene: &mut PropRegistry,
        debug: &mut DebugDrawSystem,
    ) {
        let name = format!("{}{}", result.kind.name(), self.placed.len());
        let rotation = look_rotation(result.placement.normal, Vec3::y());

        if self.settings.draw_debug_boxes {
            debug.draw_persistent_box(
                name.clone(),
                result.placement.position,
                result.dimensions * 0.5,
                rotation,
                Vec4::new(1.0, 0.0, 0.0, 1.0),
            );
        }

        // Stay centered in the accepted box; the ground offset is zero today
        let position = result.placement.position - self.settings.ground_offset;

        let factor = proportional_fit(&[self.prefab.combined_bounds()], self.settings.instrument_size);
        let scale = self.prefab.base_scale * factor;

        let transform = Transform::new(position, rotation, scale);
        let instance = match self.root {
            Some(root) => PropInstance::with_parent(name.clone(), transform, root),
            None => PropInstance::new(name.clone(), transform),
        };

        let key = scene.spawn(instance);
        self.placed.push(key);
        log::info!(
            "Placed {name} at ({:.2}, {:.2}, {:.2}) scale {factor:.3}",
            position.x,
            position.y,
            position.z
        );
    }
}

/// Run every query against the solver, forwarding accepted poses
///
/// Failed queries are skipped; remaining queries still run.
fn run_queries(
    solver: &dyn PlacementSolver,
    queries: &[PlacementQuery],
    sender: &SyncSender<PlacementResult>,
) {
    for (index, query) in queries.iter().enumerate() {
        let name = format!("{}{index}", query.kind.name());

        match solver.place_object(&name, &query.definition, &query.rules, &query.constraints) {
            Some(placement) => {
                let result = PlacementResult {
                    placement,
                    dimensions: query.dimensions,
                    kind: query.kind,
                };
                if sender.send(result).is_err() {
                    // Receiver dropped: the session is over, stop solving
                    return;
                }
            }
            None => log::debug!("Solver found no placement for {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use spatial_engine::placement::{PlacementConstraint, PlacementDefinition, PlacementRule};
    use spatial_engine::understanding::{PlayspaceStats, ScanState};

    struct FixedUnderstanding {
        allow: bool,
    }

    impl SpatialUnderstanding for FixedUnderstanding {
        fn allow_spatial_understanding(&self) -> bool {
            self.allow
        }

        fn scan_state(&self) -> ScanState {
            ScanState::Done
        }

        fn request_finish_scan(&self) {}

        fn query_playspace_stats(&self) -> Option<PlayspaceStats> {
            None
        }
    }

    #[derive(Default)]
    struct RecordingMesh {
        hides: AtomicUsize,
    }

    impl UnderstandingMesh for RecordingMesh {
        fn set_draw_processed_mesh(&self, draw: bool) {
            if !draw {
                self.hides.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    struct ScriptedSolver {
        inits: AtomicUsize,
        script: Mutex<VecDeque<Option<SolvedPlacement>>>,
    }

    impl ScriptedSolver {
        fn new(script: Vec<Option<SolvedPlacement>>) -> Self {
            Self {
                inits: AtomicUsize::new(0),
                script: Mutex::new(script.into()),
            }
        }
    }

    impl PlacementSolver for ScriptedSolver {
        fn init(&self) -> Result<(), PlacementError> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn place_object(
            &self,
            _name: &str,
            _definition: &PlacementDefinition,
            _rules: &[PlacementRule],
            _constraints: &[PlacementConstraint],
        ) -> Option<SolvedPlacement> {
            self.script.lock().unwrap().pop_front().flatten()
        }
    }

    fn floor_pose(x: f32) -> SolvedPlacement {
        SolvedPlacement {
            position: Vec3::new(x, 0.5, 0.0),
            normal: Vec3::y(),
        }
    }

    fn placer_with(
        allow: bool,
        script: Vec<Option<SolvedPlacement>>,
        settings: PlacementSetupConfig,
    ) -> (ObjectPlacer, Arc<RecordingMesh>, Arc<ScriptedSolver>) {
        let mesh = Arc::new(RecordingMesh::default());
        let solver = Arc::new(ScriptedSolver::new(script));
        let placer = ObjectPlacer::new(
            Arc::new(FixedUnderstanding { allow }),
            mesh.clone(),
            solver.clone(),
            InstrumentPrefab::demo(InstrumentKind::Guitar),
            settings,
        );
        (placer, mesh, solver)
    }

    fn inline_settings(location_count: usize) -> PlacementSetupConfig {
        PlacementSetupConfig {
            location_count,
            background_placement: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_drains_exactly_one_result_per_frame() {
        let script = vec![Some(floor_pose(0.0)), Some(floor_pose(2.0)), Some(floor_pose(4.0))];
        let (mut placer, _mesh, _solver) = placer_with(true, script, inline_settings(3));
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.attach(&mut scene);
        placer.create_scene().unwrap();
        assert_eq!(placer.placed().len(), 0);

        for expected in 1..=3 {
            placer.update(&mut scene, &mut debug);
            assert_eq!(placer.placed().len(), expected);
        }

        // Queue is empty now; further frames place nothing
        placer.update(&mut scene, &mut debug);
        assert_eq!(placer.placed().len(), 3);
        // Root node plus three instruments
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_failed_queries_dropped_silently() {
        let script = vec![None, Some(floor_pose(1.0)), None];
        let (mut placer, _mesh, _solver) = placer_with(true, script, inline_settings(3));
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.create_scene().unwrap();
        for _ in 0..5 {
            placer.update(&mut scene, &mut debug);
        }

        assert_eq!(placer.placed().len(), 1);
    }

    #[test]
    fn test_disallowed_understanding_is_noop() {
        let (mut placer, mesh, solver) = placer_with(false, vec![], inline_settings(1));
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.create_scene().unwrap();
        for _ in 0..5 {
            placer.update(&mut scene, &mut debug);
        }

        assert_eq!(solver.inits.load(Ordering::SeqCst), 0);
        assert!(scene.is_empty());
        assert_eq!(mesh.hides.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_solver_initialized_once() {
        let script = vec![Some(floor_pose(0.0)), Some(floor_pose(2.0))];
        let (mut placer, _mesh, solver) = placer_with(true, script, inline_settings(1));

        placer.create_scene().unwrap();
        placer.create_scene().unwrap();
        assert_eq!(solver.inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mesh_hidden_exactly_once_after_completion() {
        let script = vec![Some(floor_pose(0.0))];
        let (mut placer, mesh, _solver) = placer_with(true, script, inline_settings(1));
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.create_scene().unwrap();
        for _ in 0..10 {
            placer.update(&mut scene, &mut debug);
        }

        assert_eq!(mesh.hides.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_placed_prop_pose_and_scale() {
        let script = vec![Some(floor_pose(2.0))];
        let (mut placer, _mesh, _solver) = placer_with(true, script, inline_settings(1));
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.attach(&mut scene);
        placer.create_scene().unwrap();
        placer.update(&mut scene, &mut debug);

        let key = placer.placed()[0];
        let prop = scene.get(key).unwrap();
        assert_eq!(prop.transform.position, Vec3::new(2.0, 0.5, 0.0));

        // Demo guitar combined bounds are 0.5 x 1.4 x 0.2; the tallest axis
        // wins, so the uniform factor is 1.0 / 1.4
        let expected = 1.0 / 1.4;
        assert!((prop.transform.scale.x - expected).abs() < 1e-5);
        assert!((prop.transform.scale.y - expected).abs() < 1e-5);
        assert!((prop.transform.scale.z - expected).abs() < 1e-5);
    }

    #[test]
    fn test_debug_boxes_follow_flag() {
        let script = vec![Some(floor_pose(0.0)), Some(floor_pose(2.0))];
        let settings = PlacementSetupConfig {
            location_count: 2,
            background_placement: false,
            draw_debug_boxes: true,
            ..Default::default()
        };
        let (mut placer, _mesh, _solver) = placer_with(true, script, settings);
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.create_scene().unwrap();
        for _ in 0..3 {
            placer.update(&mut scene, &mut debug);
        }
        assert_eq!(debug.shape_count(), 2);
    }

    #[test]
    fn test_background_worker_delivers_results() {
        let script = vec![Some(floor_pose(0.0)), Some(floor_pose(2.0))];
        let settings = PlacementSetupConfig {
            location_count: 2,
            background_placement: true,
            ..Default::default()
        };
        let (mut placer, mesh, _solver) = placer_with(true, script, settings);
        let mut scene = PropRegistry::new();
        let mut debug = DebugDrawSystem::new();

        placer.create_scene().unwrap();

        for _ in 0..200 {
            placer.update(&mut scene, &mut debug);
            if placer.is_idle() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(placer.placed().len(), 2);
        assert_eq!(mesh.hides.load(Ordering::SeqCst), 1);
    }
}
