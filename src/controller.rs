//! The simulation controller: owns the grid and configuration, runs fixed
//! sub-steps per tick and hands completed state to the renderer.

use crate::collision::{resolve_all, CollisionReport, CollisionResponse, Obstacle};
use crate::command::Command;
use crate::config::{Anchors, ClothConfig, RenderMode};
use crate::energy::Energy;
use crate::error::ClothError;
use crate::float::Float;
use crate::force::ForceAccumulator;
use crate::grid::{NodeGrid, Orientation};
use crate::integrator::semi_implicit_euler;
use crate::mesh::ClothTopology;
use crate::observer::StepObserver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Lifecycle of a simulation. Construction either fails or yields `Ready`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimState {
    /// Laid out, never stepped.
    Ready,
    Running,
    /// Accepts commands and configuration changes but does not integrate.
    Paused,
}

/// Summary of one `step` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Sub-steps executed.
    pub sub_steps: usize,
    /// Sub-steps owed by the clock but discarded by the per-tick cap.
    pub dropped_sub_steps: usize,
    /// Node/obstacle corrections summed over all sub-steps.
    pub contacts: usize,
    /// Deepest penetration corrected in any sub-step, zero without contacts.
    pub max_penetration: f64,
    /// The tick was skipped because the simulation is paused.
    pub paused: bool,
}

/// A completed frame in renderer-ready `f32` form.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub mode: RenderMode,
    pub positions: AllocVec<[f32; 3]>,
    /// Per-vertex normals; only produced in textured mode.
    pub normals: Option<AllocVec<[f32; 3]>>,
}

/// Mass-spring cloth simulation.
///
/// ```
/// use drape::{ClothConfig, ClothSimulation, NoOpStepObserver, Obstacle, Vec3};
///
/// let mut sim = ClothSimulation::new(10, 10, ClothConfig::<f64>::new()).unwrap();
/// let ball = Obstacle::new(Vec3::new(1.0, 3.5, 0.0), 0.5);
/// let report = sim.step(1.0 / 60.0, &[ball], &mut NoOpStepObserver);
/// assert!(report.sub_steps > 0);
/// let positions = sim.snapshot_positions();
/// assert_eq!(positions.len(), 100);
/// ```
pub struct ClothSimulation<F: Float> {
    grid: NodeGrid<F>,
    config: ClothConfig<F>,
    orientation: Orientation,
    topology: ClothTopology,
    forces: ForceAccumulator<F>,
    anchors: AllocVec<usize>,
    state: SimState,
    pending: F,
}

impl<F: Float> ClothSimulation<F> {
    /// Create a `rows x cols` cloth hanging vertically.
    pub fn new(rows: usize, cols: usize, config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let orientation = Orientation::Vertical;
        let grid = NodeGrid::with_layout(rows, cols, orientation, &config.lattice())?;
        let topology = ClothTopology::new(&grid);
        let anchors = config.anchors.indices(cols);
        log::debug!("created {}x{} cloth, ks={}, kd={}", rows, cols, config.stiffness, config.damping);
        Ok(ClothSimulation {
            grid,
            config,
            orientation,
            topology,
            forces: ForceAccumulator::new(),
            anchors,
            state: SimState::Ready,
            pending: F::zero(),
        })
    }

    /// Advance by a wall-clock delta `dt`.
    ///
    /// Runs as many `time_step` sub-steps as the accumulated time covers, at
    /// most `max_sub_steps`; time beyond the cap is discarded. A paused
    /// simulation discards `dt` and does not integrate.
    pub fn step<O: StepObserver>(
        &mut self,
        dt: F,
        obstacles: &[Obstacle<F>],
        observer: &mut O,
    ) -> FrameReport {
        if self.state == SimState::Paused {
            return self.skip_paused(observer);
        }
        if !dt.is_finite() || dt < F::zero() {
            log::warn!("ignoring invalid frame delta {}", dt);
            return self.run_sub_steps(0, 0, obstacles, observer);
        }

        let h = self.config.time_step;
        self.pending = self.pending + dt;
        // Tolerance absorbs rounding when `dt` is an exact multiple of `h`.
        let owed = (self.pending / h + F::from_f64(1e-6)).floor().to_usize();
        self.pending = (self.pending - F::from_usize(owed) * h).max(F::zero());

        let count = owed.min(self.config.max_sub_steps);
        if owed > count {
            // `owed` saturates for huge deltas, so the remainder is not trustworthy.
            self.pending = F::zero();
            log::warn!("frame needed {} sub-steps, capped at {}", owed, count);
        }
        self.run_sub_steps(count, owed - count, obstacles, observer)
    }

    /// Run exactly `count` sub-steps, ignoring the clock.
    pub fn step_sub_steps<O: StepObserver>(
        &mut self,
        count: usize,
        obstacles: &[Obstacle<F>],
        observer: &mut O,
    ) -> FrameReport {
        if self.state == SimState::Paused {
            return self.skip_paused(observer);
        }
        self.run_sub_steps(count, 0, obstacles, observer)
    }

    fn skip_paused<O: StepObserver>(&mut self, observer: &mut O) -> FrameReport {
        self.pending = F::zero();
        let report = FrameReport { paused: true, ..FrameReport::default() };
        observer.on_frame_complete(&report);
        report
    }

    fn run_sub_steps<O: StepObserver>(
        &mut self,
        count: usize,
        dropped: usize,
        obstacles: &[Obstacle<F>],
        observer: &mut O,
    ) -> FrameReport {
        if count > 0 {
            self.state = SimState::Running;
        }
        let mut report = FrameReport { dropped_sub_steps: dropped, ..FrameReport::default() };
        for i in 0..count {
            let collisions = self.sub_step(obstacles);
            report.sub_steps += 1;
            report.contacts += collisions.contacts;
            report.max_penetration = report.max_penetration.max(collisions.max_penetration.to_f64());
            observer.on_sub_step(i);
            if collisions.contacts > 0 {
                observer.on_collision(i, collisions.contacts);
            }
        }
        log::trace!("frame: {} sub-steps, {} contacts", report.sub_steps, report.contacts);
        observer.on_frame_complete(&report);
        report
    }

    /// One fixed sub-step: forces, integration, collisions.
    fn sub_step(&mut self, obstacles: &[Obstacle<F>]) -> CollisionReport<F> {
        let pinned: &[usize] = if self.config.pinned { &self.anchors } else { &[] };
        let forces = self.forces.accumulate(&self.grid, &self.config, pinned);
        semi_implicit_euler(&mut self.grid, forces, self.config.mass, self.config.time_step, pinned);
        let response = CollisionResponse {
            skin: self.config.skin,
            restitution: self.config.restitution,
        };
        resolve_all(&mut self.grid, obstacles, &response, pinned)
    }

    /// Translate an input event into the matching operation.
    pub fn apply(&mut self, command: Command) -> Result<(), ClothError> {
        match command {
            Command::IncreaseStiffness => {
                self.set_stiffness(self.config.stiffness + self.config.stiffness_step)
            }
            Command::DecreaseStiffness => {
                self.set_stiffness(self.config.stiffness - self.config.stiffness_step)
            }
            Command::IncreaseDamping => {
                self.set_damping(self.config.damping + self.config.damping_step)
            }
            Command::DecreaseDamping => {
                self.set_damping((self.config.damping - self.config.damping_step).max(F::zero()))
            }
            Command::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            Command::ToggleRenderMode => {
                self.toggle_render_mode();
                Ok(())
            }
            Command::ToggleDrag => {
                self.toggle_drag();
                Ok(())
            }
            Command::TogglePin => {
                self.toggle_pin();
                Ok(())
            }
            Command::ResetLayout => {
                self.reset_layout(self.orientation);
                Ok(())
            }
            Command::ToggleOrientation => {
                self.reset_layout(self.orientation.toggled());
                Ok(())
            }
        }
    }

    pub fn set_stiffness(&mut self, stiffness: F) -> Result<(), ClothError> {
        if !stiffness.is_finite() || stiffness <= F::zero() {
            log::warn!("refusing stiffness {}", stiffness);
            return Err(ClothError::InvalidStiffness);
        }
        self.config.stiffness = stiffness;
        log::debug!("stiffness set to {}", stiffness);
        Ok(())
    }

    pub fn set_damping(&mut self, damping: F) -> Result<(), ClothError> {
        if !damping.is_finite() || damping < F::zero() {
            log::warn!("refusing damping {}", damping);
            return Err(ClothError::InvalidDamping);
        }
        self.config.damping = damping;
        log::debug!("damping set to {}", damping);
        Ok(())
    }

    pub fn set_wind(&mut self, wind: Vec3<F>) -> Result<(), ClothError> {
        if !wind.is_finite() {
            return Err(ClothError::NonFiniteParameter("wind"));
        }
        self.config.wind = wind;
        Ok(())
    }

    /// Choose which nodes pinning holds.
    pub fn set_anchors(&mut self, anchors: Anchors) {
        self.config.anchors = anchors;
        self.anchors = anchors.indices(self.grid.width());
    }

    /// Switch between running and paused. Returns `true` if now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SimState::Paused => SimState::Running,
            SimState::Ready | SimState::Running => SimState::Paused,
        };
        self.pending = F::zero();
        self.state == SimState::Paused
    }

    pub fn toggle_render_mode(&mut self) -> RenderMode {
        self.config.render_mode = self.config.render_mode.toggled();
        self.config.render_mode
    }

    /// Returns `true` if drag is now enabled.
    pub fn toggle_drag(&mut self) -> bool {
        self.config.drag = !self.config.drag;
        self.config.drag
    }

    /// Returns `true` if anchors are now pinned.
    pub fn toggle_pin(&mut self) -> bool {
        self.config.pinned = !self.config.pinned;
        self.config.pinned
    }

    /// Put every node back on the initial lattice, at rest.
    pub fn reset_layout(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.grid.reset_layout(orientation, &self.config.lattice());
        self.pending = F::zero();
        log::debug!("layout reset ({:?})", orientation);
    }

    /// Rebuild the grid at a new size, laid out in the current orientation.
    ///
    /// On error the current grid is kept.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), ClothError> {
        let grid = NodeGrid::with_layout(rows, cols, self.orientation, &self.config.lattice())?;
        self.topology = ClothTopology::new(&grid);
        self.anchors = self.config.anchors.indices(cols);
        self.grid = grid;
        self.pending = F::zero();
        log::debug!("resized to {}x{}", rows, cols);
        Ok(())
    }

    /// Owned copy of every node position, row-major.
    pub fn snapshot_positions(&self) -> AllocVec<Vec3<F>> {
        self.grid.positions()
    }

    /// Positions, and normals in textured mode, narrowed for vertex buffers.
    pub fn render_frame(&self) -> RenderFrame {
        let positions = self.grid.nodes().iter().map(|n| n.position.to_array_f32()).collect();
        let normals = match self.config.render_mode {
            RenderMode::Textured => Some(
                self.topology
                    .vertex_normals(&self.grid)
                    .into_iter()
                    .map(Vec3::to_array_f32)
                    .collect(),
            ),
            RenderMode::Wireframe => None,
        };
        RenderFrame { mode: self.config.render_mode, positions, normals }
    }

    pub fn energy(&self) -> Energy<F> {
        Energy::of(&self.grid, &self.config)
    }

    /// Flat indices of the anchor nodes, pinned or not.
    pub fn anchors(&self) -> &[usize] { &self.anchors }
    pub fn grid(&self) -> &NodeGrid<F> { &self.grid }
    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn topology(&self) -> &ClothTopology { &self.topology }
    pub fn orientation(&self) -> Orientation { self.orientation }
    pub fn state(&self) -> SimState { self.state }
    pub fn is_paused(&self) -> bool { self.state == SimState::Paused }
    pub fn rows(&self) -> usize { self.grid.height() }
    pub fn cols(&self) -> usize { self.grid.width() }
}
