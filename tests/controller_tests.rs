use drape::{
    ClothConfig, ClothError, ClothSimulation, Command, FrameReport, NoOpStepObserver, Orientation,
    RenderMode, SimState, StepObserver, Vec3,
};

fn sim(rows: usize, cols: usize) -> ClothSimulation<f64> {
    ClothSimulation::new(rows, cols, ClothConfig::new()).unwrap()
}

#[test]
fn pinned_anchors_never_move() {
    let mut sim = sim(6, 6);
    sim.reset_layout(Orientation::Vertical);
    let anchors = sim.anchors().to_vec();
    let initial: Vec<_> = anchors.iter().map(|&i| sim.grid().nodes()[i].position).collect();

    for _ in 0..300 {
        sim.step(1.0 / 60.0, &[], &mut NoOpStepObserver);
    }
    for (&i, &p) in anchors.iter().zip(&initial) {
        assert_eq!(sim.grid().nodes()[i].position, p);
    }
}

#[test]
fn pin_engaged_mid_fall_holds_node_in_place() {
    let config = ClothConfig::<f64>::new().with_pinned(false);
    let mut sim = ClothSimulation::new(4, 4, config).unwrap();
    sim.step_sub_steps(100, &[], &mut NoOpStepObserver);
    assert!(sim.toggle_pin());

    let held = sim.grid().get(0, 0).position;
    sim.step_sub_steps(100, &[], &mut NoOpStepObserver);
    assert_eq!(sim.grid().get(0, 0).position, held);
}

#[test]
fn unpinned_cloth_falls() {
    let mut sim = sim(4, 4);
    assert!(!sim.toggle_pin());
    let y = sim.grid().get(0, 0).position.y;
    sim.step_sub_steps(100, &[], &mut NoOpStepObserver);
    assert!(sim.grid().get(0, 0).position.y < y);
}

#[test]
fn symmetric_grid_stays_symmetric() {
    let mut sim = sim(2, 5);
    let width = (5 - 1) as f64 * sim.config().spacing_x;

    for _ in 0..50 {
        sim.step_sub_steps(100, &[], &mut NoOpStepObserver);
        for r in 0..2 {
            for c in 0..5 {
                let a = sim.grid().get(r, c).position;
                let b = sim.grid().get(r, 4 - c).position;
                assert!((a.x + b.x - width).abs() < 1e-8, "x mirror broken at ({}, {})", r, c);
                assert!((a.y - b.y).abs() < 1e-8, "y mirror broken at ({}, {})", r, c);
                assert!((a.z - b.z).abs() < 1e-8);
            }
        }
    }
}

#[test]
fn paused_simulation_does_not_integrate() {
    let mut sim = sim(4, 4);
    assert!(sim.toggle_pause());
    assert_eq!(sim.state(), SimState::Paused);
    let before = sim.snapshot_positions();

    let report = sim.step(0.5, &[], &mut NoOpStepObserver);
    assert!(report.paused);
    assert_eq!(report.sub_steps, 0);
    assert_eq!(sim.step_sub_steps(10, &[], &mut NoOpStepObserver).sub_steps, 0);
    assert_eq!(sim.snapshot_positions(), before);

    // Configuration and layout changes are accepted while paused.
    sim.set_stiffness(120.0).unwrap();
    sim.reset_layout(Orientation::Horizontal);
    assert_eq!(sim.config().stiffness, 120.0);

    assert!(!sim.toggle_pause());
    assert_eq!(sim.state(), SimState::Running);
    let report = sim.step(0.005, &[], &mut NoOpStepObserver);
    assert_eq!(report.sub_steps, 5);
    assert!(sim.snapshot_positions().iter().all(|p| p.is_finite()));
}

#[test]
fn stiffness_commands_step_and_refuse_non_positive() {
    let mut sim = sim(3, 3);
    sim.apply(Command::IncreaseStiffness).unwrap();
    assert_eq!(sim.config().stiffness, 55.0);

    for _ in 0..10 {
        sim.apply(Command::DecreaseStiffness).unwrap();
    }
    assert_eq!(sim.config().stiffness, 5.0);
    assert_eq!(sim.apply(Command::DecreaseStiffness), Err(ClothError::InvalidStiffness));
    assert_eq!(sim.config().stiffness, 5.0);
}

#[test]
fn damping_commands_saturate_at_zero() {
    let mut sim = sim(3, 3);
    sim.apply(Command::IncreaseDamping).unwrap();
    assert_eq!(sim.config().damping, 11.0);
    for _ in 0..20 {
        sim.apply(Command::DecreaseDamping).unwrap();
    }
    assert_eq!(sim.config().damping, 0.0);
}

#[test]
fn setters_reject_invalid_values() {
    let mut sim = sim(3, 3);
    assert_eq!(sim.set_stiffness(0.0), Err(ClothError::InvalidStiffness));
    assert_eq!(sim.set_stiffness(f64::NAN), Err(ClothError::InvalidStiffness));
    assert_eq!(sim.set_damping(-1.0), Err(ClothError::InvalidDamping));
    assert!(sim.set_wind(Vec3::new(f64::INFINITY, 0.0, 0.0)).is_err());
    assert_eq!(sim.config().stiffness, 50.0);
    assert_eq!(sim.config().damping, 10.0);
}

#[test]
fn toggle_commands_flip_flags() {
    let mut sim = sim(3, 3);
    sim.apply(Command::ToggleDrag).unwrap();
    assert!(sim.config().drag);
    sim.apply(Command::TogglePin).unwrap();
    assert!(!sim.config().pinned);
    sim.apply(Command::TogglePause).unwrap();
    assert!(sim.is_paused());
    sim.apply(Command::ToggleRenderMode).unwrap();
    assert_eq!(sim.config().render_mode, RenderMode::Wireframe);
}

#[test]
fn orientation_command_relays_grid() {
    let mut sim = sim(3, 3);
    sim.step(0.1, &[], &mut NoOpStepObserver);
    sim.apply(Command::ToggleOrientation).unwrap();
    assert_eq!(sim.orientation(), Orientation::Horizontal);
    let top = sim.config().top;
    assert!(sim.snapshot_positions().iter().all(|p| p.y == top));

    sim.step(0.1, &[], &mut NoOpStepObserver);
    sim.apply(Command::ResetLayout).unwrap();
    assert_eq!(sim.orientation(), Orientation::Horizontal);
    assert!(sim.snapshot_positions().iter().all(|p| p.y == top));
}

#[test]
fn render_frame_follows_render_mode() {
    let mut sim = sim(3, 4);
    let frame = sim.render_frame();
    assert_eq!(frame.mode, RenderMode::Textured);
    assert_eq!(frame.positions.len(), 12);
    assert_eq!(frame.normals.as_ref().map(Vec::len), Some(12));

    sim.toggle_render_mode();
    let frame = sim.render_frame();
    assert_eq!(frame.mode, RenderMode::Wireframe);
    assert!(frame.normals.is_none());
    assert_eq!(sim.topology().links().len(), 4 * 2 + 3 * 3);
}

#[derive(Default)]
struct Counter {
    sub_steps: usize,
    collisions: usize,
    frames: Vec<FrameReport>,
}

impl StepObserver for Counter {
    fn on_sub_step(&mut self, _index: usize) {
        self.sub_steps += 1;
    }
    fn on_collision(&mut self, _sub_step: usize, contacts: usize) {
        self.collisions += contacts;
    }
    fn on_frame_complete(&mut self, report: &FrameReport) {
        self.frames.push(report.clone());
    }
}

#[test]
fn observer_sees_every_sub_step_and_frame() {
    let mut sim = sim(4, 4);
    let ball = drape::Obstacle::new(Vec3::new(0.3, 4.7, 0.0), 0.3);
    let mut counter = Counter::default();
    sim.step(0.004, &[ball], &mut counter);
    sim.step(0.003, &[ball], &mut counter);

    assert_eq!(counter.sub_steps, 7);
    assert_eq!(counter.frames.len(), 2);
    assert_eq!(counter.frames[0].sub_steps, 4);
    assert!(counter.collisions > 0);
    let total: usize = counter.frames.iter().map(|f| f.contacts).sum();
    assert_eq!(total, counter.collisions);
}
