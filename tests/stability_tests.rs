use drape::{ClothConfig, ClothSimulation, NoOpStepObserver, Obstacle, Orientation, Vec3};

#[test]
fn energy_stays_bounded_over_long_runs() {
    let mut sim = ClothSimulation::new(8, 8, ClothConfig::<f64>::new()).unwrap();
    // Fixed sphere just behind the sheet, so collision corrections are included.
    let ball = Obstacle::new(Vec3::new(0.7, 4.0, 0.3), 0.35);
    let e0 = sim.energy().total();
    let bound = e0 + 0.05 * e0.abs() + 1.0;

    let mut contacts = 0;
    for chunk in 0..100 {
        contacts += sim.step_sub_steps(100, &[ball], &mut NoOpStepObserver).contacts;
        assert!(sim.snapshot_positions().iter().all(|p| p.is_finite()), "blew up in chunk {}", chunk);
        let e = sim.energy().total();
        assert!(e <= bound, "energy {} exceeded {} in chunk {}", e, bound, chunk);
    }
    assert!(contacts > 0, "the sheet should rest against the sphere");
}

#[test]
fn windy_drag_run_stays_finite() {
    let config = ClothConfig::<f64>::new()
        .with_drag(true)
        .with_wind(Vec3::new(2.0, 0.0, 3.0));
    let mut sim = ClothSimulation::new(10, 10, config).unwrap();
    let ball = Obstacle::new(Vec3::new(0.9, 3.8, 0.3), 0.5);

    for _ in 0..300 {
        sim.step(1.0 / 60.0, &[ball], &mut NoOpStepObserver);
    }
    assert!(sim.snapshot_positions().iter().all(|p| p.is_finite()));
    assert!(sim.grid().nodes().iter().all(|n| n.velocity.is_finite()));
}

#[test]
fn single_precision_cloth_runs() {
    let mut sim = ClothSimulation::new(5, 5, ClothConfig::<f32>::new()).unwrap();
    sim.reset_layout(Orientation::Horizontal);
    for _ in 0..120 {
        sim.step(1.0 / 60.0, &[], &mut NoOpStepObserver);
    }
    assert!(sim.snapshot_positions().iter().all(|p| p.is_finite()));
}
