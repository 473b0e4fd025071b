//! Scenario tests for a single particle falling under constant gravity

use glam::DVec2;
use trajsim_core::tests::test_helpers::{approx_eq, approx_eq_vec};
use trajsim_core::{simulate_uniform_fall, RunParameters, SimError, UniformFallConfig};

fn one_step_config() -> UniformFallConfig {
    UniformFallConfig {
        run: RunParameters::new(0.05, 0.05, 0.3),
        initial_velocity: -0.1,
        height: 553.0,
        gravity: 9.8,
    }
}

#[test]
fn test_single_step_values() {
    let trajectory = simulate_uniform_fall(&one_step_config()).expect("run failed");
    assert_eq!(trajectory.step_count(), 1);

    let start = trajectory.read(0, 0).unwrap();
    let end = trajectory.read(1, 0).unwrap();

    assert!(approx_eq_vec(start.force, DVec2::new(0.0, -2.94), 1e-12));
    assert!(approx_eq_vec(end.velocity, DVec2::new(-0.1, -0.49), 1e-12));
    assert!(approx_eq_vec(end.position, DVec2::new(-0.005, 552.9755), 1e-9));
}

#[test]
fn test_initial_conditions_preserved_exactly() {
    let trajectory = simulate_uniform_fall(&UniformFallConfig::default()).unwrap();
    let start = trajectory.read(0, 0).unwrap();

    assert_eq!(start.position, DVec2::new(0.0, 553.0));
    assert_eq!(start.velocity, DVec2::new(-0.1, 0.0));
}

#[test]
fn test_default_run_shape() {
    let trajectory = simulate_uniform_fall(&UniformFallConfig::default()).unwrap();

    assert_eq!(trajectory.step_count(), 200);
    assert_eq!(trajectory.particle_count(), 1);
    assert_eq!(trajectory.snapshots().len(), 201);
    for step in 0..=200 {
        assert_eq!(trajectory.positions(step).unwrap().len(), 1);
        assert_eq!(trajectory.velocities(step).unwrap().len(), 1);
        assert_eq!(trajectory.forces(step).unwrap().len(), 1);
    }
    assert!(trajectory.positions(201).is_err());
}

#[test]
fn test_force_is_constant_on_every_row() {
    let trajectory = simulate_uniform_fall(&UniformFallConfig::default()).unwrap();
    for step in 0..=trajectory.step_count() {
        assert_eq!(
            trajectory.forces(step).unwrap()[0],
            trajectory.forces(0).unwrap()[0]
        );
    }
}

#[test]
fn test_matches_closed_form_semi_implicit_euler() {
    // v[n] = v0 - g n dt, y[n] = h - g dt² n (n + 1) / 2
    let config = UniformFallConfig::default();
    let trajectory = simulate_uniform_fall(&config).unwrap();
    let dt = config.run.timestep;
    let n = trajectory.step_count() as f64;

    let last = trajectory.read(trajectory.step_count(), 0).unwrap();
    assert!(approx_eq(last.velocity.y, -9.8 * n * dt, 1e-9));
    assert!(approx_eq(last.position.y, 553.0 - 9.8 * dt * dt * n * (n + 1.0) / 2.0, 1e-6));
    assert!(approx_eq(last.position.x, -0.1 * n * dt, 1e-9));
    assert!(approx_eq(last.position.y, 60.55, 1e-6));
}

#[test]
fn test_time_axis() {
    let trajectory = simulate_uniform_fall(&UniformFallConfig::default()).unwrap();
    assert!(approx_eq(trajectory.timestep(), 0.05, 0.0));
    assert!(approx_eq(trajectory.time_at(0), 0.0, 0.0));
    assert!(approx_eq(trajectory.time_at(200), 10.0, 1e-9));
}

#[test]
fn test_invalid_configurations_rejected_before_running() {
    let cases = [
        UniformFallConfig {
            run: RunParameters::new(10.0, 0.0, 0.3),
            ..Default::default()
        },
        UniformFallConfig {
            run: RunParameters::new(0.01, 0.05, 0.3),
            ..Default::default()
        },
        UniformFallConfig {
            run: RunParameters::new(10.0, 0.05, -1.0),
            ..Default::default()
        },
        UniformFallConfig {
            height: f64::INFINITY,
            ..Default::default()
        },
        // About 1e19 steps: finite, but far too large to allocate
        UniformFallConfig {
            run: RunParameters::new(1e13, 1e-6, 0.3),
            ..Default::default()
        },
    ];

    for config in cases {
        assert!(
            matches!(
                simulate_uniform_fall(&config),
                Err(SimError::InvalidConfiguration(_))
            ),
            "{config:?} should be rejected"
        );
    }
}
