//! The two reference scenarios, each a specialization of [`Integrator`]

use crate::config::{PairwiseConfig, UniformFallConfig};
use crate::error::SimError;
use crate::forces::{PairwiseSpring, UniformForce};
use crate::integrator::Integrator;
use crate::trajectory::Trajectory;

/// One particle released at `height` with a horizontal velocity, under gravity only
pub fn simulate_uniform_fall(config: &UniformFallConfig) -> Result<Trajectory, SimError> {
    config.validate()?;
    let model = UniformForce::gravity(config.run.mass, config.gravity);

    Integrator::new(
        config.run,
        model,
        &[config.initial_position()],
        &[config.initial_velocity()],
    )?
    .run()
}

/// Particles pulled toward a common rest separation by pairwise springs
pub fn simulate_pairwise(config: &PairwiseConfig) -> Result<Trajectory, SimError> {
    config.validate()?;
    let model = PairwiseSpring::new(config.stiffness, config.rest_length);

    Integrator::new(
        config.run,
        model,
        &config.initial_positions,
        &config.resolved_velocities(),
    )?
    .run()
}
