use crate::error::CoincidentParticles;
use glam::DVec2;

/// Default gravitational acceleration (m/s²)
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Computes the force on every particle from a snapshot of positions
pub trait ForceModel {
    /// Overwrite `forces` with the force acting on each particle at `positions`.
    /// Both slices have one entry per particle.
    fn compute(&self, positions: &[DVec2], forces: &mut [DVec2])
        -> Result<(), CoincidentParticles>;

    /// Potential energy of the configuration, relative to the model's zero
    fn potential_energy(&self, positions: &[DVec2]) -> f64;
}

/// The same constant force on every particle at every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformForce {
    force: DVec2,
}

impl UniformForce {
    pub fn new(force: DVec2) -> Self {
        Self { force }
    }

    /// Weight of a particle of `mass` under downward acceleration `g`
    pub fn gravity(mass: f64, g: f64) -> Self {
        Self::new(DVec2::new(0.0, mass * -g))
    }

    pub fn force(&self) -> DVec2 {
        self.force
    }
}

impl ForceModel for UniformForce {
    fn compute(
        &self,
        _positions: &[DVec2],
        forces: &mut [DVec2],
    ) -> Result<(), CoincidentParticles> {
        forces.fill(self.force);
        Ok(())
    }

    fn potential_energy(&self, positions: &[DVec2]) -> f64 {
        // U = -F·r, zero at the origin
        positions.iter().map(|p| -self.force.dot(*p)).sum()
    }
}

/// Spring-like interaction between every pair of particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseSpring {
    pub stiffness: f64,
    pub rest_length: f64,
}

impl PairwiseSpring {
    pub fn new(stiffness: f64, rest_length: f64) -> Self {
        Self {
            stiffness,
            rest_length,
        }
    }

    /// Force on a particle displaced by `rij` from its partner
    fn pair_force(&self, rij: DVec2, dist: f64) -> DVec2 {
        -self.stiffness * (dist - self.rest_length) * rij / dist
    }
}

impl ForceModel for PairwiseSpring {
    fn compute(
        &self,
        positions: &[DVec2],
        forces: &mut [DVec2],
    ) -> Result<(), CoincidentParticles> {
        forces.fill(DVec2::ZERO);

        // Every ordered pair, so each particle accumulates its own contributions
        for (i, &pi) in positions.iter().enumerate() {
            for (j, &pj) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let rij = pi - pj;
                let dist = rij.length();
                if dist == 0.0 {
                    return Err(CoincidentParticles { i, j });
                }
                forces[i] += self.pair_force(rij, dist);
            }
        }

        Ok(())
    }

    fn potential_energy(&self, positions: &[DVec2]) -> f64 {
        let mut energy = 0.0;
        for (i, &pi) in positions.iter().enumerate() {
            for &pj in &positions[i + 1..] {
                let stretch = pi.distance(pj) - self.rest_length;
                energy += 0.5 * self.stiffness * stretch * stretch;
            }
        }
        energy
    }
}
