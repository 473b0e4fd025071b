//! Energy bookkeeping for a single snapshot

use crate::forces::ForceModel;
use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energy {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Sum of `m v² / 2` over all particles
pub fn kinetic_energy(velocities: &[DVec2], mass: f64) -> f64 {
    velocities
        .iter()
        .map(|v| 0.5 * mass * v.length_squared())
        .sum()
}

pub fn snapshot_energy<F: ForceModel + ?Sized>(
    model: &F,
    positions: &[DVec2],
    velocities: &[DVec2],
    mass: f64,
) -> Energy {
    Energy {
        kinetic: kinetic_energy(velocities, mass),
        potential: model.potential_energy(positions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::PairwiseSpring;
    use crate::tests::test_helpers::approx_eq;

    #[test]
    fn kinetic_energy_of_moving_particles() {
        let v = [DVec2::new(3.0, 4.0), DVec2::new(0.0, 1.0)];
        // 0.5 * 2 * 25 + 0.5 * 2 * 1
        assert!(approx_eq(kinetic_energy(&v, 2.0), 26.0, 1e-12));
    }

    #[test]
    fn snapshot_energy_adds_both_terms() {
        let model = PairwiseSpring::new(1.0, 1.0);
        let positions = [DVec2::ZERO, DVec2::new(2.0, 0.0)];
        let velocities = [DVec2::new(1.0, 0.0), DVec2::ZERO];

        let energy = snapshot_energy(&model, &positions, &velocities, 1.0);
        assert!(approx_eq(energy.kinetic, 0.5, 1e-12));
        assert!(approx_eq(energy.potential, 0.5, 1e-12));
        assert!(approx_eq(energy.total(), 1.0, 1e-12));
    }
}
