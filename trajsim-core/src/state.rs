//! Fixed-size time history of a particle system
//!
//! The buffer holds `step_count + 1` rows of positions, velocities and
//! forces, one entry per particle in every row. Row 0 is the initial
//! condition. Rows are filled strictly forward by the integrator and are
//! written once.

use crate::error::SimError;
use glam::DVec2;
use std::collections::TryReserveError;

/// Position, velocity and force of one particle at one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub position: DVec2,
    pub velocity: DVec2,
    pub force: DVec2,
}

/// Full time history for a single run
#[derive(Debug, Clone)]
pub struct StateBuffer {
    particle_count: usize,
    step_count: usize,
    positions: Vec<Vec<DVec2>>,
    velocities: Vec<Vec<DVec2>>,
    forces: Vec<Vec<DVec2>>,
    // Number of rows after row 0 whose positions/velocities have been written
    written_steps: usize,
}

impl StateBuffer {
    /// Allocate a zeroed buffer for `step_count` steps of `particle_count` particles
    pub fn new(step_count: usize, particle_count: usize) -> Result<Self, SimError> {
        if particle_count < 1 {
            return Err(SimError::invalid("particle count must be at least 1"));
        }

        let rows = step_count
            .checked_add(1)
            .ok_or_else(|| SimError::invalid("step count too large"))?;

        // Three histories of `rows * particle_count` vectors each
        let fits = rows
            .checked_mul(particle_count)
            .and_then(|n| n.checked_mul(3 * std::mem::size_of::<DVec2>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(SimError::invalid(format!(
                "{rows} rows of {particle_count} particles do not fit in memory"
            )));
        }

        Ok(Self {
            particle_count,
            step_count,
            positions: zeroed_rows(rows, particle_count)?,
            velocities: zeroed_rows(rows, particle_count)?,
            forces: zeroed_rows(rows, particle_count)?,
            written_steps: 0,
        })
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Number of rows, always `step_count + 1`
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of steps whose positions and velocities are filled in
    pub fn written_steps(&self) -> usize {
        self.written_steps
    }

    /// Write the initial condition of one particle (row 0)
    pub fn set_initial(
        &mut self,
        particle: usize,
        position: DVec2,
        velocity: DVec2,
    ) -> Result<(), SimError> {
        if self.written_steps > 0 {
            return Err(SimError::precondition(
                "initial conditions cannot change after stepping has begun",
            ));
        }
        self.check_particle(particle)?;

        self.positions[0][particle] = position;
        self.velocities[0][particle] = velocity;
        Ok(())
    }

    /// Bounds-checked read of one particle at one step
    pub fn read(&self, step: usize, particle: usize) -> Result<ParticleState, SimError> {
        self.check_step(step)?;
        self.check_particle(particle)?;

        Ok(ParticleState {
            position: self.positions[step][particle],
            velocity: self.velocities[step][particle],
            force: self.forces[step][particle],
        })
    }

    pub fn positions(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.check_step(step)?;
        Ok(&self.positions[step])
    }

    pub fn velocities(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.check_step(step)?;
        Ok(&self.velocities[step])
    }

    pub fn forces(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.check_step(step)?;
        Ok(&self.forces[step])
    }

    pub(crate) fn position_rows(&self) -> &[Vec<DVec2>] {
        &self.positions
    }

    /// Position row at `step` together with the force row to fill for it
    pub(crate) fn force_row_mut(
        &mut self,
        step: usize,
    ) -> Result<(&[DVec2], &mut [DVec2]), SimError> {
        self.check_step(step)?;
        if step != self.written_steps {
            return Err(SimError::precondition(format!(
                "forces may only be evaluated at the latest step {}, not {}",
                self.written_steps, step
            )));
        }
        Ok((&self.positions[step], &mut self.forces[step]))
    }

    /// Fill row `written_steps + 1` from the latest row with a semi-implicit Euler update
    pub(crate) fn advance(&mut self, inv_mass: f64, dt: f64) -> Result<usize, SimError> {
        let n = self.written_steps;
        if n >= self.step_count {
            return Err(SimError::precondition("all steps have already been written"));
        }

        let (done, rest) = self.velocities.split_at_mut(n + 1);
        let (v_prev, v_next) = (&done[n], &mut rest[0]);
        let (done, rest) = self.positions.split_at_mut(n + 1);
        let (r_prev, r_next) = (&done[n], &mut rest[0]);
        let f = &self.forces[n];

        for i in 0..self.particle_count {
            // Velocity first, then position from the updated velocity
            v_next[i] = v_prev[i] + f[i] * inv_mass * dt;
            r_next[i] = r_prev[i] + v_next[i] * dt;
        }

        self.written_steps = n + 1;
        Ok(self.written_steps)
    }

    fn check_step(&self, step: usize) -> Result<(), SimError> {
        if step >= self.len() {
            return Err(SimError::IndexOutOfRange {
                what: "step",
                index: step,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_particle(&self, particle: usize) -> Result<(), SimError> {
        if particle >= self.particle_count {
            return Err(SimError::IndexOutOfRange {
                what: "particle",
                index: particle,
                len: self.particle_count,
            });
        }
        Ok(())
    }
}

fn zeroed_rows(rows: usize, particle_count: usize) -> Result<Vec<Vec<DVec2>>, SimError> {
    let too_large =
        |e: TryReserveError| SimError::invalid(format!("cannot allocate state buffer: {e}"));

    let mut out = Vec::new();
    out.try_reserve_exact(rows).map_err(too_large)?;
    for _ in 0..rows {
        let mut row = Vec::new();
        row.try_reserve_exact(particle_count).map_err(too_large)?;
        row.resize(particle_count, DVec2::ZERO);
        out.push(row);
    }
    Ok(out)
}
