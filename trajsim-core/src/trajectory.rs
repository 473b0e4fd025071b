use crate::error::SimError;
use crate::state::{ParticleState, StateBuffer};
use glam::DVec2;

/// Completed, read-only history of a run
///
/// Only a fully integrated buffer can become a `Trajectory`, so consumers
/// never see a partially filled run.
#[derive(Debug, Clone)]
pub struct Trajectory {
    buffer: StateBuffer,
    timestep: f64,
}

impl Trajectory {
    pub(crate) fn new(buffer: StateBuffer, timestep: f64) -> Self {
        Self { buffer, timestep }
    }

    pub fn step_count(&self) -> usize {
        self.buffer.step_count()
    }

    pub fn particle_count(&self) -> usize {
        self.buffer.particle_count()
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Simulated time at `step`
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.timestep
    }

    pub fn read(&self, step: usize, particle: usize) -> Result<ParticleState, SimError> {
        self.buffer.read(step, particle)
    }

    pub fn positions(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.buffer.positions(step)
    }

    pub fn velocities(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.buffer.velocities(step)
    }

    pub fn forces(&self, step: usize) -> Result<&[DVec2], SimError> {
        self.buffer.forces(step)
    }

    /// Per-step particle positions, from the initial condition to the last step
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = &[DVec2]> + '_ {
        self.buffer.position_rows().iter().map(Vec::as_slice)
    }

    pub fn final_positions(&self) -> &[DVec2] {
        let rows = self.buffer.position_rows();
        &rows[rows.len() - 1]
    }

    pub fn buffer(&self) -> &StateBuffer {
        &self.buffer
    }
}
