use crate::config::RunParameters;
use crate::energy::{snapshot_energy, Energy};
use crate::error::SimError;
use crate::forces::ForceModel;
use crate::state::StateBuffer;
use crate::trajectory::Trajectory;
use glam::DVec2;
use log::{debug, trace, warn};

/// Where an integrator is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial conditions written, no step taken yet
    Initialized,
    Stepping,
    /// Every step written; the buffer can be handed out
    Completed,
    /// A force evaluation failed; the buffer is partial and will never be handed out
    Failed,
}

/// Fixed-step semi-implicit Euler integrator over a [`ForceModel`]
#[derive(Debug)]
pub struct Integrator<F> {
    model: F,
    buffer: StateBuffer,
    mass: f64,
    timestep: f64,
    phase: Phase,
}

impl<F: ForceModel> Integrator<F> {
    /// Validate `run`, allocate the full buffer and write the initial conditions
    pub fn new(
        run: RunParameters,
        model: F,
        initial_positions: &[DVec2],
        initial_velocities: &[DVec2],
    ) -> Result<Self, SimError> {
        let step_count = run.step_count()?;
        if initial_positions.len() != initial_velocities.len() {
            return Err(SimError::invalid(format!(
                "{} initial positions but {} initial velocities",
                initial_positions.len(),
                initial_velocities.len()
            )));
        }

        let mut buffer = StateBuffer::new(step_count, initial_positions.len())?;
        for (i, (&position, &velocity)) in initial_positions
            .iter()
            .zip(initial_velocities)
            .enumerate()
        {
            buffer.set_initial(i, position, velocity)?;
        }

        Ok(Self {
            model,
            buffer,
            mass: run.mass,
            timestep: run.timestep,
            phase: Phase::Initialized,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the latest written step
    pub fn current_step(&self) -> usize {
        self.buffer.written_steps()
    }

    pub fn step_count(&self) -> usize {
        self.buffer.step_count()
    }

    pub fn model(&self) -> &F {
        &self.model
    }

    /// Read access to the buffer while the run is in progress
    pub fn buffer(&self) -> &StateBuffer {
        &self.buffer
    }

    /// Advance one step: forces at `n`, then velocity and position at `n + 1`
    pub fn step(&mut self) -> Result<Phase, SimError> {
        match self.phase {
            Phase::Completed => {
                return Err(SimError::precondition("the run has already completed"))
            }
            Phase::Failed => return Err(SimError::precondition("the run has failed")),
            Phase::Initialized | Phase::Stepping => {}
        }

        let n = self.buffer.written_steps();
        self.guarded(|it| it.evaluate_forces(n))?;
        let next = self.buffer.advance(1.0 / self.mass, self.timestep)?;
        trace!("step {}/{}", next, self.buffer.step_count());

        self.phase = if next == self.buffer.step_count() {
            self.fill_final_forces(next);
            Phase::Completed
        } else {
            Phase::Stepping
        };
        Ok(self.phase)
    }

    /// Step until completion and hand out the trajectory
    pub fn run(mut self) -> Result<Trajectory, SimError> {
        debug!(
            "integrating {} particle(s) for {} steps of {} s, initial energy {:?}",
            self.buffer.particle_count(),
            self.buffer.step_count(),
            self.timestep,
            self.energy_at(0)?
        );

        while self.phase != Phase::Completed {
            self.step()?;
        }

        debug!(
            "run complete, final energy {:?}",
            self.energy_at(self.buffer.step_count())?
        );
        self.finish()
    }

    /// Hand out the trajectory of a completed run
    pub fn finish(self) -> Result<Trajectory, SimError> {
        if self.phase != Phase::Completed {
            return Err(SimError::precondition(format!(
                "cannot export a run in phase {:?}",
                self.phase
            )));
        }
        Ok(Trajectory::new(self.buffer, self.timestep))
    }

    fn evaluate_forces(&mut self, step: usize) -> Result<(), SimError> {
        let (positions, forces) = self.buffer.force_row_mut(step)?;
        self.model
            .compute(positions, forces)
            .map_err(|e| e.at_step(step))
    }

    /// The trailing force row feeds no update, so a failure there leaves it zeroed
    fn fill_final_forces(&mut self, step: usize) {
        if let Err(err) = self.evaluate_forces(step) {
            debug!("final force row left zeroed: {err}");
            if let Ok((_, forces)) = self.buffer.force_row_mut(step) {
                forces.fill(DVec2::ZERO);
            }
        }
    }

    fn guarded(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<(), SimError>,
    ) -> Result<(), SimError> {
        op(self).map_err(|err| {
            warn!("run aborted: {err}");
            self.phase = Phase::Failed;
            err
        })
    }

    fn energy_at(&self, step: usize) -> Result<Energy, SimError> {
        Ok(snapshot_energy(
            &self.model,
            self.buffer.positions(step)?,
            self.buffer.velocities(step)?,
            self.mass,
        ))
    }
}
