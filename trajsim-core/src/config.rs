//! Scenario configuration
//!
//! Each scenario has a named configuration struct whose `Default` impl
//! carries the reference parameters. `validate` is called once before a run
//! starts; nothing is checked again inside the integration loop.

use crate::error::SimError;
use crate::forces::DEFAULT_GRAVITY;
use glam::DVec2;

/// Parameters shared by every scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    /// Total simulated time (s)
    pub total_time: f64,
    /// Step size (s)
    pub timestep: f64,
    /// Mass of every particle (kg)
    pub mass: f64,
}

impl RunParameters {
    pub fn new(total_time: f64, timestep: f64, mass: f64) -> Self {
        Self {
            total_time,
            timestep,
            mass,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        require_finite("total_time", self.total_time)?;
        require_finite("timestep", self.timestep)?;
        require_finite("mass", self.mass)?;

        if self.timestep <= 0.0 {
            return Err(SimError::invalid(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.total_time < self.timestep {
            return Err(SimError::invalid(format!(
                "total_time {} is shorter than one timestep {}",
                self.total_time, self.timestep
            )));
        }
        if self.mass <= 0.0 {
            return Err(SimError::invalid(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        Ok(())
    }

    /// Number of integration steps, `floor(total_time / timestep)`
    pub fn step_count(&self) -> Result<usize, SimError> {
        self.validate()?;
        let steps = (self.total_time / self.timestep).floor();
        // usize::MAX as f64 rounds up to 2^64, which does not fit
        if steps >= usize::MAX as f64 {
            return Err(SimError::invalid(format!("{steps} steps is too many")));
        }
        Ok(steps as usize)
    }
}

/// A single particle released at a height under constant gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFallConfig {
    pub run: RunParameters,
    /// Horizontal launch velocity (m/s)
    pub initial_velocity: f64,
    /// Starting height (m)
    pub height: f64,
    /// Downward gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl Default for UniformFallConfig {
    fn default() -> Self {
        Self {
            run: RunParameters::new(10.0, 0.05, 0.3),
            initial_velocity: -0.1,
            height: 553.0,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl UniformFallConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        self.run.validate()?;
        require_finite("initial_velocity", self.initial_velocity)?;
        require_finite("height", self.height)?;
        require_finite("gravity", self.gravity)
    }

    pub fn initial_position(&self) -> DVec2 {
        DVec2::new(0.0, self.height)
    }

    pub fn initial_velocity(&self) -> DVec2 {
        DVec2::new(self.initial_velocity, 0.0)
    }
}

/// Particles coupled pairwise by springs
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseConfig {
    pub run: RunParameters,
    /// Spring constant k (N/m)
    pub stiffness: f64,
    /// Separation r0 at which a pair exerts no force (m)
    pub rest_length: f64,
    pub initial_positions: Vec<DVec2>,
    /// One per particle; empty means every particle starts at rest
    pub initial_velocities: Vec<DVec2>,
}

impl Default for PairwiseConfig {
    fn default() -> Self {
        Self {
            run: RunParameters::new(10.0, 0.05, 1.0),
            stiffness: 5.0,
            rest_length: 1.0,
            initial_positions: vec![
                DVec2::new(0.0, 2.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(-1.0, 0.0),
            ],
            initial_velocities: Vec::new(),
        }
    }
}

impl PairwiseConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        self.run.validate()?;
        require_finite("stiffness", self.stiffness)?;
        require_finite("rest_length", self.rest_length)?;

        if self.rest_length < 0.0 {
            return Err(SimError::invalid(format!(
                "rest_length must not be negative, got {}",
                self.rest_length
            )));
        }
        if self.initial_positions.is_empty() {
            return Err(SimError::invalid("at least one particle is required"));
        }
        if !self.initial_velocities.is_empty()
            && self.initial_velocities.len() != self.initial_positions.len()
        {
            return Err(SimError::invalid(format!(
                "{} initial velocities given for {} particles",
                self.initial_velocities.len(),
                self.initial_positions.len()
            )));
        }
        for p in self.initial_positions.iter().chain(&self.initial_velocities) {
            if !p.is_finite() {
                return Err(SimError::invalid(format!(
                    "initial conditions must be finite, got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Initial velocities with the at-rest default filled in
    pub fn resolved_velocities(&self) -> Vec<DVec2> {
        if self.initial_velocities.is_empty() {
            vec![DVec2::ZERO; self.initial_positions.len()]
        } else {
            self.initial_velocities.clone()
        }
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}
