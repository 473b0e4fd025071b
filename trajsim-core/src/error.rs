use thiserror::Error;

/// Errors raised while configuring, running or reading a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Non-physical or malformed input parameters, detected before stepping begins
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two particles occupy the same position, so the pair direction is undefined
    #[error("particles {i} and {j} coincide at step {step}")]
    DegenerateConfiguration { step: usize, i: usize, j: usize },

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }
}

/// Raised by a force model when two particles share a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("particles {i} and {j} coincide")]
pub struct CoincidentParticles {
    pub i: usize,
    pub j: usize,
}

impl CoincidentParticles {
    /// Attach the step index at which the force model failed
    pub fn at_step(self, step: usize) -> SimError {
        SimError::DegenerateConfiguration {
            step,
            i: self.i,
            j: self.j,
        }
    }
}
