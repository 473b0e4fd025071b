pub mod config;
pub mod energy;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod state;
pub mod trajectory;

pub use config::{PairwiseConfig, RunParameters, UniformFallConfig};
pub use energy::{kinetic_energy, snapshot_energy, Energy};
pub use error::{CoincidentParticles, SimError};
pub use forces::{ForceModel, PairwiseSpring, UniformForce, DEFAULT_GRAVITY};
pub use integrator::{Integrator, Phase};
pub use scenario::{simulate_pairwise, simulate_uniform_fall};
pub use state::{ParticleState, StateBuffer};
pub use trajectory::Trajectory;
