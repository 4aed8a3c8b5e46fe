#![deny(missing_docs)]
#![doc = "Coupled-channel K-matrix propagator: model configuration loading, phase-space factors with analytic continuation below threshold, the real symmetric scattering K-matrix, and the cached complex propagator (I - iK rho)^-1 consumed row-wise by amplitude code."]

pub mod config;
pub mod phase_space;
pub mod propagator;
pub mod scattering;

pub use config::ModelConfig;
pub use propagator::KMatrixPropagator;
