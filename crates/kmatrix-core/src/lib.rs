#![deny(missing_docs)]
#![doc = "Shared data model, physical constants and error types for the K-matrix scattering propagator crates."]

pub mod constants;
pub mod errors;
mod types;

pub use errors::{ErrorInfo, KMatrixError};
pub use types::{AdlerZero, ChannelType, Pole};
