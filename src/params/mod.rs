//! Simulation parameters and their validation.
//!
//! The [`SimulationParameters`] value carries everything a run needs: the
//! switching frequencies, the bus voltage, the modulation index, the RL load
//! and the integration step. It is constructed once per run and never mutated
//! while a run is in progress.

mod types;
mod validate;

pub use types::SimulationParameters;
pub use validate::validate_parameters;
