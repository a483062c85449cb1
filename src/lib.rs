//! # PWM Inverter
//!
//! A simulator for a single-phase PWM voltage-source inverter driving an RL load.
//!
//! This library provides:
//! - Naturally-sampled bipolar PWM generation (sine reference vs. triangle carrier)
//! - Fixed-step RK4 integration of the load current
//! - Magnitude spectrum and harmonic distortion of the switched voltage
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`params`] - Simulation parameters and validation
//! - [`waveform`] - Reference, carrier and comparator
//! - [`solver`] - RL load model, RK4 stepper and the simulation driver
//! - [`spectrum`] - FFT magnitude spectrum and THD
//! - [`output`] - CSV output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! pwm-inverter --modulation-index 0.9 --output spectrum > spectrum.csv
//! ```
//!
//! ### Library
//!
//! ```
//! use pwm_inverter::{SimulationParameters, Simulator};
//!
//! let params = SimulationParameters::default()
//!     .with_modulation_index(0.9)
//!     .with_time_step(1e-5);
//! let mut sim = Simulator::new(params).unwrap();
//! let analysis = sim.run().unwrap();
//! assert_eq!(analysis.samples.len(), params.sample_count() + 1);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmInverterSim } from 'pwm_inverter';
//!
//! const sim = new WasmInverterSim(0.75, 10, 3000, 60, 1, 0.01, 1e-6);
//! sim.recompute();
//! const il = sim.load_current();
//! ```
//!
//! ## Simulation Method
//!
//! A run always covers one period of the reference sine, split into
//! N = floor(1 / (f_ref dt)) fixed steps. Index 0 is seeded with
//! vd = +V_peak and zero load current. For each step the comparator output
//! from the start of the step drives the RK4 update of the load current.

pub mod error;
pub mod params;
pub mod solver;
pub mod spectrum;
pub mod waveform;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use error::{InverterError, Result};
pub use params::SimulationParameters;
pub use solver::{simulate, Analysis, SampleSeries, Simulator, Trace};
pub use spectrum::{HarmonicReport, SpectrumSeries};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmInverterSim;

/// Default carrier frequency in Hz
pub const DEFAULT_CARRIER_FREQUENCY: f64 = 3e3;

/// Default reference (output) frequency in Hz
pub const DEFAULT_REFERENCE_FREQUENCY: f64 = 60.0;

/// Default peak bus voltage in volts
pub const DEFAULT_BUS_VOLTAGE_PEAK: f64 = 10.0;

/// Default modulation index
pub const DEFAULT_MODULATION_INDEX: f64 = 0.75;

/// Default load resistance in ohms
pub const DEFAULT_LOAD_RESISTANCE: f64 = 1.0;

/// Default load inductance in henries
pub const DEFAULT_LOAD_INDUCTANCE: f64 = 1e-2;

/// Default integration step in seconds
pub const DEFAULT_TIME_STEP: f64 = 1e-6;

/// Largest accepted number of integration steps per run
pub const MAX_SAMPLE_COUNT: usize = 100_000_000;

/// Default number of harmonics in a harmonic report
pub const DEFAULT_HARMONICS: usize = 50;
