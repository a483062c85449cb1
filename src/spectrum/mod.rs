//! Harmonic analysis of the switched voltage.
//!
//! # Features
//!
//! - **Magnitude spectrum** - |X_k| / N for every DFT bin of the first N
//!   samples, computed with `rustfft`
//! - **Harmonic report** - per-harmonic amplitudes and total harmonic
//!   distortion relative to a chosen fundamental bin
//!
//! Because a run always covers exactly one reference period, bin `h` of the
//! switched-voltage spectrum is the `h`-th harmonic of the reference.
//!
//! # Example
//!
//! ```
//! use pwm_inverter::{simulate, spectrum, SimulationParameters};
//!
//! let params = SimulationParameters::default().with_time_step(1e-5);
//! let samples = simulate(&params).unwrap();
//! let magnitudes = spectrum::analyze(&samples).unwrap();
//! let report = spectrum::HarmonicReport::from_spectrum(&magnitudes, 1, 50);
//! assert!(report.fundamental_amplitude > 0.0);
//! ```

mod fft;
mod harmonics;

pub use fft::{analyze, magnitude_spectrum, SpectrumSeries, TransformContext};
pub use harmonics::{HarmonicInfo, HarmonicReport};
