//! Modulating sine reference.

use std::f64::consts::PI;

/// Sine reference: amplitude * sin(2π f t).
#[derive(Debug, Clone, Copy)]
pub struct SineReference {
    /// Peak value (m * V_peak)
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
}

impl SineReference {
    /// Create a new sine reference.
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Value at time `t`.
    pub fn value(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin()
    }
}
