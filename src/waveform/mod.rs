//! PWM waveform generation.
//!
//! This module produces the three instantaneous signals of a naturally-sampled
//! bipolar PWM stage:
//! - Reference: the modulating sine, m * V_peak * sin(2π f_ref t)
//! - Carrier: a bipolar triangle spanning [-V_peak, V_peak]
//! - Switched voltage: +V_peak while the reference is above the carrier,
//!   -V_peak otherwise
//!
//! All functions are pure in `t` and the parameters.

mod carrier;
mod comparator;
mod reference;

pub use carrier::TriangleCarrier;
pub use comparator::compare;
pub use reference::SineReference;

use crate::params::SimulationParameters;

/// The three waveform values at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSample {
    /// Reference sine value
    pub reference: f64,
    /// Carrier triangle value
    pub carrier: f64,
    /// Comparator output (±V_peak)
    pub switched: f64,
}

/// Generator for the reference, carrier and switched voltage.
#[derive(Debug, Clone, Copy)]
pub struct WaveformGenerator {
    reference: SineReference,
    carrier: TriangleCarrier,
    bus_voltage_peak: f64,
}

impl WaveformGenerator {
    /// Create a generator for the given parameters.
    ///
    /// The carrier period must be non-zero, which parameter validation
    /// guarantees.
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            reference: SineReference::new(params.reference_amplitude(), params.reference_frequency),
            carrier: TriangleCarrier::new(params.bus_voltage_peak, params.carrier_period()),
            bus_voltage_peak: params.bus_voltage_peak,
        }
    }

    /// Reference sine at time `t`.
    pub fn reference(&self, t: f64) -> f64 {
        self.reference.value(t)
    }

    /// Carrier triangle at time `t`.
    pub fn carrier(&self, t: f64) -> f64 {
        self.carrier.value(t)
    }

    /// Switched bus voltage at time `t`.
    pub fn switched_voltage(&self, t: f64) -> f64 {
        compare(self.reference(t), self.carrier(t), self.bus_voltage_peak)
    }

    /// Evaluate all three signals at time `t`.
    pub fn sample(&self, t: f64) -> WaveformSample {
        let reference = self.reference(t);
        let carrier = self.carrier(t);
        WaveformSample {
            reference,
            carrier,
            switched: compare(reference, carrier, self.bus_voltage_peak),
        }
    }
}
