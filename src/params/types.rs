//! Core parameter type for inverter simulation.

use std::fmt;

use crate::{
    DEFAULT_BUS_VOLTAGE_PEAK, DEFAULT_CARRIER_FREQUENCY, DEFAULT_LOAD_INDUCTANCE,
    DEFAULT_LOAD_RESISTANCE, DEFAULT_MODULATION_INDEX, DEFAULT_REFERENCE_FREQUENCY,
    DEFAULT_TIME_STEP,
};

/// Parameters for one simulation run.
///
/// The total simulated duration is always exactly one period of the
/// reference sine, so the number of integration steps is derived rather
/// than configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Triangular carrier frequency f_c (Hz)
    pub carrier_frequency: f64,
    /// Reference sine frequency f_ref (Hz)
    pub reference_frequency: f64,
    /// Peak bus voltage V_peak (V)
    pub bus_voltage_peak: f64,
    /// Reference amplitude as a fraction of V_peak, in [0, 1]
    pub modulation_index: f64,
    /// Load resistance R (ohms)
    pub load_resistance: f64,
    /// Load inductance L (henries)
    pub load_inductance: f64,
    /// Fixed integration step Δt (seconds)
    pub time_step: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            carrier_frequency: DEFAULT_CARRIER_FREQUENCY,
            reference_frequency: DEFAULT_REFERENCE_FREQUENCY,
            bus_voltage_peak: DEFAULT_BUS_VOLTAGE_PEAK,
            modulation_index: DEFAULT_MODULATION_INDEX,
            load_resistance: DEFAULT_LOAD_RESISTANCE,
            load_inductance: DEFAULT_LOAD_INDUCTANCE,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl SimulationParameters {
    /// Create a parameter set with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the carrier frequency (Hz).
    pub fn with_carrier_frequency(mut self, frequency: f64) -> Self {
        self.carrier_frequency = frequency;
        self
    }

    /// Set the reference frequency (Hz).
    pub fn with_reference_frequency(mut self, frequency: f64) -> Self {
        self.reference_frequency = frequency;
        self
    }

    /// Set the peak bus voltage (V).
    pub fn with_bus_voltage_peak(mut self, voltage: f64) -> Self {
        self.bus_voltage_peak = voltage;
        self
    }

    /// Set the modulation index.
    ///
    /// Values outside [0, 1] are clamped, matching a 0-100 % slider.
    pub fn with_modulation_index(mut self, index: f64) -> Self {
        self.modulation_index = clamp_modulation_index(index);
        self
    }

    /// Set the RL load.
    pub fn with_load(mut self, resistance: f64, inductance: f64) -> Self {
        self.load_resistance = resistance;
        self.load_inductance = inductance;
        self
    }

    /// Set the integration step (seconds).
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Carrier period T_c = 1/f_c.
    pub fn carrier_period(&self) -> f64 {
        1.0 / self.carrier_frequency
    }

    /// Simulated duration: one reference period, 1/f_ref.
    pub fn duration(&self) -> f64 {
        1.0 / self.reference_frequency
    }

    /// Peak of the reference sine, m * V_peak.
    pub fn reference_amplitude(&self) -> f64 {
        self.modulation_index * self.bus_voltage_peak
    }

    /// Load time constant L/R (seconds). Infinite for a purely inductive load.
    pub fn time_constant(&self) -> f64 {
        self.load_inductance / self.load_resistance
    }

    /// Number of integration steps N = floor(duration / Δt).
    ///
    /// Series produced by a run hold N + 1 samples.
    pub fn sample_count(&self) -> usize {
        let steps = (self.duration() / self.time_step).floor();
        if steps.is_finite() && steps > 0.0 {
            steps as usize
        } else {
            0
        }
    }
}

impl fmt::Display for SimulationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fc={} Hz, fref={} Hz, Vpk={} V, m={}, R={} ohm, L={} H, dt={} s",
            self.carrier_frequency,
            self.reference_frequency,
            self.bus_voltage_peak,
            self.modulation_index,
            self.load_resistance,
            self.load_inductance,
            self.time_step,
        )
    }
}

/// Clamp a modulation index to [0, 1]. NaN maps to 0.
pub(crate) fn clamp_modulation_index(index: f64) -> f64 {
    if index.is_nan() {
        0.0
    } else {
        index.clamp(0.0, 1.0)
    }
}
