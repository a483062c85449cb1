//! WASM bindings for the PWM inverter simulator.
//!
//! This module provides JavaScript-friendly bindings for browser front ends
//! that plot the traces and the spectrum.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmInverterSim } from 'pwm_inverter';
//!
//! await init();
//!
//! const sim = new WasmInverterSim(0.75, 10, 3000, 60, 1, 0.01, 1e-6);
//! sim.recompute();
//! plot(sim.time(), sim.switched_voltage());
//!
//! // Slider moved
//! slider.oninput = (e) => {
//!   sim.set_modulation_index(e.target.value / 100);
//!   sim.recompute();
//! };
//! ```

use wasm_bindgen::prelude::*;

use crate::error::InverterError;
use crate::params::SimulationParameters;
use crate::solver::{Simulator, Trace};
use crate::spectrum::HarmonicReport;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: InverterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible PWM inverter simulator.
///
/// Wraps the native [`Simulator`]. Trace getters return empty arrays until
/// `recompute` has been called for the current parameters.
#[wasm_bindgen]
pub struct WasmInverterSim {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmInverterSim {
    /// Create a new simulator.
    ///
    /// # Arguments
    /// * `modulation_index` - Reference peak / bus peak, clamped to [0, 1]
    /// * `bus_voltage_peak` - Peak bus voltage (V)
    /// * `carrier_frequency` - Carrier frequency (Hz)
    /// * `reference_frequency` - Reference frequency (Hz)
    /// * `load_resistance` - Load resistance (ohms)
    /// * `load_inductance` - Load inductance (H)
    /// * `time_step` - Integration step (s)
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        modulation_index: f64,
        bus_voltage_peak: f64,
        carrier_frequency: f64,
        reference_frequency: f64,
        load_resistance: f64,
        load_inductance: f64,
        time_step: f64,
    ) -> Result<WasmInverterSim, JsValue> {
        let params = SimulationParameters::new()
            .with_modulation_index(modulation_index)
            .with_bus_voltage_peak(bus_voltage_peak)
            .with_carrier_frequency(carrier_frequency)
            .with_reference_frequency(reference_frequency)
            .with_load(load_resistance, load_inductance)
            .with_time_step(time_step);

        let simulator = Simulator::new(params).map_err(to_js)?;
        Ok(WasmInverterSim { simulator })
    }

    /// Create a simulator with the default parameters.
    #[wasm_bindgen]
    pub fn with_defaults() -> WasmInverterSim {
        WasmInverterSim {
            simulator: Simulator::with_defaults(),
        }
    }

    /// Change the modulation index. Results are discarded until the next
    /// `recompute`.
    #[wasm_bindgen]
    pub fn set_modulation_index(&mut self, index: f64) {
        self.simulator.set_modulation_index(index);
    }

    /// Current (clamped) modulation index.
    #[wasm_bindgen(getter)]
    pub fn modulation_index(&self) -> f64 {
        self.simulator.params().modulation_index
    }

    /// Recompute all traces and the spectrum.
    #[wasm_bindgen]
    pub fn recompute(&mut self) -> Result<(), JsValue> {
        self.simulator.run().map(|_| ()).map_err(|e| {
            to_js(InverterError::WasmError {
                message: e.to_string(),
            })
        })
    }

    /// Time axis in seconds.
    #[wasm_bindgen]
    pub fn time(&self) -> Vec<f64> {
        self.simulator
            .samples()
            .map(|s| s.time.clone())
            .unwrap_or_default()
    }

    /// Switched bus voltage.
    #[wasm_bindgen]
    pub fn switched_voltage(&self) -> Vec<f64> {
        self.trace(Trace::SwitchedVoltage)
    }

    /// Reference sine.
    #[wasm_bindgen]
    pub fn reference(&self) -> Vec<f64> {
        self.trace(Trace::Reference)
    }

    /// Load current.
    #[wasm_bindgen]
    pub fn load_current(&self) -> Vec<f64> {
        self.trace(Trace::LoadCurrent)
    }

    /// Carrier triangle.
    #[wasm_bindgen]
    pub fn carrier(&self) -> Vec<f64> {
        self.trace(Trace::Carrier)
    }

    /// Magnitude spectrum of the switched voltage, indexed by bin.
    #[wasm_bindgen]
    pub fn spectrum(&self) -> Vec<f64> {
        self.simulator
            .spectrum()
            .map(|s| s.magnitude.clone())
            .unwrap_or_default()
    }

    /// THD of the switched voltage over `harmonics` harmonics, or `undefined`
    /// before the first `recompute`.
    #[wasm_bindgen]
    pub fn thd_percent(&self, harmonics: usize) -> Option<f64> {
        self.simulator
            .spectrum()
            .map(|s| HarmonicReport::from_spectrum(s, 1, harmonics).thd_percent)
    }
}

impl WasmInverterSim {
    fn trace(&self, trace: Trace) -> Vec<f64> {
        self.simulator
            .samples()
            .map(|s| s.trace(trace).to_vec())
            .unwrap_or_default()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
