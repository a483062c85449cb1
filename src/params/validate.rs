//! Parameter validation.

use crate::error::{InverterError, Result};
use crate::MAX_SAMPLE_COUNT;

use super::SimulationParameters;

/// Validate parameters before a run.
///
/// Checks:
/// - Every value is finite
/// - Frequencies, time step, inductance and bus voltage are strictly positive
/// - Resistance is non-negative
/// - The reference period holds at least one integration step and at most
///   [`MAX_SAMPLE_COUNT`]
pub fn validate_parameters(params: &SimulationParameters) -> Result<()> {
    require_positive("carrier_frequency", params.carrier_frequency)?;
    require_positive("reference_frequency", params.reference_frequency)?;
    require_positive("time_step", params.time_step)?;
    require_positive("load_inductance", params.load_inductance)?;
    require_positive("bus_voltage_peak", params.bus_voltage_peak)?;

    if !params.load_resistance.is_finite() || params.load_resistance < 0.0 {
        return Err(InverterError::invalid_parameter(
            "load_resistance",
            format!("must be finite and non-negative, got {}", params.load_resistance),
        ));
    }

    if !(0.0..=1.0).contains(&params.modulation_index) {
        return Err(InverterError::invalid_parameter(
            "modulation_index",
            format!("must lie in [0, 1], got {}", params.modulation_index),
        ));
    }

    let ratio = params.duration() / params.time_step;
    if !ratio.is_finite() || ratio >= (MAX_SAMPLE_COUNT as f64 + 1.0) {
        return Err(InverterError::invalid_parameter(
            "time_step",
            format!(
                "{} s step gives {:e} steps per reference period, limit is {}",
                params.time_step, ratio, MAX_SAMPLE_COUNT
            ),
        ));
    }

    let steps = params.sample_count();
    if steps < 1 {
        return Err(InverterError::insufficient_samples(1, steps));
    }

    Ok(())
}

fn require_positive(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InverterError::invalid_parameter(
            param,
            format!("must be finite and positive, got {}", value),
        ))
    }
}
