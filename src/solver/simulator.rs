//! Main simulator interface.

use log::debug;

use crate::error::Result;
use crate::params::{validate_parameters, SimulationParameters};
use crate::spectrum::{self, SpectrumSeries};
use crate::waveform::WaveformGenerator;

use super::rk4::{Rk4Stepper, RlLoad};
use super::SampleSeries;

/// Outputs of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Time-domain traces
    pub samples: SampleSeries,
    /// Magnitude spectrum of the switched voltage
    pub spectrum: SpectrumSeries,
}

/// Simulate one reference period with validated parameters.
///
/// Index 0 is seeded with `vd = V_peak` and zero current. Each step from
/// `i` to `i + 1` integrates the load with the voltage held at `vd[i]`,
/// then samples the waveforms at `t = (i + 1) * dt`.
pub fn simulate(params: &SimulationParameters) -> Result<SampleSeries> {
    validate_parameters(params)?;
    Ok(integrate(params))
}

/// Run the time-stepping loop. Parameters must already be valid.
fn integrate(params: &SimulationParameters) -> SampleSeries {
    let steps = params.sample_count();
    let dt = params.time_step;
    let generator = WaveformGenerator::new(params);
    let stepper = Rk4Stepper::new(
        RlLoad::new(params.load_resistance, params.load_inductance),
        dt,
    );

    debug!("simulating {} steps ({})", steps, params);

    let mut series = SampleSeries::with_capacity(steps + 1);
    series.push(0.0, params.bus_voltage_peak, 0.0, 0.0, 0.0);

    for i in 0..steps {
        let t = (i + 1) as f64 * dt;
        let sample = generator.sample(t);
        let il = stepper.step(series.vd[i], series.il[i]);
        series.push(t, sample.switched, sample.reference, il, sample.carrier);
    }

    series
}

/// The PWM inverter simulator.
///
/// Holds the parameters for the next run and the results of the last one.
/// Results are published only when a run has fully completed; changing a
/// parameter discards them.
pub struct Simulator {
    /// Parameters for the next run
    params: SimulationParameters,
    /// Results of the last complete run; `None` while idle
    results: Option<Analysis>,
}

impl Simulator {
    /// Create a simulator with default parameters.
    pub fn with_defaults() -> Self {
        Self {
            params: SimulationParameters::default(),
            results: None,
        }
    }

    /// Create a simulator, rejecting invalid parameters.
    pub fn new(params: SimulationParameters) -> Result<Self> {
        validate_parameters(&params)?;
        Ok(Self {
            params,
            results: None,
        })
    }

    /// Current parameters.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Replace all parameters.
    ///
    /// On error the previous parameters and results are kept.
    pub fn set_parameters(&mut self, params: SimulationParameters) -> Result<()> {
        validate_parameters(&params)?;
        self.params = params;
        self.results = None;
        Ok(())
    }

    /// Change the modulation index, clamped to [0, 1].
    pub fn set_modulation_index(&mut self, index: f64) {
        self.params = self.params.with_modulation_index(index);
        self.results = None;
    }

    /// Recompute samples and spectrum from scratch.
    pub fn run(&mut self) -> Result<&Analysis> {
        let samples = integrate(&self.params);
        let spectrum = spectrum::analyze(&samples)?;
        debug!(
            "run complete: {} samples, {} spectral bins",
            samples.len(),
            spectrum.len()
        );

        Ok(self.results.insert(Analysis { samples, spectrum }))
    }

    /// Whether results for the current parameters are available.
    pub fn is_complete(&self) -> bool {
        self.results.is_some()
    }

    /// Results of the last run, if any.
    pub fn analysis(&self) -> Option<&Analysis> {
        self.results.as_ref()
    }

    /// Samples of the last run, if any.
    pub fn samples(&self) -> Option<&SampleSeries> {
        self.analysis().map(|a| &a.samples)
    }

    /// Spectrum of the last run, if any.
    pub fn spectrum(&self) -> Option<&SpectrumSeries> {
        self.analysis().map(|a| &a.spectrum)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InverterError;
    use approx::assert_relative_eq;

    /// Coarse parameters: 1 Hz reference, 1 ms step, 1000 steps.
    fn coarse() -> SimulationParameters {
        SimulationParameters::default()
            .with_reference_frequency(1.0)
            .with_carrier_frequency(50.0)
            .with_load(1.0, 0.1)
            .with_time_step(1e-3)
    }

    #[test]
    fn test_series_lengths_and_time_axis() {
        let params = SimulationParameters::default();
        let series = simulate(&params).unwrap();
        let n = params.sample_count();

        assert_eq!(series.len(), n + 1);
        assert_eq!(series.vd.len(), n + 1);
        assert_eq!(series.sine.len(), n + 1);
        assert_eq!(series.il.len(), n + 1);
        assert_eq!(series.vtri.len(), n + 1);

        for (i, &t) in series.time.iter().enumerate() {
            assert_eq!(t, i as f64 * params.time_step);
        }
        assert!(series.time.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_initial_conditions() {
        for m in [0.0, 0.3, 1.0] {
            let params = coarse().with_modulation_index(m).with_bus_voltage_peak(24.0);
            let series = simulate(&params).unwrap();
            assert_eq!(series.il[0], 0.0);
            assert_eq!(series.vd[0], 24.0);
            assert_eq!(series.sine[0], 0.0);
            assert_eq!(series.vtri[0], 0.0);
        }
    }

    #[test]
    fn test_samples_follow_generator() {
        let params = coarse();
        let series = simulate(&params).unwrap();
        let generator = WaveformGenerator::new(&params);

        for i in 1..series.len() {
            let t = series.time[i];
            assert_eq!(series.vd[i], generator.switched_voltage(t));
            assert_eq!(series.sine[i], generator.reference(t));
            assert_eq!(series.vtri[i], generator.carrier(t));
        }
    }

    #[test]
    fn test_current_uses_start_of_step_voltage() {
        let params = coarse();
        let series = simulate(&params).unwrap();
        let stepper = Rk4Stepper::new(
            RlLoad::new(params.load_resistance, params.load_inductance),
            params.time_step,
        );

        for i in 0..series.step_count() {
            let expected = series.il[i] + stepper.increment(series.vd[i], series.il[i]);
            assert_eq!(series.il[i + 1], expected);
        }
        // First step is driven by the +V_peak seed
        assert!(series.il[1] > 0.0);
    }

    #[test]
    fn test_zero_modulation_switches_on_carrier_sign() {
        let params = coarse().with_modulation_index(0.0);
        let series = simulate(&params).unwrap();

        for i in 1..series.len() {
            let expected = if series.vtri[i] < 0.0 { 10.0 } else { -10.0 };
            assert_eq!(series.vd[i], expected);
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let params = SimulationParameters::default().with_time_step(-1.0);
        assert!(matches!(
            simulate(&params),
            Err(InverterError::InvalidParameter { .. })
        ));
        assert!(Simulator::new(params).is_err());
    }

    #[test]
    fn test_tiny_time_step_rejected_before_run() {
        let params = SimulationParameters::default()
            .with_reference_frequency(1.0)
            .with_time_step(1e-300);
        assert!(matches!(
            Simulator::new(params),
            Err(InverterError::InvalidParameter { ref param, .. }) if param == "time_step"
        ));

        let mut sim = Simulator::new(coarse()).unwrap();
        assert!(sim.set_parameters(params).is_err());
        assert_eq!(sim.params(), &coarse());
    }

    #[test]
    fn test_run_publishes_results() {
        let mut sim = Simulator::new(coarse()).unwrap();
        assert!(!sim.is_complete());
        assert!(sim.samples().is_none());

        let analysis = sim.run().unwrap();
        assert_eq!(analysis.samples.len(), 1001);
        assert_eq!(analysis.spectrum.len(), 1000);
        assert!(sim.is_complete());
    }

    #[test]
    fn test_parameter_change_invalidates() {
        let mut sim = Simulator::new(coarse()).unwrap();
        sim.run().unwrap();

        sim.set_modulation_index(1.7);
        assert_eq!(sim.params().modulation_index, 1.0);
        assert!(!sim.is_complete());

        sim.run().unwrap();
        let series = sim.samples().unwrap();
        assert_relative_eq!(
            series.sine.iter().cloned().fold(f64::MIN, f64::max),
            10.0,
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_invalid_update_keeps_state() {
        let mut sim = Simulator::new(coarse()).unwrap();
        sim.run().unwrap();
        let before = sim.analysis().cloned();

        let bad = coarse().with_load(1.0, 0.0);
        assert!(sim.set_parameters(bad).is_err());
        assert_eq!(sim.params(), &coarse());
        assert_eq!(sim.analysis().cloned(), before);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let mut sim = Simulator::new(coarse()).unwrap();
        let first = sim.run().unwrap().clone();
        let second = sim.run().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fundamental_tracks_modulation_index() {
        let params = SimulationParameters::default().with_time_step(1e-6);
        let mut sim = Simulator::new(params).unwrap();

        let magnitudes = &sim.run().unwrap().spectrum;
        let report = spectrum::HarmonicReport::from_spectrum(magnitudes, 1, 1);

        // Fundamental of naturally-sampled PWM is close to m * V_peak
        assert_relative_eq!(report.fundamental_amplitude, 7.5, max_relative = 0.05);
    }
}
