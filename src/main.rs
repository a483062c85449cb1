//! pwm-inverter - PWM Inverter Simulator
//!
//! Simulates one reference period of a single-phase PWM inverter driving an
//! RL load and prints the results as CSV.
//!
//! # Usage
//!
//! ```bash
//! pwm-inverter --modulation-index 0.9 --output samples > samples.csv
//! RUST_LOG=debug pwm-inverter --output harmonics --harmonics 25
//! ```

use clap::{Parser, ValueEnum};
use log::info;
use pwm_inverter::{
    error::Result,
    output::CsvOutput,
    HarmonicReport, SimulationParameters, Simulator, DEFAULT_BUS_VOLTAGE_PEAK,
    DEFAULT_CARRIER_FREQUENCY, DEFAULT_HARMONICS, DEFAULT_LOAD_INDUCTANCE,
    DEFAULT_LOAD_RESISTANCE, DEFAULT_MODULATION_INDEX, DEFAULT_REFERENCE_FREQUENCY,
    DEFAULT_TIME_STEP,
};

/// What to print.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputKind {
    /// Time-domain traces: time, vd, sine, il, vtri
    Samples,
    /// Magnitude spectrum of vd
    Spectrum,
    /// Harmonic amplitudes and THD of vd
    Harmonics,
}

/// Single-phase PWM inverter simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Modulation index (reference peak / bus peak), clamped to [0, 1]
    #[arg(short, long, default_value_t = DEFAULT_MODULATION_INDEX)]
    modulation_index: f64,

    /// Peak bus voltage in volts
    #[arg(long, default_value_t = DEFAULT_BUS_VOLTAGE_PEAK)]
    bus_voltage: f64,

    /// Carrier frequency in Hz
    #[arg(short, long, default_value_t = DEFAULT_CARRIER_FREQUENCY)]
    carrier_frequency: f64,

    /// Reference frequency in Hz
    #[arg(short, long, default_value_t = DEFAULT_REFERENCE_FREQUENCY)]
    reference_frequency: f64,

    /// Load resistance in ohms
    #[arg(long, default_value_t = DEFAULT_LOAD_RESISTANCE)]
    resistance: f64,

    /// Load inductance in henries
    #[arg(long, default_value_t = DEFAULT_LOAD_INDUCTANCE)]
    inductance: f64,

    /// Integration time step in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIME_STEP)]
    time_step: f64,

    /// Result to print
    #[arg(short, long, value_enum, default_value_t = OutputKind::Samples)]
    output: OutputKind,

    /// Number of harmonics in the harmonic report
    #[arg(long, default_value_t = DEFAULT_HARMONICS)]
    harmonics: usize,
}

impl Args {
    fn params(&self) -> SimulationParameters {
        SimulationParameters::new()
            .with_modulation_index(self.modulation_index)
            .with_bus_voltage_peak(self.bus_voltage)
            .with_carrier_frequency(self.carrier_frequency)
            .with_reference_frequency(self.reference_frequency)
            .with_load(self.resistance, self.inductance)
            .with_time_step(self.time_step)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let params = args.params();

    // Validates before anything is computed
    let mut simulator = Simulator::new(params)?;
    let analysis = simulator.run()?;

    let mut out = CsvOutput::stdout();
    match args.output {
        OutputKind::Samples => out.write_samples(&analysis.samples)?,
        OutputKind::Spectrum => out.write_spectrum(&analysis.spectrum, params.time_step)?,
        OutputKind::Harmonics => {
            let report = HarmonicReport::from_spectrum(&analysis.spectrum, 1, args.harmonics);
            info!(
                "fundamental {:.4} V, THD {:.2}%",
                report.fundamental_amplitude, report.thd_percent
            );
            out.write_harmonics(&report)?;
        }
    }
    out.flush()?;

    if let Some(peak) = analysis.spectrum.peak_bin() {
        info!(
            "dominant bin {} ({:.1} Hz)",
            peak,
            analysis.spectrum.bin_frequency(peak, params.time_step)
        );
    }
    Ok(())
}
