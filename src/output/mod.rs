//! CSV output for the CLI frontend.
//!
//! Handles writing sample series, spectra and harmonic reports to stdout.

use std::io::{self, BufWriter, Write};

use crate::error::{InverterError, Result};
use crate::solver::{SampleSeries, Trace};
use crate::spectrum::{HarmonicReport, SpectrumSeries};

/// CSV writer over any byte sink.
pub struct CsvOutput<W: Write> {
    writer: BufWriter<W>,
}

impl CsvOutput<io::Stdout> {
    /// Create a writer for stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CsvOutput<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }

    /// Write all traces with a `time,vd,sine,il,vtri` header.
    pub fn write_samples(&mut self, series: &SampleSeries) -> Result<()> {
        let header: Vec<&str> = std::iter::once("time")
            .chain(Trace::ALL.iter().map(|t| t.label()))
            .collect();
        self.line(&header.join(","))?;

        for i in 0..series.len() {
            self.line(&format!(
                "{:e},{},{},{:e},{}",
                series.time[i], series.vd[i], series.sine[i], series.il[i], series.vtri[i]
            ))?;
        }
        Ok(())
    }

    /// Write `(bin, magnitude)` rows, with frequency in Hz for `time_step`.
    pub fn write_spectrum(&mut self, spectrum: &SpectrumSeries, time_step: f64) -> Result<()> {
        self.line("bin,frequency,magnitude")?;
        for (bin, magnitude) in spectrum.points() {
            self.line(&format!(
                "{},{},{:e}",
                bin,
                spectrum.bin_frequency(bin, time_step),
                magnitude
            ))?;
        }
        Ok(())
    }

    /// Write one row per harmonic followed by a THD summary row.
    pub fn write_harmonics(&mut self, report: &HarmonicReport) -> Result<()> {
        self.line("harmonic,bin,amplitude,relative_percent")?;
        for info in &report.harmonics {
            self.line(&format!(
                "{},{},{:e},{}",
                info.harmonic_number, info.bin, info.amplitude, info.relative_percent
            ))?;
        }
        self.line(&format!("# dc={:e} thd_percent={}", report.dc, report.thd_percent))
    }

    /// Flush the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| InverterError::output(e.to_string()))
    }

    /// Recover the underlying sink, flushing buffered rows.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| InverterError::output(e.error().to_string()))
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text).map_err(|e| InverterError::output(e.to_string()))
    }
}
