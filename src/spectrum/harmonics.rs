//! Total Harmonic Distortion (THD) computation.
//!
//! THD measures the harmonic content relative to the fundamental:
//!
//! THD = sqrt(A2² + A3² + ... + An²) / A1 × 100%
//!
//! where A1 is the fundamental amplitude and A2..An are harmonic amplitudes.
//! Amplitudes are one-sided peak values, twice the two-sided bin magnitude.

use super::SpectrumSeries;

/// Information about a single harmonic.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicInfo {
    /// Harmonic number (1 = fundamental)
    pub harmonic_number: usize,
    /// Spectrum bin the harmonic was read from
    pub bin: usize,
    /// Peak amplitude
    pub amplitude: f64,
    /// Amplitude relative to the fundamental (percentage)
    pub relative_percent: f64,
}

/// Result of harmonic analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicReport {
    /// Bin of the fundamental
    pub fundamental_bin: usize,
    /// Peak amplitude of the fundamental
    pub fundamental_amplitude: f64,
    /// DC component
    pub dc: f64,
    /// Fundamental and every harmonic below the Nyquist bin
    pub harmonics: Vec<HarmonicInfo>,
    /// Root-sum-square of the harmonics above the fundamental
    pub harmonic_rss: f64,
    /// THD as a percentage. Zero when the fundamental is zero.
    pub thd_percent: f64,
}

impl HarmonicReport {
    /// Build a report for harmonics 1..=`num_harmonics` of `fundamental_bin`.
    ///
    /// Harmonics at or above the Nyquist bin (N/2) are skipped.
    pub fn from_spectrum(
        spectrum: &SpectrumSeries,
        fundamental_bin: usize,
        num_harmonics: usize,
    ) -> Self {
        let nyquist = spectrum.len() / 2;
        let dc = spectrum.magnitude_at(0).unwrap_or(0.0);

        let amplitudes: Vec<(usize, usize, f64)> = if fundamental_bin == 0 {
            Vec::new()
        } else {
            (1..=num_harmonics)
                .map(|h| (h, h * fundamental_bin))
                .take_while(|&(_, bin)| bin < nyquist)
                .map(|(h, bin)| (h, bin, 2.0 * spectrum.magnitude[bin]))
                .collect()
        };

        let fundamental_amplitude = amplitudes.first().map(|&(_, _, a)| a).unwrap_or(0.0);
        let harmonic_rss = amplitudes
            .iter()
            .skip(1)
            .map(|&(_, _, a)| a * a)
            .sum::<f64>()
            .sqrt();

        let relative = |a: f64| {
            if fundamental_amplitude > 0.0 {
                a / fundamental_amplitude * 100.0
            } else {
                0.0
            }
        };

        let harmonics = amplitudes
            .iter()
            .map(|&(harmonic_number, bin, amplitude)| HarmonicInfo {
                harmonic_number,
                bin,
                amplitude,
                relative_percent: relative(amplitude),
            })
            .collect();

        Self {
            fundamental_bin,
            fundamental_amplitude,
            dc,
            harmonics,
            harmonic_rss,
            thd_percent: relative(harmonic_rss),
        }
    }

    /// Number of harmonics included, fundamental counted.
    pub fn num_harmonics(&self) -> usize {
        self.harmonics.len()
    }

    /// Amplitude of harmonic `h`, if it was analyzed.
    pub fn amplitude(&self, h: usize) -> Option<f64> {
        self.harmonics
            .iter()
            .find(|info| info.harmonic_number == h)
            .map(|info| info.amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::magnitude_spectrum;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_thd_of_fundamental_plus_third() {
        let n = 256;
        let x: Vec<f64> = (0..n)
            .map(|j| {
                let w = 2.0 * PI * j as f64 / n as f64;
                4.0 * w.sin() + 1.0 * (3.0 * w).sin()
            })
            .collect();

        let spectrum = magnitude_spectrum(&x).unwrap();
        let report = HarmonicReport::from_spectrum(&spectrum, 1, 10);

        assert_eq!(report.num_harmonics(), 10);
        assert_abs_diff_eq!(report.fundamental_amplitude, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.amplitude(3).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.amplitude(2).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.thd_percent, 25.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.dc, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_harmonics_stop_below_nyquist() {
        let spectrum = SpectrumSeries {
            magnitude: vec![0.0; 16],
        };
        // Nyquist bin is 8; fundamental at 3 allows harmonics 1 and 2
        let report = HarmonicReport::from_spectrum(&spectrum, 3, 10);
        assert_eq!(report.num_harmonics(), 2);
        assert_eq!(report.thd_percent, 0.0);
    }

    #[test]
    fn test_zero_fundamental_bin() {
        let spectrum = SpectrumSeries {
            magnitude: vec![1.0; 8],
        };
        let report = HarmonicReport::from_spectrum(&spectrum, 0, 5);
        assert!(report.harmonics.is_empty());
        assert_eq!(report.dc, 1.0);
    }
}
