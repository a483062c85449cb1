//! FFT computation and magnitude spectrum.

use std::sync::Arc;

use log::{debug, trace};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::{InverterError, Result};
use crate::solver::SampleSeries;

/// Magnitude spectrum paired with bin indices.
///
/// Bin 0 is DC. The x-coordinate of each point is the bin index, not a
/// frequency; use [`SpectrumSeries::bin_frequency`] to convert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumSeries {
    /// |X_k| / N for k = 0..N
    pub magnitude: Vec<f64>,
}

impl SpectrumSeries {
    /// Number of bins (equal to the transform length N).
    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    /// Whether the spectrum is empty.
    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// `(bin_index, magnitude)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.magnitude.iter().copied().enumerate()
    }

    /// Magnitude at `bin`, if in range.
    pub fn magnitude_at(&self, bin: usize) -> Option<f64> {
        self.magnitude.get(bin).copied()
    }

    /// Bin with the largest magnitude. Ties resolve to the lowest bin.
    pub fn peak_bin(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (bin, mag) in self.points() {
            match best {
                Some((_, best_mag)) if mag <= best_mag => {}
                _ => best = Some((bin, mag)),
            }
        }
        best.map(|(bin, _)| bin)
    }

    /// Frequency of `bin` in Hz for samples spaced `time_step` seconds apart.
    pub fn bin_frequency(&self, bin: usize, time_step: f64) -> f64 {
        bin as f64 / (self.len() as f64 * time_step)
    }
}

/// Forward FFT plan and buffers for one transform length.
///
/// A context is acquired for a single analysis and released when dropped,
/// so plan state never outlives the run that created it.
pub struct TransformContext {
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl TransformContext {
    /// Plan a forward transform of `len` points.
    pub fn acquire(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(InverterError::insufficient_samples(1, 0));
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);
        let scratch_len = fft.get_inplace_scratch_len();
        trace!("planned {}-point FFT (scratch {})", len, scratch_len);

        Ok(Self {
            fft,
            buffer: vec![Complex::new(0.0, 0.0); len],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        })
    }

    /// Transform length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the transform length is zero. Never true for an acquired context.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// DFT of `samples`, which must hold exactly `len()` values.
    ///
    /// Release builds zero-pad a short input and ignore samples past
    /// `len()`; debug builds panic on a length mismatch.
    pub fn transform(&mut self, samples: &[f64]) -> &[Complex<f64>] {
        debug_assert_eq!(
            samples.len(),
            self.len(),
            "transform input length does not match the planned length"
        );
        for (dst, &src) in self
            .buffer
            .iter_mut()
            .zip(samples.iter().chain(std::iter::repeat(&0.0)))
        {
            *dst = Complex::new(src, 0.0);
        }
        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);
        &self.buffer
    }
}

impl Drop for TransformContext {
    fn drop(&mut self) {
        trace!("released {}-point FFT", self.buffer.len());
    }
}

/// Normalized magnitude spectrum of `samples`: |X_k| / N for every bin.
///
/// The input is not modified.
pub fn magnitude_spectrum(samples: &[f64]) -> Result<SpectrumSeries> {
    let n = samples.len();
    let mut context = TransformContext::acquire(n)?;
    let norm = n as f64;

    let magnitude = context
        .transform(samples)
        .iter()
        .map(|x| x.norm() / norm)
        .collect();

    debug!("computed {}-bin magnitude spectrum", n);
    Ok(SpectrumSeries { magnitude })
}

/// Magnitude spectrum of the switched voltage of a completed run.
///
/// Only the first N of the N + 1 samples are transformed, so the final
/// sample at exactly one reference period is not counted twice.
pub fn analyze(series: &SampleSeries) -> Result<SpectrumSeries> {
    let n = series.step_count();
    if n == 0 {
        return Err(InverterError::insufficient_samples(2, series.len()));
    }
    magnitude_spectrum(&series.vd[..n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Direct O(N^2) DFT magnitude, |X_k| / N.
    fn direct_dft_magnitude(x: &[f64]) -> Vec<f64> {
        let n = x.len();
        (0..n)
            .map(|k| {
                let (mut re, mut im) = (0.0, 0.0);
                for (j, &v) in x.iter().enumerate() {
                    let angle = -2.0 * PI * (k * j % n) as f64 / n as f64;
                    re += v * angle.cos();
                    im += v * angle.sin();
                }
                (re * re + im * im).sqrt() / n as f64
            })
            .collect()
    }

    #[test]
    fn test_pure_sinusoid_peak() {
        let n = 64;
        let k0 = 5;
        let amplitude = 3.0;
        let x: Vec<f64> = (0..n)
            .map(|j| amplitude * (2.0 * PI * (k0 * j) as f64 / n as f64).cos())
            .collect();

        let spectrum = magnitude_spectrum(&x).unwrap();
        assert_eq!(spectrum.len(), n);
        assert!(matches!(spectrum.peak_bin(), Some(k) if k == k0 || k == n - k0));
        assert_abs_diff_eq!(spectrum.magnitude[k0], amplitude / 2.0, epsilon = 1e-12);
        // Mirror bin of a real input
        assert_abs_diff_eq!(spectrum.magnitude[n - k0], amplitude / 2.0, epsilon = 1e-12);

        for (k, mag) in spectrum.points() {
            if k != k0 && k != n - k0 {
                assert_abs_diff_eq!(mag, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_dc_only() {
        let c = -2.5;
        let spectrum = magnitude_spectrum(&[c; 100]).unwrap();

        assert_abs_diff_eq!(spectrum.magnitude[0], c.abs(), epsilon = 1e-12);
        for &mag in &spectrum.magnitude[1..] {
            assert_abs_diff_eq!(mag, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_matches_direct_dft() {
        // Odd, non-power-of-two length with a square-ish wave
        let x: Vec<f64> = (0..97)
            .map(|j| if (j / 7) % 2 == 0 { 10.0 } else { -10.0 })
            .collect();

        let fast = magnitude_spectrum(&x).unwrap();
        let direct = direct_dft_magnitude(&x);

        for (a, b) in fast.magnitude.iter().zip(direct.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            assert!(*a >= 0.0);
        }
    }

    #[test]
    fn test_input_not_modified() {
        let x = vec![1.0, -2.0, 3.0, -4.0];
        let copy = x.clone();
        let _ = magnitude_spectrum(&x).unwrap();
        assert_eq!(x, copy);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            magnitude_spectrum(&[]),
            Err(InverterError::InsufficientSamples { .. })
        ));
    }

    #[test]
    fn test_analyze_drops_last_sample() {
        let mut series = SampleSeries::with_capacity(5);
        for i in 0..4 {
            series.push(i as f64, 1.0, 0.0, 0.0, 0.0);
        }
        // Final sample differs; it must not reach the transform
        series.push(4.0, 100.0, 0.0, 0.0, 0.0);

        let spectrum = analyze(&series).unwrap();
        assert_eq!(spectrum.len(), 4);
        assert_abs_diff_eq!(spectrum.magnitude[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_context_reuse_same_length() {
        let mut context = TransformContext::acquire(8).unwrap();
        let first: Vec<_> = context.transform(&[1.0; 8]).to_vec();
        let second: Vec<_> = context.transform(&[1.0; 8]).to_vec();
        assert_eq!(first, second);
        assert_abs_diff_eq!(first[0].re, 8.0, epsilon = 1e-12);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "planned length")]
    fn test_context_rejects_length_mismatch() {
        let mut context = TransformContext::acquire(8).unwrap();
        let _ = context.transform(&[1.0; 5]);
    }

    #[test]
    fn test_bin_frequency() {
        let spectrum = SpectrumSeries {
            magnitude: vec![0.0; 1000],
        };
        // 1000 samples at 1 us: 1 kHz bins
        assert_abs_diff_eq!(spectrum.bin_frequency(3, 1e-6), 3000.0, epsilon = 1e-6);
    }
}
