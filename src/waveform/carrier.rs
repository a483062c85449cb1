//! Bipolar triangular carrier.
//!
//! The carrier is evaluated in closed form:
//!
//! ```text
//! vtri(t) = -(2 Vpk / Tc) * (Tc/2 - |((t + Tc/2) mod 2Tc) - Tc|)
//! ```
//!
//! `mod` keeps the sign of the dividend. The wave starts at 0, falls to
//! -Vpk at Tc/2, returns through 0 at Tc and peaks at +Vpk at 3Tc/2, so
//! consecutive Tc intervals are mirror images: vtri(t + Tc) = -vtri(t),
//! and the shape repeats every 2Tc.

/// Triangle carrier with amplitude `peak` and period parameter T_c.
///
/// The wave flips sign every T_c and repeats every 2T_c.
#[derive(Debug, Clone, Copy)]
pub struct TriangleCarrier {
    /// Peak value (V_peak)
    pub peak: f64,
    /// Carrier period T_c = 1/f_c (seconds); one rising or falling sweep
    pub period: f64,
}

impl TriangleCarrier {
    /// Create a new carrier. `period` must be non-zero.
    pub fn new(peak: f64, period: f64) -> Self {
        debug_assert!(period != 0.0, "carrier period must be non-zero");
        Self { peak, period }
    }

    /// Value at time `t`.
    pub fn value(&self, t: f64) -> f64 {
        let tc = self.period;
        let folded = ((t + 0.5 * tc) % (2.0 * tc) - tc).abs();
        -(2.0 * self.peak / tc) * (0.5 * tc - folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_carrier_corners() {
        let tri = TriangleCarrier::new(10.0, 1.0);

        assert_abs_diff_eq!(tri.value(0.0), 0.0);
        assert_abs_diff_eq!(tri.value(0.5), -10.0);
        assert_abs_diff_eq!(tri.value(1.0), 0.0);
        assert_abs_diff_eq!(tri.value(1.5), 10.0);
        assert_abs_diff_eq!(tri.value(2.0), 0.0);
        // Linear between corners
        assert_abs_diff_eq!(tri.value(0.25), -5.0);
        assert_abs_diff_eq!(tri.value(1.25), 5.0);
    }

    #[test]
    fn test_carrier_periodicity() {
        let tc = 1.0 / 3e3;
        let tri = TriangleCarrier::new(10.0, tc);

        for i in 0..500 {
            let t = i as f64 * 1.37e-6;
            assert_abs_diff_eq!(tri.value(t + 2.0 * tc), tri.value(t), epsilon = 1e-6);
            assert_abs_diff_eq!(tri.value(t + tc), -tri.value(t), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_carrier_range() {
        let tri = TriangleCarrier::new(10.0, 1.0 / 3e3);

        for i in 0..10_000 {
            let v = tri.value(i as f64 * 1e-6);
            assert!((-10.0..=10.0).contains(&v), "carrier out of range: {}", v);
        }
    }
}
