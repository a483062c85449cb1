//! Naturally-sampled PWM comparator.

/// Compare the reference against the carrier.
///
/// Returns `+peak` when the reference is strictly above the carrier and
/// `-peak` otherwise, so a tie switches low. There is no hysteresis, dead
/// time or minimum pulse width.
#[inline]
pub fn compare(reference: f64, carrier: f64, peak: f64) -> f64 {
    if reference > carrier {
        peak
    } else {
        -peak
    }
}
