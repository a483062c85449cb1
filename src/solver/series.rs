//! Time-domain sample series produced by a run.

use std::fmt;

/// Selector for one trace in a [`SampleSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trace {
    /// Switched bus voltage seen by the load
    SwitchedVoltage,
    /// Reference sine
    Reference,
    /// Load (inductor) current
    LoadCurrent,
    /// Triangular carrier
    Carrier,
}

impl Trace {
    /// All traces in display order.
    pub const ALL: [Trace; 4] = [
        Trace::SwitchedVoltage,
        Trace::Reference,
        Trace::LoadCurrent,
        Trace::Carrier,
    ];

    /// Short label used in plots and CSV headers.
    pub fn label(&self) -> &'static str {
        match self {
            Trace::SwitchedVoltage => "vd",
            Trace::Reference => "sine",
            Trace::LoadCurrent => "il",
            Trace::Carrier => "vtri",
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Index-aligned traces over a shared time axis.
///
/// Every vector holds `N + 1` samples, with `time[i] = i * dt`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    /// Time axis (seconds)
    pub time: Vec<f64>,
    /// Switched bus voltage
    pub vd: Vec<f64>,
    /// Reference sine (diagnostic)
    pub sine: Vec<f64>,
    /// Load current
    pub il: Vec<f64>,
    /// Carrier triangle (diagnostic)
    pub vtri: Vec<f64>,
}

impl SampleSeries {
    /// Create empty series with room for `capacity` samples per trace.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            vd: Vec::with_capacity(capacity),
            sine: Vec::with_capacity(capacity),
            il: Vec::with_capacity(capacity),
            vtri: Vec::with_capacity(capacity),
        }
    }

    /// Append one aligned sample to every trace.
    pub(crate) fn push(&mut self, time: f64, vd: f64, sine: f64, il: f64, vtri: f64) {
        self.time.push(time);
        self.vd.push(vd);
        self.sine.push(sine);
        self.il.push(il);
        self.vtri.push(vtri);
    }

    /// Number of samples per trace (N + 1).
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Number of integration steps N.
    pub fn step_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Values of one trace.
    pub fn trace(&self, trace: Trace) -> &[f64] {
        match trace {
            Trace::SwitchedVoltage => &self.vd,
            Trace::Reference => &self.sine,
            Trace::LoadCurrent => &self.il,
            Trace::Carrier => &self.vtri,
        }
    }

    /// `(time, value)` pairs of one trace.
    pub fn points(&self, trace: Trace) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.trace(trace).iter().copied())
    }
}
