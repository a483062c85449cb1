//! Time-domain solver for the inverter and its RL load.
//!
//! The load obeys a single first-order ODE:
//!
//! ```text
//! L dIl/dt = Vd - Il R
//! ```
//!
//! Each step advances the inductor current with explicit RK4 while the
//! switched voltage is held at its value from the start of the step
//! (zero-order hold). The waveforms are then sampled at the end of the step:
//!
//! 1. Evaluate reference, carrier and comparator at t = (i + 1) dt
//! 2. Integrate Il from step i to i + 1 with Vd = vd[i]
//! 3. Append all values to the sample series

mod rk4;
mod series;
mod simulator;

pub use rk4::{Rk4Stepper, RlLoad};
pub use series::{SampleSeries, Trace};
pub use simulator::{simulate, Analysis, Simulator};
