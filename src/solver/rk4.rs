//! Series RL load and its fixed-step RK4 integrator.

/// A series RL load driven by the inverter output.
///
/// The inductor current obeys L dIl/dt = Vd - Il R.
#[derive(Debug, Clone, Copy)]
pub struct RlLoad {
    /// Resistance (ohms)
    pub resistance: f64,
    /// Inductance (henries)
    pub inductance: f64,
}

impl RlLoad {
    /// Create a new RL load.
    pub fn new(resistance: f64, inductance: f64) -> Self {
        Self {
            resistance,
            inductance,
        }
    }

    /// dIl/dt for a driving voltage `vd` and current `il`.
    #[inline]
    pub fn derivative(&self, vd: f64, il: f64) -> f64 {
        (vd - il * self.resistance) / self.inductance
    }

    /// Closed-form current after `t` seconds of constant voltage `vd`,
    /// starting from zero current.
    pub fn step_response(&self, vd: f64, t: f64) -> f64 {
        if self.resistance == 0.0 {
            return vd * t / self.inductance;
        }
        (vd / self.resistance) * (1.0 - (-self.resistance * t / self.inductance).exp())
    }
}

/// Explicit fourth-order Runge-Kutta stepper with a fixed step.
///
/// The driving voltage is held constant across each step. Stability needs
/// `dt` small relative to the load time constant L/R; nothing here checks it.
#[derive(Debug, Clone, Copy)]
pub struct Rk4Stepper {
    load: RlLoad,
    dt: f64,
}

impl Rk4Stepper {
    /// Create a stepper for `load` with step `dt`.
    pub fn new(load: RlLoad, dt: f64) -> Self {
        Self { load, dt }
    }

    /// The load being integrated.
    pub fn load(&self) -> &RlLoad {
        &self.load
    }

    /// Step size in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Current increment over one step with `vd` held at its start-of-step value.
    #[inline]
    pub fn increment(&self, vd: f64, il: f64) -> f64 {
        let dt = self.dt;
        let k1 = dt * self.load.derivative(vd, il);
        let k2 = dt * self.load.derivative(vd, il + 0.5 * k1);
        let k3 = dt * self.load.derivative(vd, il + 0.5 * k2);
        let k4 = dt * self.load.derivative(vd, il + k3);
        (k1 + 2.0 * (k2 + k3) + k4) / 6.0
    }

    /// Current at the end of one step.
    #[inline]
    pub fn step(&self, vd: f64, il: f64) -> f64 {
        il + self.increment(vd, il)
    }
}
