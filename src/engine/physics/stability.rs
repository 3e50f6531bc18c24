// ABOUTME: CFL time-step adaptation and the Froude/discharge limiters' shared constants
// ABOUTME: Explicit mutable struct per the "Global mutable numerics" design note, not a process global

/// Gravitational acceleration, m/s^2. LISFLOOD-FP's `Cell::gravity`.
pub const GRAVITY: f64 = 9.81;

/// Constants configured once before the first step and never mutated by the kernel.
/// Split from `StabilityState` because only that struct needs `&mut` access
/// during the step loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub dx: f64,
    pub dy: f64,
    pub no_data_value: f64,
    pub water_depth_erosion_threshold: f64,
    pub edgeslope: f64,
    pub hflow_threshold: f64,
    pub mannings: f64,
    pub froude_limit: f64,
}

/// The CFL time-step state: mutated only at step boundaries (`raise_time_factor`),
/// read-only during a step's cell fan-out (`local_time_factor`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityState {
    pub courant_number: f64,
    /// Configured constant, never updated from the actual running maximum water
    /// depth - a static input to the CFL bound, not a true adaptive one.
    pub maxdepth: f64,
    /// Monotone coarse CFL estimate, raised (never lowered) at each step boundary.
    pub time_factor: f64,
    pub step: u64,
}

impl StabilityState {
    pub fn new(courant_number: f64, maxdepth: f64) -> Self {
        Self {
            courant_number,
            maxdepth: maxdepth.max(0.1),
            time_factor: 1.0,
            step: 0,
        }
    }

    /// `tau(h) = courant_number * dx / sqrt(g * max(maxdepth, 0.1))`.
    pub fn cfl_bound(&self, dx: f64) -> f64 {
        let h = self.maxdepth.max(0.1);
        self.courant_number * dx / (GRAVITY * h).sqrt()
    }

    /// Global time step set: called once per external step, before kernel fan-out.
    /// Monotonically raises `time_factor` when the maximum depth allows a larger step.
    pub fn raise_time_factor(&mut self, dx: f64) {
        let tau = self.cfl_bound(dx);
        if self.time_factor < tau {
            self.time_factor = tau;
        }
    }

    /// Local time step: the value the kernel actually uses. Invariant across all
    /// cells and invocations within a single step, since `time_factor` and
    /// `maxdepth` are only touched at step boundaries - computed once per step
    /// by the executor and shared read-only across the cell fan-out.
    pub fn local_time_factor(&self, dx: f64) -> f64 {
        let tau = self.cfl_bound(dx);
        if self.time_factor > tau {
            tau
        } else {
            self.time_factor
        }
    }
}
