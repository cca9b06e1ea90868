//! Discrete measurement options offered to the user.

/// Decimal places kept for diameter options.
pub const DIAMETER_PRECISION: u32 = 3;
/// Decimal places kept for length options.
pub const LENGTH_PRECISION: u32 = 2;

pub const DIAMETER_START: f64 = 1.0;
pub const DIAMETER_STOP: f64 = 3.125;
pub const DIAMETER_STEP: f64 = 0.125;

/// Deployments start the length grid at either 2 or 3 inches.
pub const DEFAULT_LENGTH_START: f64 = 3.0;
pub const LENGTH_STOP: f64 = 9.25;
pub const LENGTH_STEP: f64 = 0.25;

pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Measurement text that always carries a fractional part: `6.0`, `6.5`, `1.125`.
pub fn display_measure(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Whether `value` is one of the grid `options`, up to float noise.
pub fn is_on_grid(value: f64, options: &[f64]) -> bool {
    options.iter().any(|option| (option - value).abs() < 1e-9)
}

/// Evenly stepped values `start, start + step, ...` strictly below `stop`.
///
/// Each value is computed as `start + i * step` and rounded, so long grids do
/// not accumulate drift. Clone the grid to restart it.
#[derive(Debug, Clone)]
pub struct MeasurementGrid {
    start: f64,
    stop: f64,
    step: f64,
    precision: u32,
    index: u32,
}

impl MeasurementGrid {
    /// A non-positive or non-finite `step` yields an empty grid.
    pub fn new(start: f64, stop: f64, step: f64, precision: u32) -> Self {
        Self {
            start,
            stop,
            step,
            precision,
            index: 0,
        }
    }
}

impl Iterator for MeasurementGrid {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return None;
        }
        let value = self.start + f64::from(self.index) * self.step;
        if value >= self.stop {
            return None;
        }
        self.index += 1;
        Some(round_to(value, self.precision))
    }
}

pub fn diameter_options() -> Vec<f64> {
    MeasurementGrid::new(DIAMETER_START, DIAMETER_STOP, DIAMETER_STEP, DIAMETER_PRECISION).collect()
}

pub fn length_options(start: f64) -> Vec<f64> {
    MeasurementGrid::new(start, LENGTH_STOP, LENGTH_STEP, LENGTH_PRECISION).collect()
}
