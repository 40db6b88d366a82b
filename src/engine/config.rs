//! Simulation time grids
//!
//! A [`TimeGrid`] describes the span and resolution of one time-course
//! simulation: start time, end time and step count. Step count and step
//! size are mutually derivable; both constructors are provided.
//!
//! Validation happens at construction, before any solver work: an empty or
//! inverted span is an [`KinetError::InvalidRange`] immediately.

use crate::error::KinetError;

/// Time span and resolution for one integration run.
///
/// # Endpoint convention
///
/// The grid has `steps` integration steps and `steps + 1` output points:
/// the initial point at `start` is included, and the last point lands
/// exactly on `end`.
///
/// # Example
///
/// ```
/// use kinet_rs::engine::TimeGrid;
///
/// let grid = TimeGrid::with_step_size(0.0, 840.0, 0.1).unwrap();
/// assert_eq!(grid.steps(), 8400);
/// assert_eq!(grid.n_rows(), 8401);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    end: f64,
    steps: usize,
}

impl TimeGrid {
    /// Create a grid with an explicit step count.
    ///
    /// # Errors
    ///
    /// [`KinetError::InvalidRange`] when `end <= start`, when the bounds are
    /// not finite, or when `steps == 0`.
    pub fn with_steps(start: f64, end: f64, steps: usize) -> Result<Self, KinetError> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(KinetError::InvalidRange(
                "time bounds must be finite".to_string(),
            ));
        }
        if end <= start {
            return Err(KinetError::InvalidRange(format!(
                "end time ({}) must be greater than start time ({})",
                end, start
            )));
        }
        if steps == 0 {
            return Err(KinetError::InvalidRange(
                "step count must be greater than zero".to_string(),
            ));
        }
        Ok(Self { start, end, steps })
    }

    /// Create a grid from a step size: `steps = trunc((end - start) / dt)`.
    ///
    /// # Errors
    ///
    /// [`KinetError::InvalidRange`] when `end <= start`, when `dt` is not
    /// positive and finite, or when `dt` is larger than the span.
    pub fn with_step_size(start: f64, end: f64, dt: f64) -> Result<Self, KinetError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(KinetError::InvalidRange(format!(
                "step size must be positive and finite, got {}",
                dt
            )));
        }
        if end <= start {
            return Err(KinetError::InvalidRange(format!(
                "end time ({}) must be greater than start time ({})",
                end, start
            )));
        }
        // Truncation, not rounding: a span that is not an exact multiple
        // of dt gets floor((end-start)/dt) steps.
        let steps = ((end - start) / dt) as usize;
        Self::with_steps(start, end, steps)
    }

    /// Simulation start time.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Simulation end time.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Number of integration steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step size `(end - start) / steps`.
    pub fn dt(&self) -> f64 {
        (self.end - self.start) / (self.steps as f64)
    }

    /// Number of output rows (`steps + 1`, initial point included).
    pub fn n_rows(&self) -> usize {
        self.steps + 1
    }

    /// Time value of output row `i`.
    ///
    /// Computed directly from the index rather than by accumulating dt,
    /// so the final point is exactly `end` within machine epsilon.
    pub fn time_at(&self, i: usize) -> f64 {
        if i == self.steps {
            self.end
        } else {
            self.start + (i as f64) * self.dt()
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_steps_basic() {
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        assert_eq!(grid.steps(), 100);
        assert_eq!(grid.n_rows(), 101);
        assert!((grid.dt() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_with_step_size_truncates() {
        // 840 / 0.1 = 8400 steps exactly
        let grid = TimeGrid::with_step_size(0.0, 840.0, 0.1).unwrap();
        assert_eq!(grid.steps(), 8400);

        // Non-multiple span truncates downward
        let grid = TimeGrid::with_step_size(0.0, 1.0, 0.3).unwrap();
        assert_eq!(grid.steps(), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            TimeGrid::with_steps(10.0, 0.0, 100),
            Err(KinetError::InvalidRange(_))
        ));
        assert!(matches!(
            TimeGrid::with_steps(5.0, 5.0, 100),
            Err(KinetError::InvalidRange(_))
        ));
        assert!(matches!(
            TimeGrid::with_step_size(10.0, 0.0, 0.1),
            Err(KinetError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_degenerate_steps_rejected() {
        assert!(matches!(
            TimeGrid::with_steps(0.0, 1.0, 0),
            Err(KinetError::InvalidRange(_))
        ));
        assert!(matches!(
            TimeGrid::with_step_size(0.0, 1.0, 0.0),
            Err(KinetError::InvalidRange(_))
        ));
        assert!(matches!(
            TimeGrid::with_step_size(0.0, 1.0, -0.1),
            Err(KinetError::InvalidRange(_))
        ));
        // dt larger than the span leaves zero steps
        assert!(matches!(
            TimeGrid::with_step_size(0.0, 1.0, 2.0),
            Err(KinetError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_final_time_point_is_exact() {
        let grid = TimeGrid::with_steps(0.0, 0.7, 7).unwrap();
        assert_eq!(grid.time_at(7), 0.7);
        assert_eq!(grid.time_at(0), 0.0);
    }

    #[test]
    fn test_nonzero_start() {
        let grid = TimeGrid::with_steps(10.0, 20.0, 10).unwrap();
        assert!((grid.time_at(1) - 11.0).abs() < 1e-12);
        assert_eq!(grid.time_at(10), 20.0);
    }
}
