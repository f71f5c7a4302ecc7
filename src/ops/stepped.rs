use crate::{
    core::{Error, Result},
    quantity::velocity::MetresPerSecond,
};

/// Tolerance, in steps, when deciding whether the upper bound is reached.
const TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of steps in a range.
const MAX_STEPS: f64 = 1e7;

/// Inclusive, evenly stepped range of speeds.
///
/// Points are computed as `start + i × step` rather than accumulated, so that the rounding
/// error does not grow along the range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stepped {
    start: MetresPerSecond,
    step: MetresPerSecond,
    len: usize,
}

impl Stepped {
    /// Build the range `[start, end]` with the given step.
    ///
    /// The end is included when it is a whole number of steps away from the start, within
    /// the floating-point tolerance.
    pub fn try_new(
        start: MetresPerSecond,
        end: MetresPerSecond,
        step: MetresPerSecond,
    ) -> Result<Self> {
        let n_steps = (end - start) / step;
        // Negated comparisons also reject `NaN`:
        if !(step.0 > 0.0) || !(n_steps >= 0.0) || !(n_steps <= MAX_STEPS) {
            return Err(Error::EmptySweepRange { min: start, max: end, step });
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = (n_steps + TOLERANCE).floor() as usize + 1;
        Ok(Self { start, step, len })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    /// Get the point at the index, without checking the bounds.
    #[expect(clippy::cast_precision_loss)]
    pub fn point(&self, index: usize) -> MetresPerSecond {
        self.start + self.step * index as f64
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = MetresPerSecond> + '_ {
        (0..self.len).map(|index| self.point(index))
    }
}
