use crate::vec3::Float;

/// Closed range `[min, max]` over the reals.
///
/// An interval with `min > max` is empty; [`Interval::EMPTY`] is the canonical one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {
    pub const EMPTY: Interval = Interval::new(Float::INFINITY, Float::NEG_INFINITY);
    pub const FULL: Interval = Interval::new(Float::NEG_INFINITY, Float::INFINITY);
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    pub const fn new(min: Float, max: Float) -> Self {
        Interval { min, max }
    }

    /// Negative for empty intervals
    pub fn size(&self) -> Float {
        self.max - self.min
    }

    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn surrounds(&self, x: Float) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: Float) -> Float {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    /// Same lower bound, upper bound pulled in to `max`.
    pub fn with_max(&self, max: Float) -> Self {
        Interval::new(self.min, max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::EMPTY
    }
}
