//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval overlaps with the other.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max > other.min && other.max > self.min
    }

    /// Returns true if this interval lies entirely within the other.
    pub fn is_within(&self, other: &Self) -> bool {
        self.min >= other.min && self.max <= other.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Computes the common part of two intervals.
    /// The result is empty or inverted (`min >= max`) if they don't overlap.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min: T::max(self.min, other.min),
            max: T::min(self.max, other.max),
        }
    }

    /// Wraps both ends of the interval into `[0, period]`.
    /// An end which lands on a multiple of `period` is kept at `period`
    /// rather than wrapped to zero, so intervals closing at the period
    /// boundary keep their length.
    pub fn wrap(&self, period: T) -> Self {
        let wrap = |value: T| {
            let wrapped = value % period;
            if wrapped < T::zero() {
                wrapped + period
            } else {
                wrapped
            }
        };
        let min = wrap(self.min);
        let mut max = wrap(self.max);
        if max == T::zero() && self.max != T::zero() {
            max = period;
        }
        Self { min, max }
    }
}

impl<T: Float> std::ops::Add<T> for Interval<T> {
    type Output = Interval<T>;

    fn add(self, rhs: T) -> Self::Output {
        Self {
            min: self.min + rhs,
            max: self.max + rhs,
        }
    }
}

impl<T: Float> std::ops::Sub<T> for Interval<T> {
    type Output = Interval<T>;

    fn sub(self, rhs: T) -> Self::Output {
        Self {
            min: self.min - rhs,
            max: self.max - rhs,
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}
