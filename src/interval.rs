use crate::util::Interval;

/// Overlaps no longer than this, in s, are treated as floating point noise
/// rather than as a connection between two intervals.
pub const OVERLAP_EPSILON: f64 = 0.01;

/// A contiguous span of time within one cycle during which a junction shows green.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreenInterval {
    /// The index of the phase, within the junction's cycle, that shows green.
    pub phase_idx: usize,
    /// The start time of the interval in s.
    pub start: f64,
    /// The end time of the interval in s.
    pub end: f64,
}

impl GreenInterval {
    /// Creates a new green interval.
    pub const fn new(phase_idx: usize, start: f64, end: f64) -> Self {
        Self {
            phase_idx,
            start,
            end,
        }
    }

    pub(crate) fn from_window(phase_idx: usize, window: Interval<f64>) -> Self {
        Self::new(phase_idx, window.min, window.max)
    }

    /// Gets the time span of the interval.
    pub fn window(&self) -> Interval<f64> {
        Interval::new(self.start, self.end)
    }

    /// Gets the duration of the interval in s.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Computes the overlap of two intervals.
    ///
    /// Returns `None` unless the overlap is longer than [OVERLAP_EPSILON].
    /// The result carries this interval's phase index.
    pub fn can_connect(&self, other: &GreenInterval) -> Option<GreenInterval> {
        let overlap = self.window().intersection(&other.window());
        (overlap.length() > OVERLAP_EPSILON).then(|| Self::from_window(self.phase_idx, overlap))
    }
}
