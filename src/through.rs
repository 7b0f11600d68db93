use crate::GreenInterval;

/// A green wave which carries through three or more consecutive junctions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThroughGreenWave {
    /// The green window at each junction, in corridor order.
    intervals: Vec<GreenInterval>,
    /// The number of junctions passed through.
    depth: usize,
    /// The shortest window along the wave in s.
    bandwidth: f64,
}

impl ThroughGreenWave {
    /// Creates a through green wave from one window per junction.
    pub fn new(intervals: Vec<GreenInterval>) -> Self {
        let bandwidth = intervals
            .iter()
            .map(GreenInterval::length)
            .reduce(f64::min)
            .unwrap_or(0.0);
        Self {
            depth: intervals.len(),
            intervals,
            bandwidth,
        }
    }

    /// Gets the green window at each junction.
    pub fn intervals(&self) -> &[GreenInterval] {
        &self.intervals
    }

    /// Gets the number of junctions passed through.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Gets the shortest window along the wave in s.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Rates the wave for a corridor of `max_depth` junctions.
    /// Depth is weighted quadratically so that long waves outrank wide, short ones.
    pub fn quality(&self, max_depth: usize) -> f64 {
        if max_depth == 0 {
            return 0.0;
        }
        let ratio = self.depth as f64 / max_depth as f64;
        ratio * ratio * self.bandwidth
    }
}
