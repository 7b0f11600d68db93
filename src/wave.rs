use crate::junction::shift_intervals;
use crate::math::{kmh_to_ms, travel};
use crate::{Error, GreenInterval, Junction, Result};
use itertools::iproduct;

/// A window of uninterrupted passage between two adjacent junctions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreenWave {
    /// The departure window at the first junction.
    pub(crate) interval_a: GreenInterval,
    /// The arrival window at the second junction.
    pub(crate) interval_b: GreenInterval,
    /// The distance between the junctions in m.
    distance: f64,
    /// The travel time between the junctions in s.
    travel_time: f64,
    /// The duration of the wave in s.
    pub(crate) bandwidth: f64,
}

impl GreenWave {
    /// Creates a green wave; its bandwidth is the length of the departure window.
    pub fn new(
        interval_a: GreenInterval,
        interval_b: GreenInterval,
        distance: f64,
        travel_time: f64,
    ) -> Self {
        Self {
            interval_a,
            interval_b,
            distance,
            travel_time,
            bandwidth: interval_a.length(),
        }
    }

    /// Gets the departure window at the first junction.
    pub fn interval_a(&self) -> &GreenInterval {
        &self.interval_a
    }

    /// Gets the arrival window at the second junction.
    pub fn interval_b(&self) -> &GreenInterval {
        &self.interval_b
    }

    /// Gets the distance between the junctions in m.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Gets the travel time between the junctions in s.
    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    /// Gets the duration of the wave in s.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Finds the green waves between the green intervals of two adjacent junctions.
///
/// A vehicle leaving the first junction during `a` arrives at the second
/// junction `travel_time` s later. Where that arrival window overlaps `b`,
/// the overlap is projected back to give the departure window.
///
/// Waves are ordered by interval in `a`, then by interval in `b`.
pub fn find_green_waves_between_intervals(
    intervals_a: &[GreenInterval],
    intervals_b: &[GreenInterval],
    distance: f64,
    travel_time: f64,
) -> Vec<GreenWave> {
    iproduct!(intervals_a, intervals_b)
        .filter_map(|(a, b)| {
            let arrival = b.window().intersection(&(a.window() + travel_time));
            if arrival.min >= arrival.max {
                return None;
            }
            // Shifting there and back isn't exact in f64; clamp to `a`.
            let departure = (arrival - travel_time).intersection(&a.window());
            if departure.min >= departure.max {
                return None;
            }
            Some(GreenWave::new(
                GreenInterval::from_window(a.phase_idx, departure),
                GreenInterval::from_window(b.phase_idx, arrival),
                distance,
                travel_time,
            ))
        })
        .collect()
}

/// The offset independent geometry of one junction.
#[derive(Clone, Debug)]
struct JunctionTiming {
    /// The cycle length in s.
    cycle: f64,
    /// The unshifted green intervals.
    intervals: Vec<GreenInterval>,
}

/// The link between two adjacent junctions.
#[derive(Clone, Copy, Debug)]
struct Leg {
    /// The distance between the junctions in m.
    distance: f64,
    /// The travel time between the junctions in s.
    travel_time: f64,
}

/// Finds green waves along a chain of junctions for any set of offsets.
///
/// Everything that doesn't depend on the offsets (green intervals, distances,
/// travel times) is computed once on construction, so the finder can be
/// evaluated repeatedly, and from several threads at once.
#[derive(Clone, Debug)]
pub struct WaveFinder {
    /// The timing of each junction.
    timings: Vec<JunctionTiming>,
    /// The legs between consecutive junctions.
    legs: Vec<Leg>,
}

impl WaveFinder {
    /// Prepares a finder for the given junctions at the desired speed in km/h.
    pub fn new(junctions: &[Junction], speed_kmh: f64) -> Result<Self> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(Error::InvalidSpeed(speed_kmh));
        }
        if junctions.len() < 2 {
            return Err(Error::NotEnoughJunctions(junctions.len()));
        }
        let speed = kmh_to_ms(speed_kmh);
        let timings = junctions
            .iter()
            .map(|junction| JunctionTiming {
                cycle: junction.total_duration() as f64,
                intervals: junction.green_intervals(),
            })
            .collect();
        let legs = junctions
            .windows(2)
            .map(|pair| {
                let (distance, travel_time) = travel(pair[0].point(), pair[1].point(), speed);
                Leg {
                    distance,
                    travel_time,
                }
            })
            .collect();
        Ok(Self { timings, legs })
    }

    /// Gets the number of junctions.
    pub fn num_junctions(&self) -> usize {
        self.timings.len()
    }

    /// Gets the cycle length of each junction in s.
    pub fn cycle_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.timings.iter().map(|timing| timing.cycle)
    }

    /// Finds the green waves of every segment, with the given offset applied
    /// to each junction's cycle.
    pub fn find(&self, offsets: &[f64]) -> Result<Vec<Vec<GreenWave>>> {
        if offsets.len() != self.timings.len() {
            return Err(Error::OffsetCount {
                expected: self.timings.len(),
                found: offsets.len(),
            });
        }
        Ok(self.find_unchecked(offsets))
    }

    /// Finds the green waves of every segment. `offsets` must hold one entry per junction.
    pub(crate) fn find_unchecked(&self, offsets: &[f64]) -> Vec<Vec<GreenWave>> {
        let shifted: Vec<_> = self
            .timings
            .iter()
            .zip(offsets)
            .map(|(timing, &offset)| shift_intervals(&timing.intervals, offset, timing.cycle))
            .collect();
        self.legs
            .iter()
            .zip(shifted.windows(2))
            .map(|(leg, pair)| {
                find_green_waves_between_intervals(&pair[0], &pair[1], leg.distance, leg.travel_time)
            })
            .collect()
    }
}

/// Finds the green waves of every segment along a chain of junctions,
/// using the offsets stored in the junctions.
pub fn find_green_waves(junctions: &[Junction], speed_kmh: f64) -> Result<Vec<Vec<GreenWave>>> {
    let offsets: Vec<_> = junctions.iter().map(|j| j.offset() as f64).collect();
    find_green_waves_with_offsets(junctions, &offsets, speed_kmh)
}

/// Finds the green waves of every segment along a chain of junctions,
/// applying `offsets` instead of the offsets stored in the junctions.
pub fn find_green_waves_with_offsets(
    junctions: &[Junction],
    offsets: &[f64],
    speed_kmh: f64,
) -> Result<Vec<Vec<GreenWave>>> {
    let segments = WaveFinder::new(junctions, speed_kmh)?.find(offsets)?;
    log::debug!(
        "Found {} green waves over {} segments",
        segments.iter().map(Vec::len).sum::<usize>(),
        segments.len()
    );
    Ok(segments)
}
