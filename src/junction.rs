use crate::math::Point2d;
use crate::util::Interval;
use crate::{GreenInterval, Phase};
use smallvec::SmallVec;

/// A signalised junction with a repeating cycle of phases.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Junction {
    /// The junction identifier.
    id: i32,
    /// A user defined alias.
    label: String,
    /// The phases of the cycle, in the order they are played.
    cycle: Vec<Phase>,
    /// The sum of the phase durations in s.
    total_duration: u32,
    /// The shift of the whole cycle relative to the shared clock, in s.
    offset: i32,
    /// The location of the junction, in m.
    point: Point2d,
}

/// The attributes of a junction.
#[derive(Clone, Debug)]
pub struct JunctionAttributes {
    /// The junction identifier.
    pub id: i32,
    /// A user defined alias.
    pub label: String,
    /// The location of the junction, in m.
    pub point: Point2d,
}

impl Default for JunctionAttributes {
    fn default() -> Self {
        Self {
            id: -1,
            label: "-1".to_string(),
            point: Point2d::new(0.0, 0.0),
        }
    }
}

impl Junction {
    /// Creates a new junction with a zero offset.
    /// The cycle length saturates at `u32::MAX` s.
    pub fn new(cycle: Vec<Phase>, attribs: &JunctionAttributes) -> Self {
        let total_duration = cycle
            .iter()
            .map(Phase::total_seconds)
            .fold(0, u32::saturating_add);
        Self {
            id: attribs.id,
            label: attribs.label.clone(),
            cycle,
            total_duration,
            offset: 0,
            point: attribs.point,
        }
    }

    /// Gets the junction identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Gets the user defined alias of the junction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gets the phases of the cycle.
    pub fn cycle(&self) -> &[Phase] {
        &self.cycle
    }

    /// Gets the length of the cycle in s.
    pub fn total_duration(&self) -> u32 {
        self.total_duration
    }

    /// Gets the cycle offset in s.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Sets the cycle offset in s.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    /// Gets the location of the junction.
    pub fn point(&self) -> Point2d {
        self.point
    }

    /// Finds the green intervals within one cycle, ignoring the offset.
    ///
    /// Intervals are returned in cycle order. A cycle of zero length has
    /// no green intervals.
    pub fn green_intervals(&self) -> Vec<GreenInterval> {
        let total = self.total_duration as f64;
        if self.total_duration == 0 {
            return vec![];
        }

        let mut intervals = vec![];
        let mut current_time: u32 = 0;
        for (phase_idx, phase) in self.cycle.iter().enumerate() {
            let mut signal_start = current_time;
            for signal in phase.signals() {
                if signal.color().is_green() && signal.duration() > 0 {
                    let window = Interval::new(
                        signal_start as f64,
                        signal_start.saturating_add(signal.duration()) as f64,
                    );
                    intervals.push(GreenInterval::from_window(phase_idx, window.wrap(total)));
                }
                signal_start = signal_start.saturating_add(signal.duration());
            }
            current_time = current_time.saturating_add(phase.total_seconds());
        }
        intervals
    }

    /// Shifts green intervals by `offset` s, wrapping them into the cycle.
    ///
    /// An interval that wraps past the end of the cycle is split in two,
    /// one piece closing at the cycle end and one opening at time zero.
    pub fn shifted_green_intervals(
        &self,
        intervals: &[GreenInterval],
        offset: f64,
    ) -> Vec<GreenInterval> {
        shift_intervals(intervals, offset, self.total_duration as f64)
    }
}

/// Shifts intervals by `offset` within a cycle of length `cycle`.
pub(crate) fn shift_intervals(
    intervals: &[GreenInterval],
    offset: f64,
    cycle: f64,
) -> Vec<GreenInterval> {
    if cycle <= 0.0 {
        return vec![];
    }
    intervals
        .iter()
        .flat_map(|interval| {
            let window = (interval.window() + offset).wrap(cycle);
            // A green covering the whole cycle is unaffected by the shift.
            let pieces: SmallVec<[Interval<f64>; 2]> = if interval.length() >= cycle {
                [Interval::new(0.0, cycle)].into_iter().collect()
            } else if window.max < window.min {
                [Interval::new(window.min, cycle), Interval::new(0.0, window.max)]
                    .into_iter()
                    .collect()
            } else {
                [window].into_iter().collect()
            };
            pieces
                .into_iter()
                .filter(|piece| piece.length() > 0.0)
                .map(move |piece| GreenInterval::from_window(interval.phase_idx, piece))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{Junction, JunctionAttributes};
    use crate::{Color, GreenInterval, Phase, Signal};

    fn junction() -> Junction {
        Junction::new(
            vec![
                Phase::new(
                    0,
                    vec![Signal::new(30, Color::Green), Signal::new(20, Color::Red)],
                ),
                Phase::new(
                    1,
                    vec![
                        Signal::new(15, Color::Red),
                        Signal::new(20, Color::GreenPriority),
                    ],
                ),
            ],
            &JunctionAttributes::default(),
        )
    }

    #[test]
    fn total_duration_sums_phases() {
        let junction = junction();
        let phase_sum: u32 = junction.cycle().iter().map(Phase::total_seconds).sum();
        assert_eq!(junction.total_duration(), 85);
        assert_eq!(phase_sum, junction.total_duration());
        assert_eq!(junction.id(), -1);
        assert_eq!(junction.label(), "-1");
    }

    #[test]
    fn green_interval_closing_at_cycle_end() {
        let intervals = junction().green_intervals();
        assert_eq!(
            intervals,
            vec![
                GreenInterval::new(0, 0.0, 30.0),
                GreenInterval::new(1, 65.0, 85.0)
            ]
        );
    }

    #[test]
    fn empty_cycle_has_no_green() {
        let junction = Junction::new(vec![], &JunctionAttributes::default());
        assert!(junction.green_intervals().is_empty());
        let junction = Junction::new(
            vec![Phase::new(0, vec![Signal::new(40, Color::Red)])],
            &JunctionAttributes::default(),
        );
        assert!(junction.green_intervals().is_empty());
    }

    #[test]
    fn shifting_splits_wrapped_intervals() {
        let junction = junction();
        let intervals = junction.green_intervals();

        let shifted = junction.shifted_green_intervals(&intervals, 10.0);
        assert_eq!(
            shifted,
            vec![
                GreenInterval::new(0, 10.0, 40.0),
                GreenInterval::new(1, 75.0, 85.0),
                GreenInterval::new(1, 0.0, 10.0),
            ]
        );

        let shifted = junction.shifted_green_intervals(&intervals, -10.0);
        assert_eq!(
            shifted,
            vec![
                GreenInterval::new(0, 75.0, 85.0),
                GreenInterval::new(0, 0.0, 20.0),
                GreenInterval::new(1, 55.0, 75.0),
            ]
        );

        assert_eq!(junction.shifted_green_intervals(&intervals, 0.0), intervals);
        assert_eq!(junction.shifted_green_intervals(&intervals, 85.0), intervals);
    }

    #[test]
    fn huge_durations_saturate() {
        let junction = Junction::new(
            vec![
                Phase::new(
                    0,
                    vec![Signal::new(u32::MAX, Color::Red), Signal::new(10, Color::Green)],
                ),
                Phase::new(1, vec![Signal::new(u32::MAX, Color::Green)]),
            ],
            &JunctionAttributes::default(),
        );
        assert_eq!(junction.cycle()[0].total_seconds(), u32::MAX);
        assert_eq!(junction.total_duration(), u32::MAX);
        assert!(junction
            .green_intervals()
            .iter()
            .all(|interval| interval.start <= interval.end));
    }

    #[test]
    fn whole_cycle_green_keeps_its_length() {
        let junction = Junction::new(
            vec![Phase::new(0, vec![Signal::new(60, Color::Green)])],
            &JunctionAttributes::default(),
        );
        let intervals = junction.green_intervals();
        assert_eq!(intervals, vec![GreenInterval::new(0, 0.0, 60.0)]);
        for offset in [10.0, -60.0, 30.5] {
            assert_eq!(junction.shifted_green_intervals(&intervals, offset), intervals);
        }
    }
}
