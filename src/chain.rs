//! Chaining of pairwise green waves into through green waves.
//!
//! The waves of each segment are found independently of their neighbours,
//! so the arrival window of a wave rarely coincides with the departure window
//! of the wave it feeds into. Chaining first narrows each downstream wave to
//! the part reachable from upstream, then links the narrowed waves into a graph
//! and walks every maximal path through it.

use crate::{GreenInterval, GreenWave, ThroughGreenWave, WaveId};
use slotmap::SlotMap;
use smallvec::SmallVec;

/// A wave stored in the [WaveGraph].
#[derive(Clone, Debug)]
struct WaveNode {
    /// The index of the segment the wave belongs to.
    segment: usize,
    /// The (narrowed) wave.
    wave: GreenWave,
    /// The waves of the next segment this wave connects to.
    next: SmallVec<[WaveId; 4]>,
}

/// The connections between the green waves of consecutive segments.
#[derive(Clone, Debug, Default)]
pub struct WaveGraph {
    /// The waves of every segment.
    nodes: SlotMap<WaveId, WaveNode>,
    /// The waves of each segment, in order.
    segments: Vec<Vec<WaveId>>,
}

/// Finds the overlap between the arrival window of `from` and the departure
/// window of `to`, if the two waves connect.
///
/// Waves only connect while the same phase stays green.
fn connection(from: &GreenWave, to: &GreenWave) -> Option<GreenInterval> {
    if from.interval_b.phase_idx != to.interval_a.phase_idx {
        return None;
    }
    from.interval_b.can_connect(&to.interval_a)
}

/// Narrows the departure window of `to` to `overlap`, moving its arrival
/// window by the same amounts.
fn narrow_departure(to: &GreenWave, overlap: GreenInterval) -> GreenWave {
    let mut wave = *to;
    let delta_start = overlap.start - to.interval_a.start;
    let delta_end = overlap.end - to.interval_a.end;
    wave.interval_a = overlap;
    wave.interval_b.start += delta_start;
    wave.interval_b.end += delta_end;
    wave.bandwidth = wave.interval_b.length();
    wave
}

/// Narrows the arrival window of `from` to `overlap`, moving its departure
/// window by the same amounts.
fn narrow_arrival(from: &mut GreenWave, overlap: GreenInterval) {
    let delta_start = overlap.start - from.interval_b.start;
    let delta_end = overlap.end - from.interval_b.end;
    from.interval_b.start = overlap.start;
    from.interval_b.end = overlap.end;
    from.interval_a.start += delta_start;
    from.interval_a.end += delta_end;
    from.bandwidth = from.interval_b.length();
}

/// Narrows every segment, left to right, to the waves reachable from the
/// previous segment.
///
/// A wave reachable from several upstream waves appears once per upstream
/// wave, each copy narrowed to its own connection.
fn align_segments(segments: &[Vec<GreenWave>]) -> Vec<Vec<GreenWave>> {
    let mut aligned = segments.to_vec();
    for idx in 1..aligned.len() {
        let narrowed: Vec<GreenWave> = aligned[idx - 1]
            .iter()
            .flat_map(|from| {
                aligned[idx].iter().filter_map(move |to| {
                    connection(from, to).map(|overlap| narrow_departure(to, overlap))
                })
            })
            .collect();
        aligned[idx] = narrowed;
    }
    aligned
}

impl WaveGraph {
    /// Builds the graph from the green waves of each segment.
    /// The input waves are left untouched.
    pub fn new(segments: &[Vec<GreenWave>]) -> Self {
        let mut graph = Self::default();
        for (segment, waves) in align_segments(segments).into_iter().enumerate() {
            let ids = waves
                .into_iter()
                .map(|wave| {
                    graph.nodes.insert(WaveNode {
                        segment,
                        wave,
                        next: SmallVec::new(),
                    })
                })
                .collect();
            graph.segments.push(ids);
        }

        for pair in graph.segments.windows(2) {
            for &from in &pair[0] {
                let next: SmallVec<[WaveId; 4]> = pair[1]
                    .iter()
                    .copied()
                    .filter(|&to| {
                        connection(&graph.nodes[from].wave, &graph.nodes[to].wave).is_some()
                    })
                    .collect();
                graph.nodes[from].next = next;
            }
        }
        graph
    }

    /// Gets the number of segments.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Gets a wave of the graph.
    pub fn wave(&self, id: WaveId) -> &GreenWave {
        &self.nodes[id].wave
    }

    /// Gets the segment a wave belongs to.
    pub fn segment_of(&self, id: WaveId) -> usize {
        self.nodes[id].segment
    }

    /// Gets the waves of the next segment that a wave connects to.
    pub fn next(&self, id: WaveId) -> &[WaveId] {
        &self.nodes[id].next
    }

    /// Enumerates every maximal path starting from a wave of the first segment,
    /// depth first.
    pub fn chains(&self) -> Vec<Vec<WaveId>> {
        let mut chains = vec![];
        let mut path = Vec::with_capacity(self.segments.len());
        for &start in self.segments.first().into_iter().flatten() {
            self.extend_chain(start, &mut path, &mut chains);
        }
        chains
    }

    fn extend_chain(&self, id: WaveId, path: &mut Vec<WaveId>, chains: &mut Vec<Vec<WaveId>>) {
        path.push(id);
        let next = self.next(id);
        if next.is_empty() {
            chains.push(path.clone());
        } else {
            for &next_id in next {
                self.extend_chain(next_id, path, chains);
            }
        }
        path.pop();
    }

    /// Turns a chain of waves into a through green wave.
    ///
    /// The chain is tightened from its last wave backwards, so that every
    /// window agrees with the windows downstream of it.
    pub fn through_wave(&self, chain: &[WaveId]) -> ThroughGreenWave {
        let mut waves: Vec<GreenWave> = chain.iter().map(|&id| *self.wave(id)).collect();
        for idx in (1..waves.len()).rev() {
            let (head, tail) = waves.split_at_mut(idx);
            let (prev, current) = (&mut head[idx - 1], &mut tail[0]);
            if let Some(overlap) = prev.interval_b.can_connect(&current.interval_a) {
                current.interval_a = overlap;
                narrow_arrival(prev, overlap);
            }
        }

        let intervals = waves
            .first()
            .map(|wave| wave.interval_a)
            .into_iter()
            .chain(waves.iter().map(|wave| wave.interval_b))
            .collect();
        ThroughGreenWave::new(intervals)
    }
}

/// Chains the green waves of consecutive segments into through green waves.
///
/// `segments[i]` holds the waves between junction `i` and junction `i + 1`.
/// Only chains spanning two or more segments are returned, in the order they
/// are discovered.
pub fn merge_green_waves(segments: &[Vec<GreenWave>]) -> Vec<ThroughGreenWave> {
    let through = through_waves(segments);
    log::debug!(
        "Merged {} segments into {} through green waves",
        segments.len(),
        through.len()
    );
    through
}

pub(crate) fn through_waves(segments: &[Vec<GreenWave>]) -> Vec<ThroughGreenWave> {
    let graph = WaveGraph::new(segments);
    graph
        .chains()
        .iter()
        .filter(|chain| chain.len() >= 2)
        .map(|chain| graph.through_wave(chain))
        .collect()
}

#[cfg(test)]
mod test {
    use super::{merge_green_waves, WaveGraph};
    use crate::{GreenInterval, GreenWave};

    fn wave(a: (usize, f64, f64), b: (usize, f64, f64), travel_time: f64) -> GreenWave {
        GreenWave::new(
            GreenInterval::new(a.0, a.1, a.2),
            GreenInterval::new(b.0, b.1, b.2),
            travel_time * 10.0,
            travel_time,
        )
    }

    #[test]
    fn single_segment_has_no_through_waves() {
        let segments = vec![vec![wave((0, 0.0, 30.0), (0, 18.0, 48.0), 18.0)]];
        assert!(merge_green_waves(&segments).is_empty());
        assert!(merge_green_waves(&[]).is_empty());
    }

    #[test]
    fn phase_mismatch_breaks_the_chain() {
        let segments = vec![
            vec![wave((0, 0.0, 30.0), (0, 18.0, 48.0), 18.0)],
            vec![wave((1, 20.0, 40.0), (1, 30.0, 50.0), 10.0)],
        ];
        assert!(merge_green_waves(&segments).is_empty());
    }

    #[test]
    fn downstream_windows_are_narrowed() {
        let segments = vec![
            vec![wave((0, 0.0, 30.0), (0, 18.0, 48.0), 18.0)],
            vec![wave((0, 30.0, 60.0), (0, 40.0, 70.0), 10.0)],
        ];
        let through = merge_green_waves(&segments);
        assert_eq!(through.len(), 1);
        assert_eq!(
            through[0].intervals(),
            &[
                GreenInterval::new(0, 12.0, 30.0),
                GreenInterval::new(0, 30.0, 48.0),
                GreenInterval::new(0, 40.0, 58.0),
            ]
        );
        assert_eq!(through[0].bandwidth(), 18.0);

        // The input is not modified.
        assert_eq!(segments[1][0].interval_a(), &GreenInterval::new(0, 30.0, 60.0));
    }

    #[test]
    fn fan_out_instantiates_one_wave_per_connection() {
        let segments = vec![
            vec![
                wave((0, 0.0, 10.0), (0, 10.0, 20.0), 10.0),
                wave((0, 20.0, 30.0), (0, 30.0, 40.0), 10.0),
            ],
            vec![wave((0, 5.0, 45.0), (0, 15.0, 55.0), 10.0)],
        ];
        let graph = WaveGraph::new(&segments);
        assert_eq!(graph.num_segments(), 2);
        let chains = graph.chains();
        assert_eq!(chains.len(), 2);
        for chain in &chains {
            assert_eq!(graph.segment_of(chain[0]), 0);
            assert_eq!(graph.segment_of(chain[1]), 1);
        }

        let through = merge_green_waves(&segments);
        assert_eq!(through.len(), 2);
        assert_eq!(through[0].intervals()[2], GreenInterval::new(0, 20.0, 30.0));
        assert_eq!(through[1].intervals()[2], GreenInterval::new(0, 40.0, 50.0));
    }

    #[test]
    fn dead_ends_stop_chains() {
        let segments = vec![
            vec![
                wave((0, 0.0, 10.0), (0, 10.0, 20.0), 10.0),
                wave((0, 50.0, 60.0), (0, 60.0, 70.0), 10.0),
            ],
            vec![wave((0, 12.0, 18.0), (0, 22.0, 28.0), 10.0)],
            vec![],
        ];
        let graph = WaveGraph::new(&segments);
        let chains = graph.chains();
        // The second wave of the first segment connects to nothing.
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[1].len(), 1);

        let through = merge_green_waves(&segments);
        assert_eq!(through.len(), 1);
        assert_eq!(through[0].depth(), 3);
    }
}
