use crate::chain::merge_green_waves;
use crate::{
    Error, GeneticConfig, GreenWave, Junction, Optimizer, Result, ThroughGreenWave, WaveFinder,
};

/// A chain of signalised junctions travelled at a desired speed.
#[derive(Clone, Debug)]
pub struct Corridor {
    /// The junctions, in travel order.
    junctions: Vec<Junction>,
    /// The desired travel speed in km/h.
    speed_kmh: f64,
}

/// The green waves along a corridor for one set of offsets.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorridorReport {
    /// The offsets applied, in s.
    pub offsets: Vec<f64>,
    /// The green waves between each pair of adjacent junctions.
    pub green_waves: Vec<Vec<GreenWave>>,
    /// The green waves carrying through three or more junctions.
    pub through_green_waves: Vec<ThroughGreenWave>,
}

/// The outcome of an offset optimization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptimizationReport {
    /// The best fitness after each generation.
    pub fitness_history: Vec<f64>,
    /// The green waves with the optimized offsets applied.
    pub result: CorridorReport,
}

impl CorridorReport {
    /// Sums the quality of every through green wave for a corridor of `max_depth` junctions.
    pub fn total_quality(&self, max_depth: usize) -> f64 {
        self.through_green_waves
            .iter()
            .map(|wave| wave.quality(max_depth))
            .sum()
    }
}

impl Corridor {
    /// Creates an empty corridor travelled at `speed_kmh`.
    pub fn new(speed_kmh: f64) -> Result<Self> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(Error::InvalidSpeed(speed_kmh));
        }
        Ok(Self {
            junctions: vec![],
            speed_kmh,
        })
    }

    /// Appends a junction to the end of the corridor and returns its index.
    pub fn add_junction(&mut self, junction: Junction) -> usize {
        self.junctions.push(junction);
        self.junctions.len() - 1
    }

    /// Gets the junctions, in travel order.
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// Gets a mutable reference to a junction.
    pub fn junction_mut(&mut self, idx: usize) -> Option<&mut Junction> {
        self.junctions.get_mut(idx)
    }

    /// Gets the desired travel speed in km/h.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Gets the offsets currently stored in the junctions, in s.
    pub fn offsets(&self) -> Vec<f64> {
        self.junctions.iter().map(|j| j.offset() as f64).collect()
    }

    /// Stores offsets in the junctions, rounded to whole seconds and wrapped
    /// into each junction's cycle.
    pub fn apply_offsets(&mut self, offsets: &[f64]) -> Result<()> {
        if offsets.len() != self.junctions.len() {
            return Err(Error::OffsetCount {
                expected: self.junctions.len(),
                found: offsets.len(),
            });
        }
        for (junction, offset) in self.junctions.iter_mut().zip(offsets) {
            let cycle = i64::from(junction.total_duration());
            let offset = offset.round() as i64;
            let offset = if cycle > 0 { offset.rem_euclid(cycle) } else { 0 };
            junction.set_offset(i32::try_from(offset).unwrap_or(i32::MAX));
        }
        Ok(())
    }

    /// Finds the green waves with the offsets stored in the junctions.
    pub fn green_waves(&self) -> Result<CorridorReport> {
        self.green_waves_with_offsets(&self.offsets())
    }

    /// Finds the green waves with the given offsets, in s.
    pub fn green_waves_with_offsets(&self, offsets: &[f64]) -> Result<CorridorReport> {
        let green_waves = WaveFinder::new(&self.junctions, self.speed_kmh)?.find(offsets)?;
        let through_green_waves = merge_green_waves(&green_waves);
        Ok(CorridorReport {
            offsets: offsets.to_vec(),
            green_waves,
            through_green_waves,
        })
    }

    /// Searches for the best offsets with a genetic algorithm, then finds the
    /// green waves they produce. The junctions are left unchanged.
    pub fn optimize(&self, config: &GeneticConfig) -> Result<OptimizationReport> {
        let mut optimizer = Optimizer::genetic(&self.junctions, self.speed_kmh, config)?;
        let offsets = optimizer.optimize();
        let result = self.green_waves_with_offsets(&offsets)?;
        log::info!(
            "Optimized {} junctions: {} through green waves, quality {:.3}",
            self.junctions.len(),
            result.through_green_waves.len(),
            result.total_quality(self.junctions.len())
        );
        Ok(OptimizationReport {
            fitness_history: optimizer.best_fitness_history().to_vec(),
            result,
        })
    }
}
