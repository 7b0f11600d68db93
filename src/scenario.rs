//! Plain records describing a corridor, as read from JSON.

use crate::math::Point2d;
use crate::{
    Color, Corridor, CrossoverKind, GeneticConfig, Junction, JunctionAttributes, OptimizerKind,
    Error, Phase, Result, Signal, SignalAttributes,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A corridor and, optionally, how to optimize its offsets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// The desired travel speed in km/h.
    pub speed_kmh: f64,
    /// The junctions, in travel order.
    pub junctions: Vec<JunctionRecord>,
    /// The optimizer settings, if the offsets should be optimized.
    #[serde(default)]
    pub optimizer: Option<OptimizerRecord>,
}

/// A junction record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JunctionRecord {
    #[serde(default = "default_id")]
    pub id: i32,
    #[serde(default)]
    pub label: String,
    pub cycle: Vec<PhaseRecord>,
    #[serde(default)]
    pub offset: i32,
    pub point: PointRecord,
}

/// A phase record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub id: i32,
    pub signals: Vec<SignalRecord>,
}

/// A signal record. Unknown colors are read as [Color::Undefined].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalRecord {
    pub duration: u32,
    #[serde(default)]
    pub min_duration: Option<u32>,
    #[serde(default)]
    pub max_duration: Option<u32>,
    pub color: String,
}

/// A location, in m.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

/// Optimizer settings. Kind and crossover are given by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizerRecord {
    #[serde(default = "default_kind")]
    pub kind: String,
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    #[serde(default = "default_crossover")]
    pub crossover: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_id() -> i32 {
    -1
}

fn default_kind() -> String {
    OptimizerKind::Genetic.to_string()
}

fn default_crossover() -> String {
    CrossoverKind::Blend.to_string()
}

impl Scenario {
    /// Parses a scenario from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Builds the corridor described by the scenario.
    pub fn corridor(&self) -> Result<Corridor> {
        let mut corridor = Corridor::new(self.speed_kmh)?;
        for record in &self.junctions {
            corridor.add_junction(record.junction()?);
        }
        Ok(corridor)
    }

    /// Gets the validated optimizer settings, if any.
    pub fn genetic_config(&self) -> Result<Option<GeneticConfig>> {
        self.optimizer
            .as_ref()
            .map(OptimizerRecord::genetic_config)
            .transpose()
    }
}

impl JunctionRecord {
    /// Builds the junction described by the record.
    pub fn junction(&self) -> Result<Junction> {
        let seconds: u64 = self
            .cycle
            .iter()
            .flat_map(|phase| &phase.signals)
            .map(|signal| u64::from(signal.duration))
            .sum();
        if u32::try_from(seconds).is_err() {
            return Err(Error::CycleTooLong {
                junction: self.id,
                seconds,
            });
        }
        let cycle = self.cycle.iter().map(PhaseRecord::phase).collect();
        let mut junction = Junction::new(
            cycle,
            &JunctionAttributes {
                id: self.id,
                label: self.label.clone(),
                point: Point2d::new(self.point.x, self.point.y),
            },
        );
        junction.set_offset(self.offset);
        Ok(junction)
    }
}

impl PhaseRecord {
    /// Builds the phase described by the record.
    pub fn phase(&self) -> Phase {
        Phase::new(self.id, self.signals.iter().map(SignalRecord::signal).collect())
    }
}

impl SignalRecord {
    /// Builds the signal described by the record.
    pub fn signal(&self) -> Signal {
        Signal::from_attributes(&SignalAttributes {
            duration: self.duration,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            color: Color::parse_lenient(&self.color),
        })
    }
}

impl OptimizerRecord {
    /// Converts the record into validated genetic algorithm settings.
    pub fn genetic_config(&self) -> Result<GeneticConfig> {
        let config = match self.kind.parse::<OptimizerKind>()? {
            OptimizerKind::Genetic => GeneticConfig {
                population_size: self.population_size,
                generations: self.generations,
                mutation_rate: self.mutation_rate,
                tournament_size: self.tournament_size,
                crossover: self.crossover.parse()?,
                seed: self.seed,
            },
        };
        config.validate()?;
        Ok(config)
    }
}
