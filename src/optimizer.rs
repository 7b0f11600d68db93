//! Search for the junction offsets which give the best through green waves.

pub use self::genetic::{CrossoverKind, GeneticConfig, GeneticOptimizer};
use crate::{Error, Junction, Result};
use std::fmt;
use std::str::FromStr;

mod genetic;

/// The available offset search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptimizerKind {
    /// A genetic algorithm, see [GeneticOptimizer].
    Genetic,
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerKind::Genetic => f.write_str("genetic"),
        }
    }
}

impl FromStr for OptimizerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "genetic" => Ok(OptimizerKind::Genetic),
            _ => Err(Error::UnknownOptimizer(s.to_string())),
        }
    }
}

/// An offset optimizer.
///
/// Every strategy returns one offset per junction, in s, with the first
/// junction fixed at zero.
#[derive(Clone, Debug)]
pub enum Optimizer {
    Genetic(GeneticOptimizer),
}

impl Optimizer {
    /// Creates an optimizer of the given kind.
    pub fn new(
        kind: OptimizerKind,
        junctions: &[Junction],
        speed_kmh: f64,
        config: &GeneticConfig,
    ) -> Result<Self> {
        match kind {
            OptimizerKind::Genetic => Self::genetic(junctions, speed_kmh, config),
        }
    }

    /// Creates a genetic optimizer.
    pub fn genetic(junctions: &[Junction], speed_kmh: f64, config: &GeneticConfig) -> Result<Self> {
        GeneticOptimizer::new(junctions, speed_kmh, config).map(Optimizer::Genetic)
    }

    /// Gets the kind of the optimizer.
    pub fn kind(&self) -> OptimizerKind {
        match self {
            Optimizer::Genetic(_) => OptimizerKind::Genetic,
        }
    }

    /// Runs the search and returns the best offsets found.
    pub fn optimize(&mut self) -> Vec<f64> {
        match self {
            Optimizer::Genetic(optimizer) => optimizer.optimize(),
        }
    }

    /// Gets the best fitness after each iteration of the last run.
    pub fn best_fitness_history(&self) -> &[f64] {
        match self {
            Optimizer::Genetic(optimizer) => optimizer.best_fitness_history(),
        }
    }
}
