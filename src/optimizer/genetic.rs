use crate::chain::through_waves;
use crate::{Error, Junction, Result, WaveFinder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// The largest offset change a mutation makes in the first generation, in s.
const MAX_DELTA_START: f64 = 5.0;

/// The largest offset change a mutation makes in the last generation, in s.
const MAX_DELTA_END: f64 = 0.5;

/// How two parents are combined into a child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CrossoverKind {
    /// Each gene is a random weighted average of the parents' genes.
    #[default]
    Blend,
    /// Each gene is copied from either parent with equal probability.
    Uniform,
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverKind::Blend => f.write_str("blend"),
            CrossoverKind::Uniform => f.write_str("uniform"),
        }
    }
}

impl FromStr for CrossoverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blend" => Ok(CrossoverKind::Blend),
            "uniform" => Ok(CrossoverKind::Uniform),
            _ => Err(Error::UnknownCrossover(s.to_string())),
        }
    }
}

/// The tunable parameters of the genetic algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// The number of individuals in each generation.
    pub population_size: usize,
    /// The number of generations to evolve.
    pub generations: usize,
    /// The probability that a gene is mutated.
    pub mutation_rate: f64,
    /// The number of individuals drawn for each tournament.
    pub tournament_size: usize,
    /// How parents are combined.
    pub crossover: CrossoverKind,
    /// Seed for reproducible runs. Runs are seeded from entropy if not set.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
            tournament_size: 3,
            crossover: CrossoverKind::Blend,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Checks that every parameter lies within its valid domain.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidPopulationSize(self.population_size));
        }
        if self.generations == 0 {
            return Err(Error::InvalidGenerations(self.generations));
        }
        if self.tournament_size == 0 {
            return Err(Error::InvalidTournamentSize(self.tournament_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// A candidate set of offsets.
#[derive(Clone, Debug)]
struct Individual {
    /// One offset per junction in s; the first is always zero.
    offsets: Vec<f64>,
    /// The total quality of the through green waves the offsets produce.
    fitness: f64,
}

/// Searches for junction offsets with a genetic algorithm.
///
/// Each generation is evaluated, its best individual is carried over
/// unchanged, and the rest of the next generation is bred from tournament
/// winners. Mutations shrink linearly over the course of the run.
#[derive(Clone, Debug)]
pub struct GeneticOptimizer {
    /// Finds the green waves for a set of offsets.
    finder: WaveFinder,
    /// The cycle length of each junction in s.
    cycle_lengths: Vec<f64>,
    /// The algorithm parameters.
    config: GeneticConfig,
    /// The random number generator.
    rng: ChaCha8Rng,
    /// The best fitness after each generation of the last run.
    best_fitness_history: Vec<f64>,
}

impl GeneticOptimizer {
    /// Creates an optimizer for the given junctions at the desired speed in km/h.
    pub fn new(junctions: &[Junction], speed_kmh: f64, config: &GeneticConfig) -> Result<Self> {
        config.validate()?;
        let finder = WaveFinder::new(junctions, speed_kmh)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            cycle_lengths: finder.cycle_lengths().collect(),
            finder,
            config: *config,
            rng,
            best_fitness_history: Vec::with_capacity(config.generations),
        })
    }

    /// Gets the algorithm parameters.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Gets the best fitness after each generation of the last run.
    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness_history
    }

    /// Gets the best fitness of the last run.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness_history.last().copied().unwrap_or(0.0)
    }

    /// Runs the genetic algorithm and returns the best offsets found, in s.
    pub fn optimize(&mut self) -> Vec<f64> {
        log::debug!(
            "Optimizing offsets of {} junctions: {} individuals over {} generations",
            self.cycle_lengths.len(),
            self.config.population_size,
            self.config.generations
        );
        self.best_fitness_history.clear();

        let mut population = self.initial_population();
        let mut best: Option<Individual> = None;
        for generation in 0..self.config.generations {
            for individual in &mut population {
                individual.fitness = self.fitness(&individual.offsets);
            }
            let Some(elite) = population
                .iter()
                .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
                .cloned()
            else {
                break;
            };

            if best.as_ref().map_or(true, |best| elite.fitness > best.fitness) {
                best = Some(elite.clone());
            }
            let best_fitness = best.as_ref().map_or(0.0, |best| best.fitness);
            self.best_fitness_history.push(best_fitness);
            log::trace!("Generation {}: best fitness {}", generation, best_fitness);

            if generation + 1 < self.config.generations {
                population = self.next_generation(&population, elite, generation);
            }
        }

        let best = best.map_or_else(|| vec![0.0; self.cycle_lengths.len()], |best| best.offsets);
        log::debug!("Best offsets {:?} with fitness {}", best, self.best_fitness());
        best
    }

    /// Computes the total quality of the through green waves for a set of offsets.
    fn fitness(&self, offsets: &[f64]) -> f64 {
        let segments = self.finder.find_unchecked(offsets);
        let max_depth = self.finder.num_junctions();
        through_waves(&segments)
            .iter()
            .map(|wave| wave.quality(max_depth))
            .sum()
    }

    /// Creates a population of random offsets.
    fn initial_population(&mut self) -> Vec<Individual> {
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut offsets = Vec::with_capacity(self.cycle_lengths.len());
            for (idx, &cycle) in self.cycle_lengths.iter().enumerate() {
                let offset = if idx == 0 || cycle <= 0.0 {
                    0.0
                } else {
                    self.rng.gen_range(0.0..cycle)
                };
                offsets.push(offset);
            }
            population.push(Individual {
                offsets,
                fitness: 0.0,
            });
        }
        population
    }

    /// Breeds the next generation, keeping `elite` unchanged.
    fn next_generation(
        &mut self,
        population: &[Individual],
        elite: Individual,
        generation: usize,
    ) -> Vec<Individual> {
        let mut next = Vec::with_capacity(self.config.population_size);
        next.push(elite);
        while next.len() < self.config.population_size {
            let first = self.tournament(population);
            let second = self.tournament(population);
            let mut offsets = self.crossover(&first.offsets, &second.offsets);
            self.mutate(&mut offsets, generation);
            next.push(Individual {
                offsets,
                fitness: 0.0,
            });
        }
        next
    }

    /// Picks the fittest of `tournament_size` individuals drawn with replacement.
    fn tournament<'a>(&mut self, population: &'a [Individual]) -> &'a Individual {
        let mut winner = &population[self.rng.gen_range(0..population.len())];
        for _ in 1..self.config.tournament_size {
            let contender = &population[self.rng.gen_range(0..population.len())];
            if contender.fitness > winner.fitness {
                winner = contender;
            }
        }
        winner
    }

    /// Combines two parents into a child.
    fn crossover(&mut self, first: &[f64], second: &[f64]) -> Vec<f64> {
        let mut child = Vec::with_capacity(first.len());
        for ((&a, &b), &cycle) in first.iter().zip(second).zip(&self.cycle_lengths) {
            let gene = match self.config.crossover {
                CrossoverKind::Blend => {
                    let weight: f64 = self.rng.gen();
                    weight * a + (1.0 - weight) * b
                }
                CrossoverKind::Uniform => {
                    if self.rng.gen_bool(0.5) {
                        a
                    } else {
                        b
                    }
                }
            };
            child.push(wrap_offset(gene, cycle));
        }
        if let Some(first) = child.first_mut() {
            *first = 0.0;
        }
        child
    }

    /// Randomly nudges genes, by less as the run progresses.
    fn mutate(&mut self, offsets: &mut [f64], generation: usize) {
        let max_delta = max_mutation_delta(generation, self.config.generations);
        for (offset, &cycle) in offsets.iter_mut().zip(&self.cycle_lengths).skip(1) {
            if self.rng.gen_bool(self.config.mutation_rate) {
                let delta = self.rng.gen_range(-max_delta..=max_delta);
                *offset = wrap_offset(*offset + delta, cycle);
            }
        }
    }
}

/// The largest mutation delta in s at a given generation.
fn max_mutation_delta(generation: usize, generations: usize) -> f64 {
    let progress = generation as f64 / generations as f64;
    MAX_DELTA_START * (1.0 - progress) + MAX_DELTA_END * progress
}

/// Wraps an offset into `[0, cycle)`.
fn wrap_offset(offset: f64, cycle: f64) -> f64 {
    if cycle > 0.0 {
        offset.rem_euclid(cycle)
    } else {
        0.0
    }
}
