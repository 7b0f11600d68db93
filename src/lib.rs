pub use cgmath;
pub use chain::{merge_green_waves, WaveGraph};
pub use color::Color;
pub use corridor::{Corridor, CorridorReport, OptimizationReport};
pub use error::{Error, Result};
pub use interval::{GreenInterval, OVERLAP_EPSILON};
pub use junction::{Junction, JunctionAttributes};
pub use optimizer::{CrossoverKind, GeneticConfig, GeneticOptimizer, Optimizer, OptimizerKind};
pub use phase::Phase;
pub use signal::{Signal, SignalAttributes};
use slotmap::new_key_type;
pub use through::ThroughGreenWave;
pub use util::Interval;
pub use wave::{
    find_green_waves, find_green_waves_between_intervals, find_green_waves_with_offsets,
    GreenWave, WaveFinder,
};

mod chain;
mod color;
mod corridor;
mod error;
mod interval;
mod junction;
pub mod math;
pub mod optimizer;
mod phase;
#[cfg(feature = "serde")]
pub mod scenario;
mod signal;
mod through;
mod util;
mod wave;

new_key_type! {
    /// Unique ID of a [GreenWave] within a [WaveGraph].
    pub struct WaveId;
}
