//! Error type shared by every fallible entry point of the crate.

use std::fmt;

/// Errors reported when a corridor, optimizer or scenario is built from invalid input.
///
/// Degenerate geometry (a zero-length cycle, no green signals, no overlapping
/// windows) is never an error; it shows up as an empty result instead.
#[derive(Debug)]
pub enum Error {
    /// The desired speed is zero, negative or not a number, in km/h.
    InvalidSpeed(f64),
    /// Green waves need at least two junctions.
    NotEnoughJunctions(usize),
    /// The number of offsets doesn't match the number of junctions.
    OffsetCount { expected: usize, found: usize },
    /// The optimizer population must hold at least one individual.
    InvalidPopulationSize(usize),
    /// The optimizer must run for at least one generation.
    InvalidGenerations(usize),
    /// Tournaments must draw at least one individual.
    InvalidTournamentSize(usize),
    /// The mutation rate is a probability and must lie in `[0, 1]`.
    InvalidMutationRate(f64),
    /// The crossover name is not recognised.
    UnknownCrossover(String),
    /// The optimizer name is not recognised.
    UnknownOptimizer(String),
    /// The signal color name is not recognised.
    UnknownColor(String),
    /// The cycle of a junction is longer than `u32::MAX` s.
    CycleTooLong { junction: i32, seconds: u64 },
    /// Reading a scenario file failed.
    Io(std::io::Error),
    /// A scenario could not be decoded.
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSpeed(speed) => {
                write!(f, "desired speed must be positive, got {speed} km/h")
            }
            Error::NotEnoughJunctions(count) => {
                write!(f, "at least 2 junctions are required, got {count}")
            }
            Error::OffsetCount { expected, found } => {
                write!(f, "expected {expected} offsets, one per junction, got {found}")
            }
            Error::InvalidPopulationSize(size) => {
                write!(f, "population size must be positive, got {size}")
            }
            Error::InvalidGenerations(count) => {
                write!(f, "generation count must be positive, got {count}")
            }
            Error::InvalidTournamentSize(size) => {
                write!(f, "tournament size must be positive, got {size}")
            }
            Error::InvalidMutationRate(rate) => {
                write!(f, "mutation rate must be within [0, 1], got {rate}")
            }
            Error::UnknownCrossover(name) => write!(f, "unknown crossover type '{name}'"),
            Error::UnknownOptimizer(name) => write!(f, "unknown optimizer type '{name}'"),
            Error::UnknownColor(name) => write!(f, "unknown signal color '{name}'"),
            Error::CycleTooLong { junction, seconds } => {
                write!(f, "cycle of junction {junction} is too long: {seconds} s")
            }
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Parse(msg) => write!(f, "can't parse scenario: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

/// Shorthand for results carrying an [Error].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display_names_the_offending_value() {
        let msg = Error::InvalidMutationRate(1.5).to_string();
        assert!(msg.contains("1.5"), "got: {msg}");

        let msg = Error::OffsetCount {
            expected: 4,
            found: 3,
        }
        .to_string();
        assert!(msg.contains('4') && msg.contains('3'), "got: {msg}");

        let msg = Error::UnknownCrossover("one-point".into()).to_string();
        assert!(msg.contains("one-point"), "got: {msg}");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
