use crate::Signal;

/// A fixed sequence of signals which always play together, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Phase {
    /// The phase identifier.
    id: i32,
    /// The signals of the phase.
    signals: Vec<Signal>,
    /// The sum of the signal durations in s.
    total_seconds: u32,
}

impl Phase {
    /// Creates a new phase. The total duration saturates at `u32::MAX` s.
    pub fn new(id: i32, signals: Vec<Signal>) -> Self {
        let total_seconds = signals
            .iter()
            .map(Signal::duration)
            .fold(0, u32::saturating_add);
        Self {
            id,
            signals,
            total_seconds,
        }
    }

    /// Gets the phase identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Gets the signals of the phase, in the order they are shown.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Gets the duration of the whole phase in s.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }
}
