use crate::Color;

/// A single signal state of a traffic light, shown for a fixed duration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Signal {
    /// The duration of the signal in s.
    duration: u32,
    /// The shortest duration the signal may be given in s.
    /// Not used by the green wave computation.
    min_duration: u32,
    /// The longest duration the signal may be given in s.
    /// Not used by the green wave computation.
    max_duration: u32,
    /// The color shown.
    color: Color,
}

/// The attributes of a signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalAttributes {
    /// The duration of the signal in s.
    pub duration: u32,
    /// The shortest allowed duration in s, defaults to `duration`.
    pub min_duration: Option<u32>,
    /// The longest allowed duration in s, defaults to `duration`.
    pub max_duration: Option<u32>,
    /// The color shown.
    pub color: Color,
}

impl Signal {
    /// Creates a signal whose duration bounds equal its duration.
    pub fn new(duration: u32, color: Color) -> Self {
        Self {
            duration,
            min_duration: duration,
            max_duration: duration,
            color,
        }
    }

    /// Creates a signal from its attributes.
    pub fn from_attributes(attribs: &SignalAttributes) -> Self {
        Self {
            duration: attribs.duration,
            min_duration: attribs.min_duration.unwrap_or(attribs.duration),
            max_duration: attribs.max_duration.unwrap_or(attribs.duration),
            color: attribs.color,
        }
    }

    /// Gets the duration of the signal in s.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Gets the shortest allowed duration in s.
    pub fn min_duration(&self) -> u32 {
        self.min_duration
    }

    /// Gets the longest allowed duration in s.
    pub fn max_duration(&self) -> u32 {
        self.max_duration
    }

    /// Gets the color of the signal.
    pub fn color(&self) -> Color {
        self.color
    }
}
