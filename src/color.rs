use crate::Error;
use std::fmt;
use std::str::FromStr;

/// The state shown by a traffic light signal.
///
/// The set of states follows SUMO's signal state definitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// No state has been set.
    #[default]
    Undefined,
    /// Vehicles must stop.
    Red,
    /// Vehicles decelerate if far away from the junction, otherwise they pass.
    Yellow,
    /// Vehicles may pass unless a higher priority stream uses the junction.
    Green,
    /// Vehicles may pass the junction.
    GreenPriority,
    /// Green right-turn arrow; vehicles must stop before passing.
    GreenRight,
    /// Announces an upcoming green, vehicles may not drive yet.
    RedYellow,
    /// Signal is off and blinking; vehicles have to yield.
    Blinking,
    /// Signal is off; vehicles have the right of way.
    No,
}

const COLORS: [(Color, &str); 9] = [
    (Color::Undefined, "UNDEFINED"),
    (Color::Red, "RED"),
    (Color::Yellow, "YELLOW"),
    (Color::Green, "GREEN"),
    (Color::GreenPriority, "GREENPRIORITY"),
    (Color::GreenRight, "GREENRIGHT"),
    (Color::RedYellow, "REDYELLOW"),
    (Color::Blinking, "BLINKING"),
    (Color::No, "NO"),
];

impl Color {
    /// Whether a vehicle may pass the junction without stopping.
    pub fn is_green(self) -> bool {
        matches!(self, Color::Green | Color::GreenPriority)
    }

    /// Gets the upper-case name of the color.
    pub fn name(self) -> &'static str {
        COLORS
            .iter()
            .find(|(color, _)| *color == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNDEFINED")
    }

    /// Parses a color name, falling back to [Color::Undefined] for unknown names.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown signal color '{}', treating it as UNDEFINED", name);
            Color::Undefined
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLORS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(color, _)| *color)
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}
