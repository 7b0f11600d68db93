//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use greenwave::math::Point2d;
use greenwave::{Color, Junction, JunctionAttributes, Phase, Signal};

/// Builds a phase from `(duration, color)` pairs.
pub fn phase(id: i32, signals: &[(u32, Color)]) -> Phase {
    Phase::new(
        id,
        signals
            .iter()
            .map(|&(duration, color)| Signal::new(duration, color))
            .collect(),
    )
}

/// Builds a junction located `y` m along the corridor.
pub fn junction(id: i32, y: f64, cycle: Vec<Phase>) -> Junction {
    Junction::new(
        cycle,
        &JunctionAttributes {
            id,
            label: format!("J{id}"),
            point: Point2d::new(0.0, y),
        },
    )
}

/// Four junctions with 85 s cycles, 200 m, 250 m and 150 m apart.
pub fn basic_junctions() -> Vec<Junction> {
    use Color::*;
    vec![
        junction(
            1,
            0.0,
            vec![phase(0, &[(30, Green), (20, Red)]), phase(1, &[(20, Green), (15, Red)])],
        ),
        junction(
            2,
            200.0,
            vec![
                phase(10, &[(20, Red), (35, Green), (5, Yellow)]),
                phase(11, &[(10, Red), (10, Green), (5, Yellow)]),
            ],
        ),
        junction(
            3,
            450.0,
            vec![
                phase(20, &[(45, Red), (10, Green)]),
                phase(21, &[(7, Red), (18, Green), (5, Yellow)]),
            ],
        ),
        junction(
            4,
            600.0,
            vec![phase(20, &[(40, Red), (15, Green)]), phase(21, &[(10, Red), (20, Green)])],
        ),
    ]
}

/// The same corridor as [basic_junctions], as scenario JSON.
pub const BASIC_SCENARIO: &str = r#"{
    "speed_kmh": 40.0,
    "junctions": [
        {"id": 1, "label": "J1", "point": {"x": 0, "y": 0}, "cycle": [
            {"id": 0, "signals": [{"duration": 30, "color": "GREEN"}, {"duration": 20, "color": "RED"}]},
            {"id": 1, "signals": [{"duration": 20, "color": "green"}, {"duration": 15, "color": "RED"}]}
        ]},
        {"id": 2, "label": "J2", "point": {"x": 0, "y": 200}, "cycle": [
            {"id": 10, "signals": [{"duration": 20, "color": "RED"}, {"duration": 35, "color": "GREEN"}, {"duration": 5, "color": "YELLOW"}]},
            {"id": 11, "signals": [{"duration": 10, "color": "RED"}, {"duration": 10, "color": "GREEN"}, {"duration": 5, "color": "YELLOW"}]}
        ]},
        {"id": 3, "label": "J3", "point": {"x": 0, "y": 450}, "cycle": [
            {"id": 20, "signals": [{"duration": 45, "color": "RED"}, {"duration": 10, "color": "GREEN"}]},
            {"id": 21, "signals": [{"duration": 7, "color": "RED"}, {"duration": 18, "color": "GREEN", "min_duration": 12, "max_duration": 24}, {"duration": 5, "color": "AMBER"}]}
        ]},
        {"id": 4, "label": "J4", "point": {"x": 0, "y": 600}, "cycle": [
            {"id": 20, "signals": [{"duration": 40, "color": "RED"}, {"duration": 15, "color": "GREEN"}]},
            {"id": 21, "signals": [{"duration": 10, "color": "RED"}, {"duration": 20, "color": "GREEN"}]}
        ]}
    ]
}"#;
