//! Placement coordinate tables.
//!
//! Layouts are data, not logic: the planners take a layout at construction
//! and never hardcode a coordinate themselves, so a tuned layout can be
//! swapped in without touching control flow. Tables are versioned by name;
//! `v1` is the hand-tuned baseline.

use crate::location::Location;

const fn at(x: u8, y: u8) -> Location {
    Location::new(x, y)
}

/// Turret chokepoints held in both phases: the two lane mouths and the
/// center funnel.
pub const TURRET_CHOKEPOINTS_V1: &[Location] = &[at(3, 12), at(24, 12), at(13, 9)];

/// Second turret pair, placed after the wall line each turn.
pub const SECONDARY_TURRETS_V1: &[Location] = &[at(8, 9), at(19, 9)];

/// Wall diagonals shielding each corner.
pub const CORNER_LEFT_V1: &[Location] = &[at(0, 13), at(1, 13), at(2, 13), at(3, 13)];
pub const CORNER_RIGHT_V1: &[Location] = &[at(24, 13), at(25, 13), at(27, 13)];

/// Opening wall line: central shield plus the flanks, walked front to back.
pub const EARLY_WALL_LINE_V1: &[Location] = &[
    at(4, 12),
    at(4, 11),
    at(23, 12),
    at(23, 11),
    at(12, 10),
    at(13, 10),
    at(14, 10),
    at(12, 9),
    at(14, 9),
    at(5, 10),
    at(22, 10),
    at(6, 9),
    at(21, 9),
    at(7, 10),
    at(20, 10),
    at(8, 10),
    at(19, 10),
    at(9, 10),
    at(18, 10),
    at(10, 10),
    at(17, 10),
    at(11, 10),
    at(16, 10),
    at(15, 10),
];

/// Late wall line. Omits the right-flank cells reserved for the support
/// line once the opening is over.
pub const LATE_WALL_LINE_V1: &[Location] = &[
    at(4, 12),
    at(4, 11),
    at(12, 10),
    at(13, 10),
    at(14, 10),
    at(12, 9),
    at(14, 9),
    at(5, 10),
    at(6, 9),
    at(7, 10),
    at(20, 10),
    at(8, 10),
    at(19, 10),
    at(9, 10),
    at(18, 10),
    at(10, 10),
    at(17, 10),
    at(11, 10),
    at(16, 10),
    at(15, 10),
];

/// Extra turret line behind the left corner, used only once that corner is
/// fortified.
pub const LEFT_REINFORCEMENT_V1: &[Location] = &[
    at(2, 12),
    at(1, 12),
    at(2, 11),
    at(4, 10),
    at(3, 11),
    at(7, 9),
];

/// Support emplacements behind the right flank.
pub const SUPPORT_LINE_V1: &[Location] = &[
    at(21, 10),
    at(22, 11),
    at(23, 12),
    at(23, 11),
    at(22, 10),
    at(21, 9),
];

/// Enemy frontline cells scanned for defense density before a wave launch.
pub const THREAT_SCAN_V1: &[Location] = &[
    at(27, 14),
    at(26, 14),
    at(25, 14),
    at(24, 14),
    at(23, 14),
    at(26, 15),
    at(25, 15),
    at(24, 15),
    at(25, 16),
];

/// Deploy cells on the bottom-right edge considered for a siege column.
pub const SIEGE_DEPLOYS_V1: &[Location] = &[at(24, 10), at(23, 9), at(25, 11)];

/// Coordinate tables consumed by the defense planner.
#[derive(Clone, Debug)]
pub struct DefenseLayout {
    pub turret_chokepoints: &'static [Location],
    pub secondary_turrets: &'static [Location],
    pub corner_left: &'static [Location],
    pub corner_right: &'static [Location],
    pub early_wall_line: &'static [Location],
    pub late_wall_line: &'static [Location],
    pub left_reinforcement: &'static [Location],
    pub support_line: &'static [Location],
}

impl DefenseLayout {
    pub const fn v1() -> Self {
        DefenseLayout {
            turret_chokepoints: TURRET_CHOKEPOINTS_V1,
            secondary_turrets: SECONDARY_TURRETS_V1,
            corner_left: CORNER_LEFT_V1,
            corner_right: CORNER_RIGHT_V1,
            early_wall_line: EARLY_WALL_LINE_V1,
            late_wall_line: LATE_WALL_LINE_V1,
            left_reinforcement: LEFT_REINFORCEMENT_V1,
            support_line: SUPPORT_LINE_V1,
        }
    }
}

impl Default for DefenseLayout {
    fn default() -> Self {
        Self::v1()
    }
}

/// Coordinate tables consumed by the offense planner.
#[derive(Clone, Debug)]
pub struct OffenseLayout {
    /// Forward deploy cell for the disruptor screen.
    pub disruptor_anchor: Location,
    /// Deploy cell for the heavy wave.
    pub breaker_anchor: Location,
    /// First swarm cell: a fixed-size probe.
    pub swarm_probe: Location,
    /// Second swarm cell: flooded until the action pool runs dry.
    pub swarm_flood: Location,
    pub threat_scan: &'static [Location],
    /// Row walled off by the siege doctrine, built from high x downward.
    pub siege_row: u8,
    pub siege_span: (u8, u8),
    /// Candidate deploy cells for the siege column, ranked by path risk.
    pub siege_deploys: &'static [Location],
}

impl OffenseLayout {
    pub const fn v1() -> Self {
        OffenseLayout {
            disruptor_anchor: at(21, 7),
            breaker_anchor: at(21, 7),
            swarm_probe: at(5, 8),
            swarm_flood: at(4, 9),
            threat_scan: THREAT_SCAN_V1,
            siege_row: 11,
            siege_span: (6, 27),
            siege_deploys: SIEGE_DEPLOYS_V1,
        }
    }
}

impl Default for OffenseLayout {
    fn default() -> Self {
        Self::v1()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_tables_are_on_the_friendly_half() {
        let layout = DefenseLayout::v1();
        for table in [
            layout.turret_chokepoints,
            layout.secondary_turrets,
            layout.corner_left,
            layout.corner_right,
            layout.early_wall_line,
            layout.late_wall_line,
            layout.left_reinforcement,
            layout.support_line,
        ] {
            for &loc in table {
                assert!(loc.in_bounds(), "{loc:?} out of bounds");
                assert!(loc.on_friendly_half(), "{loc:?} not on friendly half");
            }
        }
    }

    #[test]
    fn threat_scan_is_on_the_enemy_half() {
        for &loc in THREAT_SCAN_V1 {
            assert!(loc.in_bounds());
            assert!(!loc.on_friendly_half());
        }
    }
}
