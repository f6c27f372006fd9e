//! Cross-turn memory of where the opponent has broken through.
//!
//! Breaches are appended for the lifetime of the match and never pruned:
//! the opponent's historical tendency is exactly what drives the late-game
//! structural asymmetry in [`crate::defense`]. Derived counters (left/right
//! region bias, per-kind tallies) are maintained on insert so queries are
//! constant time.

use crate::location::{BoardEdge, Location};
use crate::telemetry::decode_breaches;
use crate::units::MobileKind;
use log::*;

/// One opponent breach, as parsed from the action-frame feed. Never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreachEvent {
    pub location: Location,
    pub attacker: MobileKind,
    pub turn: u32,
}

/// Halves of the defended edge, split along the bottom-left diagonal.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Region {
    Left,
    Right,
}

/// Cumulative breach counts per region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionBias {
    pub left: u32,
    pub right: u32,
}

/// Append-only log of opponent breaches plus derived counters.
#[derive(Debug, Default)]
pub struct BreachMemory {
    events: Vec<BreachEvent>,
    bias: RegionBias,
    kind_tallies: [u32; 3],
}

impl BreachMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one raw action frame and append every opponent breach it
    /// reports. Malformed entries are skipped inside the decoder; this
    /// method never fails and never aborts the turn flow.
    pub fn record(&mut self, raw_frame: &str) {
        let (turn, records) = decode_breaches(raw_frame);
        for record in records {
            debug!(
                "scored on at ({}, {}) by {:?}",
                record.location.x(),
                record.location.y(),
                record.attacker
            );
            self.append(BreachEvent {
                location: record.location,
                attacker: record.attacker,
                turn,
            });
        }
    }

    fn append(&mut self, event: BreachEvent) {
        if BoardEdge::BottomLeft.contains(event.location) {
            self.bias.left += 1;
        } else {
            self.bias.right += 1;
        }
        self.kind_tallies[event.attacker.index()] += 1;
        self.events.push(event);
    }

    pub fn events(&self) -> &[BreachEvent] {
        &self.events
    }

    pub fn region_bias(&self) -> RegionBias {
        self.bias
    }

    /// True once the region's cumulative breach count exceeds `threshold`.
    /// Counts never reset, so once true this stays true for the match.
    pub fn is_region_overloaded(&self, region: Region, threshold: u32) -> bool {
        let count = match region {
            Region::Left => self.bias.left,
            Region::Right => self.bias.right,
        };
        count > threshold
    }

    /// How many breaches this mobile kind has scored so far.
    pub fn kind_tally(&self, kind: MobileKind) -> u32 {
        self.kind_tallies[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breach_frame(entries: &str) -> String {
        format!(
            r#"{{"turnInfo": [1, 4, 0], "events": {{"breach": [{entries}]}}}}"#
        )
    }

    #[test]
    fn records_opponent_breach_and_ignores_own() {
        let mut memory = BreachMemory::new();
        memory.record(&breach_frame(
            r#"[[1, 2], 9.0, 3, "a", 2], [[3, 4], 9.0, 4, "b", 1]"#,
        ));

        assert_eq!(memory.events().len(), 1);
        let event = memory.events()[0];
        assert_eq!(event.location, Location::new(1, 2));
        assert_eq!(event.attacker, MobileKind::Light);
        assert_eq!(event.turn, 4);
        assert_eq!(memory.kind_tally(MobileKind::Light), 1);
        assert_eq!(memory.kind_tally(MobileKind::Heavy), 0);
    }

    #[test]
    fn missing_field_skips_only_that_entry() {
        let mut memory = BreachMemory::new();
        // Second entry has no attacker code or owner flag.
        memory.record(&breach_frame(
            r#"[[11, 2], 9.0, 4, "a", 2], [[1, 12]], [[12, 2], 9.0, 5, "c", 2]"#,
        ));
        assert_eq!(memory.events().len(), 2);
    }

    #[test]
    fn region_bias_splits_on_the_bottom_left_diagonal() {
        let mut memory = BreachMemory::new();
        // (1, 12) sits on the bottom-left edge; (24, 10) on the bottom-right.
        memory.record(&breach_frame(
            r#"[[1, 12], 9.0, 3, "a", 2], [[24, 10], 9.0, 3, "b", 2], [[2, 11], 9.0, 3, "c", 2]"#,
        ));
        assert_eq!(memory.region_bias(), RegionBias { left: 2, right: 1 });
    }

    #[test]
    fn overload_is_strictly_greater_and_monotonic() {
        let mut memory = BreachMemory::new();
        for _ in 0..5 {
            memory.record(&breach_frame(r#"[[24, 10], 9.0, 4, "x", 2]"#));
        }
        assert!(!memory.is_region_overloaded(Region::Right, 5));

        memory.record(&breach_frame(r#"[[24, 10], 9.0, 4, "x", 2]"#));
        assert!(memory.is_region_overloaded(Region::Right, 5));
        assert!(!memory.is_region_overloaded(Region::Left, 5));

        // More history never clears the flag.
        memory.record(&breach_frame(r#"[[1, 12], 9.0, 3, "y", 2]"#));
        assert!(memory.is_region_overloaded(Region::Right, 5));
    }
}
