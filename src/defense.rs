//! Structure placement for the current turn.
//!
//! The planner is a two-phase state machine over the turn number. The
//! opening (turns up to the cutoff) lays a fixed symmetric layout to get a
//! baseline defense up before any breach history exists. After the cutoff
//! the corner walls become conditional: a corner whose cumulative breach
//! count has crossed the overload threshold stops receiving cheap walls and
//! is rebuilt in turrets instead, trading structure resource for durability
//! on the side the opponent keeps winning.
//!
//! Every placement is a best-effort attempt against the engine; a rejected
//! cell is skipped and the walk continues. The planner re-evaluates from
//! scratch each turn, so a skip this turn is naturally retried next turn.

use crate::breach::{BreachMemory, Region};
use crate::constants::*;
use crate::engine::{place_each, TurnHandle};
use crate::layout::DefenseLayout;
use crate::location::Location;
use crate::units::{ResourcePool, Side, UnitKind};
use log::*;

/// Tunable thresholds for the defense planner. The defaults reproduce the
/// baseline behavior; swap in different values at construction to tune
/// without touching control flow.
#[derive(Clone, Copy, Debug)]
pub struct DefensePolicy {
    /// Last turn (inclusive) of the fixed opening layout.
    pub early_cutoff: u32,
    /// Cumulative breaches on one side before its corner is fortified.
    pub overload_threshold: u32,
    /// Structure resource required before a corner wall is demolished to
    /// make room for a turret.
    pub turret_upgrade_min_structure: f32,
    /// Structure resource required before a wall is demolished to make room
    /// for a support.
    pub support_clear_min_structure: f32,
}

impl Default for DefensePolicy {
    fn default() -> Self {
        DefensePolicy {
            early_cutoff: EARLY_PHASE_CUTOFF,
            overload_threshold: REGION_OVERLOAD_THRESHOLD,
            turret_upgrade_min_structure: TURRET_UPGRADE_MIN_STRUCTURE,
            support_clear_min_structure: SUPPORT_CLEAR_MIN_STRUCTURE,
        }
    }
}

pub struct DefensePlanner {
    layout: DefenseLayout,
    policy: DefensePolicy,
}

impl DefensePlanner {
    pub fn new(layout: DefenseLayout, policy: DefensePolicy) -> Self {
        DefensePlanner { layout, policy }
    }

    /// Issue this turn's structure placements and removals.
    pub fn build(&self, turn: &mut dyn TurnHandle, memory: &BreachMemory) {
        place_each(turn, UnitKind::Turret, self.layout.turret_chokepoints);

        let mut fortify_left = false;
        let mut fortify_right = false;

        if turn.turn_number() <= self.policy.early_cutoff {
            let mut walls = self.layout.early_wall_line.to_vec();
            walls.extend_from_slice(self.layout.corner_left);
            walls.extend_from_slice(self.layout.corner_right);
            place_each(turn, UnitKind::Wall, &walls);
        } else {
            fortify_left =
                memory.is_region_overloaded(Region::Left, self.policy.overload_threshold);
            fortify_right =
                memory.is_region_overloaded(Region::Right, self.policy.overload_threshold);
            if fortify_left || fortify_right {
                debug!(
                    "corner fortification active (left: {}, right: {})",
                    fortify_left, fortify_right
                );
            }

            let mut walls = self.layout.late_wall_line.to_vec();
            if !fortify_right {
                walls.extend_from_slice(self.layout.corner_right);
            }
            if !fortify_left {
                walls.extend_from_slice(self.layout.corner_left);
            }
            place_each(turn, UnitKind::Wall, &walls);
        }

        place_each(turn, UnitKind::Turret, self.layout.secondary_turrets);

        if fortify_right {
            self.upgrade_to_turrets(turn, self.layout.corner_right);
        }
        if fortify_left {
            self.upgrade_to_turrets(turn, self.layout.corner_left);
            self.upgrade_to_turrets(turn, self.layout.left_reinforcement);
        }

        if turn.turn_number() > self.policy.early_cutoff {
            self.place_supports(turn);
        }
    }

    /// Rebuild a run of cells in turrets. A wall already holding a cell is
    /// demolished first, but only while the structure pool can absorb the
    /// replacement cost; the turret attempt itself is unconditional.
    fn upgrade_to_turrets(&self, turn: &mut dyn TurnHandle, cells: &[Location]) {
        for &loc in cells {
            if let Some(unit) = turn.stationary_occupant(loc) {
                if unit.kind == UnitKind::Wall
                    && turn.resource(ResourcePool::Structure, Side::Friendly)
                        > self.policy.turret_upgrade_min_structure
                {
                    turn.attempt_remove(loc);
                }
            }
            turn.attempt_place(UnitKind::Turret, loc, 1);
        }
    }

    /// Walk the support line, sacrificing a cheap wall for a support where
    /// the structure pool allows. Support compounds over the rest of the
    /// match, so the trade is worth a wall.
    fn place_supports(&self, turn: &mut dyn TurnHandle) {
        for &loc in self.layout.support_line {
            if let Some(unit) = turn.stationary_occupant(loc) {
                if unit.kind == UnitKind::Wall
                    && turn.resource(ResourcePool::Structure, Side::Friendly)
                        > self.policy.support_clear_min_structure
                {
                    turn.attempt_remove(loc);
                }
            }
            turn.attempt_place(UnitKind::Support, loc, 1);
        }
    }

    pub fn layout(&self) -> &DefenseLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::sim::{sample_config, SimEngine};
    use crate::units::PlacementIntent;
    use std::sync::Arc;

    fn planner() -> DefensePlanner {
        DefensePlanner::new(DefenseLayout::default(), DefensePolicy::default())
    }

    fn rich_sim(config: &Arc<MatchConfig>, turn: u32) -> SimEngine {
        let mut sim = SimEngine::new(Arc::clone(config));
        sim.set_turn(turn);
        sim.set_resource(ResourcePool::Structure, Side::Friendly, 999.0);
        sim.set_resource(ResourcePool::Action, Side::Friendly, 999.0);
        sim
    }

    fn overloaded_right() -> BreachMemory {
        let mut memory = BreachMemory::new();
        for _ in 0..6 {
            memory.record(
                r#"{"events": {"breach": [[[24, 10], 9.0, 4, "x", 2]]}}"#,
            );
        }
        memory
    }

    fn placements_of(sim: &SimEngine, kind: UnitKind) -> Vec<Location> {
        sim.intents()
            .iter()
            .filter(|intent| intent.kind == kind)
            .map(|intent| intent.location)
            .collect()
    }

    #[test]
    fn early_phase_ignores_breach_history() {
        let config = Arc::new(sample_config());
        let planner = planner();

        let mut clean = rich_sim(&config, 5);
        planner.build(&mut clean, &BreachMemory::new());

        let mut scarred = rich_sim(&config, 5);
        planner.build(&mut scarred, &overloaded_right());

        assert_eq!(clean.intents(), scarred.intents());
        assert!(clean.removals().is_empty());
    }

    #[test]
    fn early_phase_places_the_opening_layout() {
        let config = Arc::new(sample_config());
        let mut sim = rich_sim(&config, 1);
        planner().build(&mut sim, &BreachMemory::new());

        let walls = placements_of(&sim, UnitKind::Wall);
        let turrets = placements_of(&sim, UnitKind::Turret);

        for &loc in DefenseLayout::default().early_wall_line {
            assert!(walls.contains(&loc), "missing opening wall at {loc:?}");
        }
        for &loc in DefenseLayout::default().corner_left {
            assert!(walls.contains(&loc));
        }
        for &loc in DefenseLayout::default().turret_chokepoints {
            assert!(turrets.contains(&loc));
        }
        // No corner turret reinforcement in the opening.
        for &loc in DefenseLayout::default().corner_right {
            assert!(!turrets.contains(&loc));
        }
        assert!(placements_of(&sim, UnitKind::Support).is_empty());
    }

    #[test]
    fn overloaded_right_corner_swaps_walls_for_turrets() {
        let config = Arc::new(sample_config());
        let planner = planner();
        let memory = overloaded_right();
        let layout = DefenseLayout::default();

        for turn_number in [11, 12, 20] {
            let mut sim = rich_sim(&config, turn_number);
            planner.build(&mut sim, &memory);

            let walls = placements_of(&sim, UnitKind::Wall);
            let turrets = placements_of(&sim, UnitKind::Turret);
            for &loc in layout.corner_right {
                assert!(!walls.contains(&loc), "turn {turn_number}: wall at {loc:?}");
                assert!(
                    turrets.contains(&loc),
                    "turn {turn_number}: no turret at {loc:?}"
                );
            }
            // The calm side keeps its cheap walls.
            for &loc in layout.corner_left {
                assert!(walls.contains(&loc));
            }
        }
    }

    #[test]
    fn fortified_corner_demolishes_a_standing_wall_when_budget_allows() {
        let config = Arc::new(sample_config());
        let layout = DefenseLayout::default();
        let corner = layout.corner_right[0];

        let mut sim = rich_sim(&config, 11);
        sim.put_unit(Side::Friendly, UnitKind::Wall, corner);
        planner().build(&mut sim, &overloaded_right());

        assert!(sim.removals().contains(&corner));
        assert!(placements_of(&sim, UnitKind::Turret).contains(&corner));
    }

    #[test]
    fn fortified_corner_keeps_the_wall_when_structure_pool_is_tight() {
        let config = Arc::new(sample_config());
        let layout = DefenseLayout::default();
        let corner = layout.corner_right[0];

        let mut sim = SimEngine::new(Arc::clone(&config));
        sim.set_turn(11);
        sim.set_resource(ResourcePool::Structure, Side::Friendly, 5.0);
        sim.put_unit(Side::Friendly, UnitKind::Wall, corner);
        planner().build(&mut sim, &overloaded_right());

        assert!(!sim.removals().contains(&corner));
    }

    #[test]
    fn supports_appear_only_after_the_cutoff() {
        let config = Arc::new(sample_config());
        let planner = planner();
        let layout = DefenseLayout::default();

        let mut early = rich_sim(&config, 10);
        planner.build(&mut early, &BreachMemory::new());
        assert!(placements_of(&early, UnitKind::Support).is_empty());

        let mut late = rich_sim(&config, 11);
        planner.build(&mut late, &BreachMemory::new());
        let supports = placements_of(&late, UnitKind::Support);
        for &loc in layout.support_line {
            assert!(supports.contains(&loc), "no support at {loc:?}");
        }
    }

    #[test]
    fn support_line_sacrifices_walls_when_flush() {
        let config = Arc::new(sample_config());
        let layout = DefenseLayout::default();
        let cell = layout.support_line[0];

        let mut sim = rich_sim(&config, 11);
        sim.put_unit(Side::Friendly, UnitKind::Wall, cell);
        planner().build(&mut sim, &BreachMemory::new());

        assert!(sim.removals().contains(&cell));
        assert!(sim.intents().contains(&PlacementIntent {
            kind: UnitKind::Support,
            location: cell,
            count: 1,
        }));
    }
}
