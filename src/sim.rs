//! Offline engine harness.
//!
//! Implements [`TurnHandle`] natively so the decision core can be exercised
//! without the live engine: a board map, the two resource pools per side,
//! breadth-first pathing, and turret coverage by range. Behavior follows the
//! engine contract -- placement is affordability- and occupancy-checked and
//! best-effort -- but turn resolution (movement, combat) is out of scope; the
//! harness only answers the queries the planners make while deciding.

use crate::config::MatchConfig;
use crate::engine::TurnHandle;
use crate::location::{BoardEdge, Location};
use crate::units::{PlacedUnit, PlacementIntent, ResourcePool, Side, UnitKind};
use fnv::FnvHashMap;
use pathfinding::prelude::bfs;
use std::sync::Arc;

const SAMPLE_CONFIG_JSON: &str = r#"{
    "unitInformation": [
        {"shorthand": "FF", "cost": 1.0, "startHealth": 60.0},
        {"shorthand": "EF", "cost": 4.0, "startHealth": 30.0},
        {"shorthand": "DF", "cost": 3.0, "startHealth": 75.0,
         "attackDamage": 16.0, "attackRange": 3.5},
        {"shorthand": "PI", "cost": 1.0, "startHealth": 15.0,
         "attackDamage": 1.0, "attackRange": 3.5},
        {"shorthand": "EI", "cost": 3.0, "startHealth": 5.0,
         "attackDamage": 8.0, "attackRange": 4.5},
        {"shorthand": "SI", "cost": 1.0, "startHealth": 40.0,
         "attackDamage": 10.0, "attackRange": 4.5}
    ]
}"#;

/// Baseline unit catalog for offline runs, decoded through the same parser
/// the live config goes through.
pub fn sample_config() -> MatchConfig {
    MatchConfig::from_json(SAMPLE_CONFIG_JSON).expect("baseline catalog is valid")
}

fn pool_index(pool: ResourcePool) -> usize {
    match pool {
        ResourcePool::Structure => 0,
        ResourcePool::Action => 1,
    }
}

fn pool_for(kind: UnitKind) -> ResourcePool {
    if kind.is_structure() {
        ResourcePool::Structure
    } else {
        ResourcePool::Action
    }
}

/// Fraction of the placement cost returned when a structure is removed.
const REMOVAL_REFUND: f32 = 0.75;

pub struct SimEngine {
    config: Arc<MatchConfig>,
    turn_number: u32,
    board: FnvHashMap<Location, Vec<PlacedUnit>>,
    /// Indexed by side, then pool.
    resources: [[f32; 2]; 2],
    intents: Vec<PlacementIntent>,
    removals: Vec<Location>,
    submissions: u32,
}

impl SimEngine {
    pub fn new(config: Arc<MatchConfig>) -> Self {
        SimEngine {
            config,
            turn_number: 0,
            board: FnvHashMap::default(),
            resources: [[0.0; 2]; 2],
            intents: Vec::new(),
            removals: Vec::new(),
            submissions: 0,
        }
    }

    pub fn set_turn(&mut self, turn: u32) {
        self.turn_number = turn;
    }

    pub fn set_resource(&mut self, pool: ResourcePool, side: Side, amount: f32) {
        self.resources[side.index()][pool_index(pool)] = amount;
    }

    /// Drop a unit straight onto the board at full health, bypassing cost
    /// and deploy rules. Test setup only.
    pub fn put_unit(&mut self, side: Side, kind: UnitKind, loc: Location) {
        let health = self.config.spec(kind).start_health;
        self.put_unit_with_health(side, kind, loc, health);
    }

    pub fn put_unit_with_health(&mut self, side: Side, kind: UnitKind, loc: Location, health: f32) {
        self.board
            .entry(loc)
            .or_default()
            .push(PlacedUnit::new(kind, side, health));
    }

    /// Successful placements committed so far this turn, in order.
    pub fn intents(&self) -> &[PlacementIntent] {
        &self.intents
    }

    /// Cells whose structure was removed this turn, in order.
    pub fn removals(&self) -> &[Location] {
        &self.removals
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    fn is_blocked(&self, loc: Location) -> bool {
        self.board
            .get(&loc)
            .map(|units| units.iter().any(|unit| unit.kind.is_structure()))
            .unwrap_or(false)
    }

    /// The deploy edge a coordinate sits on, if any.
    fn edge_of(&self, loc: Location) -> Option<BoardEdge> {
        [
            BoardEdge::BottomLeft,
            BoardEdge::BottomRight,
            BoardEdge::TopLeft,
            BoardEdge::TopRight,
        ]
        .into_iter()
        .find(|edge| edge.contains(loc))
    }
}

impl TurnHandle for SimEngine {
    fn turn_number(&self) -> u32 {
        self.turn_number
    }

    fn resource(&self, pool: ResourcePool, side: Side) -> f32 {
        self.resources[side.index()][pool_index(pool)]
    }

    fn occupants(&self, loc: Location) -> &[PlacedUnit] {
        self.board.get(&loc).map(Vec::as_slice).unwrap_or(&[])
    }

    fn attempt_place(&mut self, kind: UnitKind, loc: Location, count: u32) -> u32 {
        if count == 0 || !loc.in_bounds() || !loc.on_friendly_half() || self.is_blocked(loc) {
            return 0;
        }

        let cost = self.config.cost(kind);
        let pool = pool_index(pool_for(kind));
        let available = self.resources[Side::Friendly.index()][pool];
        let health = self.config.spec(kind).start_health;

        let placed = if kind.is_structure() {
            // One structure per cell; repeat counts only apply to mobiles.
            if available < cost {
                return 0;
            }
            1
        } else {
            // Mobiles deploy on an owned edge and may stack.
            if self.edge_of(loc).is_none() {
                return 0;
            }
            let affordable = if cost > 0.0 {
                (available / cost) as u32
            } else {
                count
            };
            count.min(affordable)
        };

        if placed == 0 {
            return 0;
        }
        self.resources[Side::Friendly.index()][pool] -= placed as f32 * cost;
        for _ in 0..placed {
            self.board
                .entry(loc)
                .or_default()
                .push(PlacedUnit::new(kind, Side::Friendly, health));
        }
        self.intents.push(PlacementIntent {
            kind,
            location: loc,
            count: placed,
        });
        placed
    }

    fn attempt_remove(&mut self, loc: Location) -> bool {
        if !loc.on_friendly_half() {
            return false;
        }
        let Some(units) = self.board.get_mut(&loc) else {
            return false;
        };
        let Some(index) = units
            .iter()
            .position(|unit| unit.owner == Side::Friendly && unit.kind.is_structure())
        else {
            return false;
        };

        let removed = units.remove(index);
        if units.is_empty() {
            self.board.remove(&loc);
        }
        let refund = self.config.cost(removed.kind) * REMOVAL_REFUND;
        self.resources[Side::Friendly.index()][pool_index(ResourcePool::Structure)] += refund;
        self.removals.push(loc);
        true
    }

    fn path_to_far_edge(&self, from: Location) -> Vec<Location> {
        if !from.in_bounds() || self.is_blocked(from) {
            return Vec::new();
        }
        let Some(edge) = self.edge_of(from) else {
            return Vec::new();
        };
        let target = edge.opposite();

        bfs(
            &from,
            |&loc| {
                let (x, y) = (loc.x() as i16, loc.y() as i16);
                [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                    .into_iter()
                    .filter(|&(nx, ny)| nx >= 0 && ny >= 0)
                    .map(|(nx, ny)| Location::new(nx as u8, ny as u8))
                    .filter(|&next| next.in_bounds() && !self.is_blocked(next))
                    .collect::<Vec<_>>()
            },
            |&loc| target.contains(loc),
        )
        .unwrap_or_default()
    }

    fn attackers_of(&self, loc: Location, target: Side) -> Vec<PlacedUnit> {
        self.board
            .iter()
            .flat_map(|(&cell, units)| units.iter().map(move |&unit| (cell, unit)))
            .filter(|&(cell, unit)| {
                unit.owner != target
                    && unit.kind == UnitKind::Turret
                    && cell.distance_to(loc) <= self.config.spec(UnitKind::Turret).attack_range
            })
            .map(|(_, unit)| unit)
            .collect()
    }

    fn submit(&mut self) {
        self.submissions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_sim() -> SimEngine {
        let mut sim = SimEngine::new(Arc::new(sample_config()));
        sim.set_resource(ResourcePool::Structure, Side::Friendly, 10.0);
        sim.set_resource(ResourcePool::Action, Side::Friendly, 10.0);
        sim
    }

    #[test]
    fn structure_placement_is_occupancy_and_cost_checked() {
        let mut sim = rich_sim();
        let loc = Location::new(13, 9);

        assert_eq!(sim.attempt_place(UnitKind::Turret, loc, 1), 1);
        // Cell now blocked.
        assert_eq!(sim.attempt_place(UnitKind::Wall, loc, 1), 0);
        // 10 - 3 leaves 7: two more turrets drain the pool, a third fails.
        assert_eq!(sim.attempt_place(UnitKind::Turret, Location::new(12, 9), 1), 1);
        assert_eq!(sim.attempt_place(UnitKind::Turret, Location::new(14, 9), 1), 1);
        assert_eq!(sim.attempt_place(UnitKind::Turret, Location::new(13, 10), 1), 0);
    }

    #[test]
    fn mobiles_stack_on_edges_and_cap_at_affordability() {
        let mut sim = rich_sim();
        let edge_cell = Location::new(5, 8);
        let interior = Location::new(13, 9);

        assert_eq!(sim.attempt_place(UnitKind::Light, interior, 1), 0);
        assert_eq!(
            sim.attempt_place(UnitKind::Light, edge_cell, crate::engine::PLACE_ALL),
            10
        );
        assert_eq!(sim.occupants(edge_cell).len(), 10);
    }

    #[test]
    fn removal_refunds_into_the_structure_pool() {
        let mut sim = rich_sim();
        let loc = Location::new(13, 9);
        sim.attempt_place(UnitKind::Turret, loc, 1);
        let before = sim.resource(ResourcePool::Structure, Side::Friendly);

        assert!(sim.attempt_remove(loc));
        assert!(!sim.attempt_remove(loc));
        let after = sim.resource(ResourcePool::Structure, Side::Friendly);
        assert!((after - before - 0.75 * 3.0).abs() < 1e-6);
    }

    #[test]
    fn open_board_paths_reach_the_opposite_edge() {
        let sim = rich_sim();
        let start = Location::new(5, 8);
        let path = sim.path_to_far_edge(start);

        assert_eq!(path.first(), Some(&start));
        assert!(BoardEdge::TopRight.contains(*path.last().unwrap()));
    }

    #[test]
    fn walled_in_start_is_unreachable() {
        let mut sim = rich_sim();
        let start = Location::new(13, 0);
        // Seal the spawn cell's only neighbors.
        sim.put_unit(Side::Friendly, UnitKind::Wall, Location::new(12, 1));
        sim.put_unit(Side::Friendly, UnitKind::Wall, Location::new(13, 1));
        sim.put_unit(Side::Friendly, UnitKind::Wall, Location::new(14, 1));

        assert!(sim.path_to_far_edge(start).is_empty());
    }

    #[test]
    fn turret_coverage_respects_range_and_side() {
        let mut sim = rich_sim();
        let probe = Location::new(13, 12);
        sim.put_unit(Side::Enemy, UnitKind::Turret, Location::new(13, 14));
        sim.put_unit(Side::Enemy, UnitKind::Turret, Location::new(13, 20));
        sim.put_unit(Side::Friendly, UnitKind::Turret, Location::new(13, 11));
        sim.put_unit(Side::Enemy, UnitKind::Wall, Location::new(12, 14));

        let attackers = sim.attackers_of(probe, Side::Friendly);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].kind, UnitKind::Turret);
        assert_eq!(attackers[0].owner, Side::Enemy);
    }
}
