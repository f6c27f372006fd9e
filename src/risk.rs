//! Path-risk scoring for mobile deploy locations.
//!
//! A candidate's risk is the damage a mobile unit would soak traversing the
//! engine-computed path from that cell to the far edge: for every step, the
//! number of enemy turrets covering it times the turret's per-step damage.
//! Evaluation is bounded by the path length (itself bounded by board size);
//! nothing here searches.

use crate::config::MatchConfig;
use crate::engine::TurnHandle;
use crate::location::Location;
use crate::units::{Side, UnitKind};
use itertools::Itertools;
use std::sync::Arc;

/// Finite stand-in risk for a candidate with no path to the far edge.
/// High enough that any reachable candidate wins, but still comparable --
/// an all-unreachable candidate set degrades to first-seen order instead
/// of failing.
pub const UNREACHABLE_RISK: f32 = 1.0e6;

pub struct PathRiskEstimator {
    config: Arc<MatchConfig>,
}

impl PathRiskEstimator {
    pub fn new(config: Arc<MatchConfig>) -> Self {
        PathRiskEstimator { config }
    }

    /// Estimated total damage a mobile unit deployed at `from` would take on
    /// its way to the far edge.
    pub fn path_risk(&self, turn: &dyn TurnHandle, from: Location) -> f32 {
        let path = turn.path_to_far_edge(from);
        if path.is_empty() {
            return UNREACHABLE_RISK;
        }

        let per_turret = self.config.spec(UnitKind::Turret).attack_damage;
        path.iter()
            .map(|&step| {
                let turrets = turn
                    .attackers_of(step, Side::Friendly)
                    .iter()
                    .filter(|unit| unit.kind == UnitKind::Turret)
                    .count();
                turrets as f32 * per_turret
            })
            .sum()
    }

    /// The candidate with the lowest path risk. Ties resolve to the earliest
    /// candidate in input order. `None` only for an empty candidate list.
    pub fn least_risk_location(
        &self,
        turn: &dyn TurnHandle,
        candidates: &[Location],
    ) -> Option<Location> {
        let index = candidates
            .iter()
            .map(|&loc| self.path_risk(turn, loc))
            .position_min_by(|a, b| a.total_cmp(b))?;
        Some(candidates[index])
    }

    /// Drop candidates whose cell is blocked by a stationary unit; blocked
    /// cells cannot take a mobile deploy.
    pub fn filter_deployable(
        &self,
        turn: &dyn TurnHandle,
        candidates: &[Location],
    ) -> Vec<Location> {
        candidates
            .iter()
            .copied()
            .filter(|&loc| turn.stationary_occupant(loc).is_none())
            .collect()
    }
}
