//! Mobile-unit deployment, decided once per turn after defense and upkeep.
//!
//! Two independent decisions, both best-effort:
//!
//!   1. A disruptor screen sized by the opponent's action pool -- a flush
//!      pool means a big wave is coming and extra disruption is wanted up
//!      front.
//!   2. A wave launch gated by an affordability bar that rises slowly with
//!      the turn number. The wave shape depends on the doctrine: the
//!      default reads the opponent's frontline density and picks a heavy
//!      breakthrough against a fortified front or a cheap light swarm
//!      against an open one; the siege doctrine walls off a forward row and
//!      floods heavies behind it.

use crate::config::MatchConfig;
use crate::constants::*;
use crate::engine::{TurnHandle, PLACE_ALL};
use crate::layout::OffenseLayout;
use crate::location::{board_cells, Location};
use crate::risk::PathRiskEstimator;
use crate::units::{ResourcePool, Side, UnitKind};
use log::*;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Which wave shape the planner commits to when the bar clears.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Doctrine {
    /// Heavy breakthrough against a dense front, light swarm otherwise.
    #[default]
    SwarmOrBreak,
    /// Wall off a forward row, then flood heavies behind the cover.
    SiegeLine,
}

/// Tunable thresholds for the offense planner.
#[derive(Clone, Copy, Debug)]
pub struct OffensePolicy {
    /// Enemy action levels that trigger a two- or one-disruptor screen.
    pub screen_high_threat: f32,
    pub screen_low_threat: f32,
    /// Base action bar for a wave; rises by turn/10 up to the cap.
    pub wave_base_bar: f32,
    pub wave_bar_cap: f32,
    /// Weighted frontline density above which the heavy wave is chosen.
    pub breaker_density_trigger: f32,
    pub heavy_wave_size: u32,
    pub swarm_probe_size: u32,
}

impl Default for OffensePolicy {
    fn default() -> Self {
        OffensePolicy {
            screen_high_threat: SCREEN_HIGH_THREAT,
            screen_low_threat: SCREEN_LOW_THREAT,
            wave_base_bar: WAVE_BASE_BAR,
            wave_bar_cap: WAVE_BAR_CAP,
            breaker_density_trigger: BREAKER_DENSITY_TRIGGER,
            heavy_wave_size: HEAVY_WAVE_SIZE,
            swarm_probe_size: SWARM_PROBE_SIZE,
        }
    }
}

pub struct OffensePlanner {
    config: Arc<MatchConfig>,
    layout: OffenseLayout,
    policy: OffensePolicy,
    doctrine: Doctrine,
    risk: PathRiskEstimator,
}

impl OffensePlanner {
    pub fn new(
        config: Arc<MatchConfig>,
        layout: OffenseLayout,
        policy: OffensePolicy,
        doctrine: Doctrine,
    ) -> Self {
        let risk = PathRiskEstimator::new(Arc::clone(&config));
        OffensePlanner {
            config,
            layout,
            policy,
            doctrine,
            risk,
        }
    }

    /// Issue this turn's mobile deployments.
    pub fn launch(&self, turn: &mut dyn TurnHandle) {
        self.screen_disruptors(turn);

        let bar = self.policy.wave_base_bar
            + (turn.turn_number() as f32 / 10.0).min(self.policy.wave_bar_cap);
        if turn.resource(ResourcePool::Action, Side::Friendly) > bar {
            match self.doctrine {
                Doctrine::SwarmOrBreak => self.swarm_or_break(turn),
                Doctrine::SiegeLine => self.siege_line(turn),
            }
        }
    }

    /// Put disruptors in front of an opponent sitting on a large action
    /// pool. Both thresholds read the same forward anchor.
    fn screen_disruptors(&self, turn: &mut dyn TurnHandle) {
        let enemy_action = turn.resource(ResourcePool::Action, Side::Enemy);
        let count = if enemy_action > self.policy.screen_high_threat {
            2
        } else if enemy_action > self.policy.screen_low_threat {
            1
        } else {
            return;
        };
        debug!(
            "screening with {} disruptors (enemy action pool {:.1})",
            count, enemy_action
        );
        turn.attempt_place(UnitKind::Disruptor, self.layout.disruptor_anchor, count);
    }

    /// Weighted count of stationary units across the frontline scan cells:
    /// turrets weigh 1.0, anything else stationary 0.5.
    fn front_density(&self, turn: &dyn TurnHandle) -> f32 {
        self.layout
            .threat_scan
            .iter()
            .map(|&loc| match turn.stationary_occupant(loc) {
                Some(unit) if unit.kind == UnitKind::Turret => 1.0,
                Some(_) => 0.5,
                None => 0.0,
            })
            .sum()
    }

    fn swarm_or_break(&self, turn: &mut dyn TurnHandle) {
        let density = self.front_density(turn);
        if density > self.policy.breaker_density_trigger {
            debug!("front density {:.1}: committing heavy wave", density);
            turn.attempt_place(
                UnitKind::Heavy,
                self.layout.breaker_anchor,
                self.policy.heavy_wave_size,
            );
        } else {
            debug!("front density {:.1}: committing light swarm", density);
            turn.attempt_place(
                UnitKind::Light,
                self.layout.swarm_probe,
                self.policy.swarm_probe_size,
            );
            turn.attempt_place(UnitKind::Light, self.layout.swarm_flood, PLACE_ALL);
        }
    }

    /// Wall off the siege row with the cheapest structure, then flood
    /// heavies from the least dangerous deploy cell still open.
    fn siege_line(&self, turn: &mut dyn TurnHandle) {
        let cover = UnitKind::from(self.config.cheapest_structure());
        let (low, high) = self.layout.siege_span;
        for x in (low..=high).rev() {
            turn.attempt_place(cover, Location::new(x, self.layout.siege_row), 1);
        }

        let open = self.risk.filter_deployable(turn, self.layout.siege_deploys);
        if let Some(deploy) = self.risk.least_risk_location(turn, &open) {
            turn.attempt_place(UnitKind::Heavy, deploy, PLACE_ALL);
        }
    }

    /// Count enemy stationary units, optionally narrowed by kind and by a
    /// row band. Used for scouting beyond the fixed frontline scan.
    pub fn count_enemy_stationary(
        &self,
        turn: &dyn TurnHandle,
        kind: Option<UnitKind>,
        rows: Option<RangeInclusive<u8>>,
    ) -> u32 {
        board_cells()
            .filter(|loc| rows.as_ref().map(|band| band.contains(&loc.y())).unwrap_or(true))
            .flat_map(|loc| turn.occupants(loc).to_vec())
            .filter(|unit| unit.owner == Side::Enemy && unit.kind.is_structure())
            .filter(|unit| kind.map(|k| unit.kind == k).unwrap_or(true))
            .count() as u32
    }
}
