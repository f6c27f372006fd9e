//! Recycling damaged structures.
//!
//! When the action pool is too thin to mount an attack anyway, a badly
//! damaged structure is worth more as a partial refund than as a half-dead
//! blocker, so the maintainer removes it and lets next turn's planner
//! rebuild fresh. Supports are exempt: their boost cannot be cheaply
//! replaced and should survive at any health.

use crate::constants::*;
use crate::engine::TurnHandle;
use crate::location::friendly_half;
use crate::units::{ResourcePool, Side, UnitKind};
use log::*;

#[derive(Clone, Copy, Debug)]
pub struct UpkeepPolicy {
    /// Structures below this health are recycled.
    pub recycle_below_health: f32,
    /// Recycling only runs while own action resource is below this level.
    pub low_action_threshold: f32,
}

impl Default for UpkeepPolicy {
    fn default() -> Self {
        UpkeepPolicy {
            recycle_below_health: RECYCLE_BELOW_HEALTH,
            low_action_threshold: LOW_ACTION_THRESHOLD,
        }
    }
}

pub struct DefenseMaintainer {
    policy: UpkeepPolicy,
}

impl DefenseMaintainer {
    pub fn new(policy: UpkeepPolicy) -> Self {
        DefenseMaintainer { policy }
    }

    /// Scan the agent's half and remove badly damaged, non-support
    /// structures while the action pool is low. Never looks at the enemy
    /// half.
    pub fn recycle(&self, turn: &mut dyn TurnHandle) {
        if turn.resource(ResourcePool::Action, Side::Friendly) >= self.policy.low_action_threshold {
            return;
        }

        let mut recycled = 0u32;
        for loc in friendly_half() {
            let Some(unit) = turn.stationary_occupant(loc) else {
                continue;
            };
            if unit.kind == UnitKind::Support {
                continue;
            }
            if unit.health < self.policy.recycle_below_health && turn.attempt_remove(loc) {
                recycled += 1;
            }
        }
        if recycled > 0 {
            debug!("recycled {} damaged structures", recycled);
        }
    }
}
