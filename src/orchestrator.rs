//! Per-turn sequencing and cross-turn ownership.
//!
//! The orchestrator owns the one piece of state that outlives a turn -- the
//! breach memory -- and runs the fixed per-turn pipeline: defense, upkeep,
//! offense, submit. Action frames arrive strictly between turns and only
//! feed the memory; nothing else in the core is stateful across turns.

use crate::breach::BreachMemory;
use crate::config::MatchConfig;
use crate::defense::{DefensePlanner, DefensePolicy};
use crate::engine::TurnHandle;
use crate::layout::{DefenseLayout, OffenseLayout};
use crate::offense::{Doctrine, OffensePlanner, OffensePolicy};
use crate::upkeep::{DefenseMaintainer, UpkeepPolicy};
use log::*;
use std::sync::Arc;

/// Fluent configuration for [`TurnOrchestrator`]. Every knob defaults to
/// the baseline; override what the matchup calls for and `build`.
pub struct OrchestratorBuilder {
    config: Arc<MatchConfig>,
    defense_layout: DefenseLayout,
    offense_layout: OffenseLayout,
    defense_policy: DefensePolicy,
    upkeep_policy: UpkeepPolicy,
    offense_policy: OffensePolicy,
    doctrine: Doctrine,
}

impl OrchestratorBuilder {
    pub fn new(config: MatchConfig) -> Self {
        OrchestratorBuilder {
            config: Arc::new(config),
            defense_layout: DefenseLayout::default(),
            offense_layout: OffenseLayout::default(),
            defense_policy: DefensePolicy::default(),
            upkeep_policy: UpkeepPolicy::default(),
            offense_policy: OffensePolicy::default(),
            doctrine: Doctrine::default(),
        }
    }

    pub fn defense_layout(mut self, layout: DefenseLayout) -> Self {
        self.defense_layout = layout;
        self
    }

    pub fn offense_layout(mut self, layout: OffenseLayout) -> Self {
        self.offense_layout = layout;
        self
    }

    pub fn defense_policy(mut self, policy: DefensePolicy) -> Self {
        self.defense_policy = policy;
        self
    }

    pub fn upkeep_policy(mut self, policy: UpkeepPolicy) -> Self {
        self.upkeep_policy = policy;
        self
    }

    pub fn offense_policy(mut self, policy: OffensePolicy) -> Self {
        self.offense_policy = policy;
        self
    }

    pub fn doctrine(mut self, doctrine: Doctrine) -> Self {
        self.doctrine = doctrine;
        self
    }

    pub fn build(self) -> TurnOrchestrator {
        TurnOrchestrator {
            memory: BreachMemory::new(),
            defense: DefensePlanner::new(self.defense_layout, self.defense_policy),
            upkeep: DefenseMaintainer::new(self.upkeep_policy),
            offense: OffensePlanner::new(
                self.config,
                self.offense_layout,
                self.offense_policy,
                self.doctrine,
            ),
        }
    }
}

/// Sequences one turn of decisions and owns the breach memory across turns.
pub struct TurnOrchestrator {
    memory: BreachMemory,
    defense: DefensePlanner,
    upkeep: DefenseMaintainer,
    offense: OffensePlanner,
}

impl TurnOrchestrator {
    /// Orchestrator with the baseline layouts and policies.
    pub fn new(config: MatchConfig) -> Self {
        OrchestratorBuilder::new(config).build()
    }

    /// Process one received turn state: plan, then submit exactly once.
    pub fn on_turn(&mut self, turn: &mut dyn TurnHandle) {
        debug!("planning turn {}", turn.turn_number());
        self.defense.build(turn, &self.memory);
        self.upkeep.recycle(turn);
        self.offense.launch(turn);
        turn.submit();
    }

    /// Feed one raw action frame from the previous turn's resolution.
    pub fn on_action_frame(&mut self, raw_frame: &str) {
        self.memory.record(raw_frame);
    }

    pub fn breach_memory(&self) -> &BreachMemory {
        &self.memory
    }
}
