//! The consumed engine contract.
//!
//! Everything the decision core needs from the game engine -- occupancy,
//! resource levels, pathfinding, and the best-effort placement primitives --
//! is expressed as the [`TurnHandle`] trait. The core never talks to a live
//! wire protocol; an adapter over the real engine implements this trait in
//! the process-boundary crate, and [`crate::sim`] implements it natively for
//! offline testing.
//!
//! Placement attempts are best-effort and authoritative: the engine performs
//! the affordability and occupancy checks atomically, and a rejected attempt
//! is a silent no-op, not an error. The core never does its own resource
//! bookkeeping beyond reading current levels.

use crate::location::Location;
use crate::units::{PlacedUnit, ResourcePool, Side, UnitKind};

/// Repeat-count sentinel meaning "place until the resource pool is
/// exhausted". The placement primitive caps the request by affordability,
/// so the request is bounded even though the count is not.
pub const PLACE_ALL: u32 = u32::MAX;

/// Read and mutate access to the current turn's game state.
pub trait TurnHandle {
    fn turn_number(&self) -> u32;

    /// Current level of a resource pool. Non-negative; regeneration is the
    /// engine's business.
    fn resource(&self, pool: ResourcePool, side: Side) -> f32;

    /// Ordered occupant list for a cell. Empty when unoccupied or out of
    /// bounds.
    fn occupants(&self, loc: Location) -> &[PlacedUnit];

    /// Try to place `count` units of `kind` at `loc`. Returns the number
    /// actually placed after the engine's affordability and occupancy
    /// checks. Accepts [`PLACE_ALL`].
    fn attempt_place(&mut self, kind: UnitKind, loc: Location, count: u32) -> u32;

    /// Try to remove the structure at `loc` for a partial refund. Returns
    /// whether a removal was registered.
    fn attempt_remove(&mut self, loc: Location) -> bool;

    /// The ordered path a mobile unit deployed at `from` would travel to the
    /// far edge. Empty when the far edge is unreachable.
    fn path_to_far_edge(&self, from: Location) -> Vec<Location>;

    /// Enemy-of-`target` structures able to attack a unit of `target`'s side
    /// standing at `loc`.
    fn attackers_of(&self, loc: Location, target: Side) -> Vec<PlacedUnit>;

    /// Commit the turn's accumulated intents. Called exactly once per turn.
    fn submit(&mut self);

    /// First stationary occupant of a cell, if any.
    fn stationary_occupant(&self, loc: Location) -> Option<PlacedUnit> {
        self.occupants(loc)
            .iter()
            .copied()
            .find(|unit| unit.kind.is_structure())
    }
}

/// Attempt one placement of `kind` at each coordinate in order. Returns how
/// many succeeded. Rejected cells are skipped, never retried this turn.
pub fn place_each(turn: &mut dyn TurnHandle, kind: UnitKind, locations: &[Location]) -> u32 {
    locations
        .iter()
        .map(|&loc| turn.attempt_place(kind, loc, 1))
        .sum()
}
