//! Unit taxonomy: the two capability classes (stationary structures and
//! path-traversing mobiles), their subtypes, and the small copy types that
//! describe board occupants and resource pools.

use crate::location::Location;
use bitflags::*;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability flags for a unit kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UnitTraits: u8 {
        const NONE = 0;
        /// Occupies its cell and blocks mobile movement.
        const STATIONARY = 1;
        /// Deals damage to enemy mobiles in range each simulated step.
        const ATTACKS = 2;
        /// Boosts a property of nearby friendly mobiles.
        const BOOSTS = 4;
        /// Travels a computed path toward the opposite edge.
        const MOBILE = 8;
    }
}

/// Stationary defender subtypes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum StructureKind {
    Wall,
    Support,
    Turret,
}

/// Path-traversing subtypes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum MobileKind {
    Light,
    Heavy,
    Disruptor,
}

impl MobileKind {
    pub const ALL: [MobileKind; 3] = [MobileKind::Light, MobileKind::Heavy, MobileKind::Disruptor];

    /// Stable index for per-kind tally arrays.
    pub fn index(self) -> usize {
        match self {
            MobileKind::Light => 0,
            MobileKind::Heavy => 1,
            MobileKind::Disruptor => 2,
        }
    }
}

/// Every placeable unit kind. Ordering matches the engine's unit table, so
/// `catalog_index` doubles as the wire encoding of the kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitKind {
    Wall,
    Support,
    Turret,
    Light,
    Heavy,
    Disruptor,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Light,
        UnitKind::Heavy,
        UnitKind::Disruptor,
    ];

    /// Position of this kind in the engine's unit table.
    pub fn catalog_index(self) -> usize {
        match self {
            UnitKind::Wall => 0,
            UnitKind::Support => 1,
            UnitKind::Turret => 2,
            UnitKind::Light => 3,
            UnitKind::Heavy => 4,
            UnitKind::Disruptor => 5,
        }
    }

    pub fn traits(self) -> UnitTraits {
        match self {
            UnitKind::Wall => UnitTraits::STATIONARY,
            UnitKind::Support => UnitTraits::STATIONARY | UnitTraits::BOOSTS,
            UnitKind::Turret => UnitTraits::STATIONARY | UnitTraits::ATTACKS,
            UnitKind::Light | UnitKind::Heavy => UnitTraits::MOBILE | UnitTraits::ATTACKS,
            UnitKind::Disruptor => UnitTraits::MOBILE,
        }
    }

    pub fn is_structure(self) -> bool {
        self.traits().contains(UnitTraits::STATIONARY)
    }

    pub fn is_mobile(self) -> bool {
        self.traits().contains(UnitTraits::MOBILE)
    }

    pub fn as_structure(self) -> Option<StructureKind> {
        match self {
            UnitKind::Wall => Some(StructureKind::Wall),
            UnitKind::Support => Some(StructureKind::Support),
            UnitKind::Turret => Some(StructureKind::Turret),
            _ => None,
        }
    }

    pub fn as_mobile(self) -> Option<MobileKind> {
        match self {
            UnitKind::Light => Some(MobileKind::Light),
            UnitKind::Heavy => Some(MobileKind::Heavy),
            UnitKind::Disruptor => Some(MobileKind::Disruptor),
            _ => None,
        }
    }
}

impl From<StructureKind> for UnitKind {
    fn from(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Wall => UnitKind::Wall,
            StructureKind::Support => UnitKind::Support,
            StructureKind::Turret => UnitKind::Turret,
        }
    }
}

impl From<MobileKind> for UnitKind {
    fn from(kind: MobileKind) -> Self {
        match kind {
            MobileKind::Light => UnitKind::Light,
            MobileKind::Heavy => UnitKind::Heavy,
            MobileKind::Disruptor => UnitKind::Disruptor,
        }
    }
}

/// The two players, from the agent's point of view.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Friendly => 0,
            Side::Enemy => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }
}

/// The two independently regenerating currencies.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResourcePool {
    /// Spent on placing structures.
    Structure,
    /// Spent on deploying mobile units.
    Action,
}

/// A unit currently on the board, as reported by occupancy queries.
#[derive(Copy, Clone, Debug)]
pub struct PlacedUnit {
    pub kind: UnitKind,
    pub owner: Side,
    pub health: f32,
}

impl PlacedUnit {
    pub fn new(kind: UnitKind, owner: Side, health: f32) -> Self {
        PlacedUnit {
            kind,
            owner,
            health,
        }
    }
}

/// One placement request handed to the engine: kind, coordinate, repeat count.
/// Consumed immediately by the placement primitive, never persisted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementIntent {
    pub kind: UnitKind,
    pub location: Location,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traits_partition_kinds() {
        for kind in UnitKind::ALL {
            assert_ne!(kind.is_structure(), kind.is_mobile());
            assert_eq!(kind.is_structure(), kind.as_structure().is_some());
            assert_eq!(kind.is_mobile(), kind.as_mobile().is_some());
        }
        assert!(UnitKind::Turret.traits().contains(UnitTraits::ATTACKS));
        assert!(UnitKind::Support.traits().contains(UnitTraits::BOOSTS));
        assert!(!UnitKind::Wall.traits().contains(UnitTraits::ATTACKS));
    }

    #[test]
    fn catalog_indices_are_stable() {
        for (i, kind) in UnitKind::ALL.iter().enumerate() {
            assert_eq!(kind.catalog_index(), i);
        }
    }
}
