//! Match configuration, read once at match start.
//!
//! The engine hands over a JSON config whose unit table drives every cost,
//! health, and damage number the planners use. Without a complete table the
//! agent cannot make a single placement decision, so construction fails
//! loudly before the first turn rather than limping along with defaults.
//! The resulting [`MatchConfig`] is immutable and passed into every
//! component at construction; nothing in this crate reads global state.

use crate::units::{StructureKind, UnitKind};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed match config: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unit table has {got} entries, expected at least {expected}")]
    ShortUnitTable { got: usize, expected: usize },
    #[error("unit table entry for {kind:?} is missing field `{field}`")]
    IncompleteUnit { kind: UnitKind, field: &'static str },
}

/// Static properties of one unit kind, as published by the engine.
#[derive(Clone, Debug)]
pub struct UnitSpec {
    pub shorthand: String,
    pub cost: f32,
    pub start_health: f32,
    /// Damage dealt per simulated step to units in range. Zero for
    /// non-attacking kinds.
    pub attack_damage: f32,
    pub attack_range: f32,
}

/// Immutable per-match configuration: the decoded unit catalog.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    units: Vec<UnitSpec>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "unitInformation", default)]
    unit_information: Vec<RawUnit>,
}

#[derive(Deserialize)]
struct RawUnit {
    shorthand: Option<String>,
    cost: Option<f32>,
    #[serde(rename = "startHealth")]
    start_health: Option<f32>,
    #[serde(rename = "attackDamage", default)]
    attack_damage: f32,
    #[serde(rename = "attackRange", default)]
    attack_range: f32,
}

impl MatchConfig {
    /// Decode the engine's JSON config. Fails on syntax errors, on a unit
    /// table shorter than the six known kinds, and on entries missing the
    /// fields the planners rely on.
    pub fn from_json(raw: &str) -> Result<MatchConfig, ConfigError> {
        let parsed: RawConfig = serde_json::from_str(raw)?;
        Self::from_unit_table(parsed.unit_information)
    }

    fn from_unit_table(table: Vec<RawUnit>) -> Result<MatchConfig, ConfigError> {
        if table.len() < UnitKind::ALL.len() {
            return Err(ConfigError::ShortUnitTable {
                got: table.len(),
                expected: UnitKind::ALL.len(),
            });
        }

        let mut units = Vec::with_capacity(UnitKind::ALL.len());
        for kind in UnitKind::ALL {
            let raw = &table[kind.catalog_index()];
            let incomplete = |field| ConfigError::IncompleteUnit { kind, field };
            units.push(UnitSpec {
                shorthand: raw.shorthand.clone().ok_or_else(|| incomplete("shorthand"))?,
                cost: raw.cost.ok_or_else(|| incomplete("cost"))?,
                start_health: raw.start_health.ok_or_else(|| incomplete("startHealth"))?,
                attack_damage: raw.attack_damage,
                attack_range: raw.attack_range,
            });
        }

        Ok(MatchConfig { units })
    }

    pub fn spec(&self, kind: UnitKind) -> &UnitSpec {
        &self.units[kind.catalog_index()]
    }

    pub fn cost(&self, kind: UnitKind) -> f32 {
        self.spec(kind).cost
    }

    /// The structure kind with the lowest placement cost, used when a layout
    /// only needs something cheap to stand in the way.
    pub fn cheapest_structure(&self) -> StructureKind {
        [StructureKind::Wall, StructureKind::Support, StructureKind::Turret]
            .into_iter()
            .min_by(|a, b| {
                self.cost(UnitKind::from(*a))
                    .total_cmp(&self.cost(UnitKind::from(*b)))
            })
            .expect("structure kind list is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(shorthand: &str, cost: f32, health: f32) -> String {
        format!(
            r#"{{"shorthand": "{shorthand}", "cost": {cost}, "startHealth": {health}}}"#
        )
    }

    fn full_table() -> String {
        let rows = [
            entry("FF", 1.0, 60.0),
            entry("EF", 4.0, 30.0),
            r#"{"shorthand": "DF", "cost": 3.0, "startHealth": 75.0,
                "attackDamage": 16.0, "attackRange": 3.5}"#
                .to_string(),
            entry("PI", 1.0, 15.0),
            entry("EI", 3.0, 5.0),
            entry("SI", 1.0, 40.0),
        ];
        format!(r#"{{"unitInformation": [{}]}}"#, rows.join(","))
    }

    #[test]
    fn parses_complete_table() {
        let config = MatchConfig::from_json(&full_table()).unwrap();
        assert_eq!(config.spec(UnitKind::Wall).shorthand, "FF");
        assert_eq!(config.cost(UnitKind::Turret), 3.0);
        assert_eq!(config.spec(UnitKind::Turret).attack_damage, 16.0);
        assert_eq!(config.cheapest_structure(), StructureKind::Wall);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            MatchConfig::from_json("{not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_short_table() {
        let raw = format!(r#"{{"unitInformation": [{}]}}"#, entry("FF", 1.0, 60.0));
        assert!(matches!(
            MatchConfig::from_json(&raw),
            Err(ConfigError::ShortUnitTable { got: 1, .. })
        ));
    }

    #[test]
    fn rejects_entry_missing_cost() {
        let rows = [
            entry("FF", 1.0, 60.0),
            r#"{"shorthand": "EF", "startHealth": 30.0}"#.to_string(),
            entry("DF", 3.0, 75.0),
            entry("PI", 1.0, 15.0),
            entry("EI", 3.0, 5.0),
            entry("SI", 1.0, 40.0),
        ];
        let raw = format!(r#"{{"unitInformation": [{}]}}"#, rows.join(","));
        assert!(matches!(
            MatchConfig::from_json(&raw),
            Err(ConfigError::IncompleteUnit {
                kind: UnitKind::Support,
                field: "cost"
            })
        ));
    }
}
