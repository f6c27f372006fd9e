//! Action-frame telemetry decoding.
//!
//! After a turn resolves, the engine streams action frames whose `events`
//! section reports what happened to the previous turn's moves. The only
//! category this core consumes is `breach`: a mobile unit reaching a back
//! edge. Frames are telemetry, not commands -- a malformed entry is skipped
//! with a warning and must never abort the turn flow.
//!
//! Wire shape of one breach entry (positional):
//! `[[x, y], damage, unit_kind_code, unit_id, owner_flag]`
//! where the owner flag is 1 for the agent's own units and 2 for the
//! opponent's. Unit kind codes index the match config's unit table.

use crate::location::Location;
use crate::units::MobileKind;
use log::*;
use serde::Deserialize;
use serde_json::Value;

/// Owner flag values used by the frame feed. These differ from the
/// player-index convention used everywhere else in the engine API.
const OWNER_SELF: i64 = 1;
const OWNER_OPPONENT: i64 = 2;

#[derive(Deserialize)]
struct RawFrame {
    #[serde(default)]
    events: RawEvents,
    #[serde(rename = "turnInfo", default)]
    turn_info: Vec<f64>,
}

#[derive(Deserialize, Default)]
struct RawEvents {
    #[serde(default)]
    breach: Vec<Value>,
}

/// One decoded opponent breach.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreachRecord {
    pub location: Location,
    pub attacker: MobileKind,
}

/// Decode the opponent breaches out of one raw action frame, together with
/// the turn number the frame reports on (zero if absent).
///
/// Entries missing a field, carrying an unknown kind code, or describing the
/// agent's own breaches are dropped; well-formed entries around them are
/// still returned. A frame that is not JSON at all yields no records.
pub fn decode_breaches(raw: &str) -> (u32, Vec<BreachRecord>) {
    let frame: RawFrame = match serde_json::from_str(raw) {
        Ok(frame) => frame,
        Err(err) => {
            warn!("discarding unparseable action frame: {}", err);
            return (0, Vec::new());
        }
    };

    let turn = frame.turn_info.get(1).map(|t| *t as u32).unwrap_or(0);

    let mut records = Vec::new();
    for entry in &frame.events.breach {
        match decode_entry(entry) {
            Some(Decoded::Opponent(record)) => records.push(record),
            Some(Decoded::OwnUnit) => {}
            None => warn!("skipping malformed breach entry: {}", entry),
        }
    }
    (turn, records)
}

enum Decoded {
    Opponent(BreachRecord),
    OwnUnit,
}

fn decode_entry(entry: &Value) -> Option<Decoded> {
    let location = decode_location(entry.get(0)?)?;
    let code = entry.get(2)?.as_i64()?;
    let owner = entry.get(4)?.as_i64()?;

    match owner {
        OWNER_SELF => Some(Decoded::OwnUnit),
        OWNER_OPPONENT => {
            let attacker = decode_mobile_code(code)?;
            Some(Decoded::Opponent(BreachRecord { location, attacker }))
        }
        _ => None,
    }
}

fn decode_location(value: &Value) -> Option<Location> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_u64()?;
    let y = pair.get(1)?.as_u64()?;
    Some(Location::new(u8::try_from(x).ok()?, u8::try_from(y).ok()?))
}

/// Explicit decode step from the wire's numeric kind code to the tagged
/// enumeration. Codes follow the unit table order; only mobile kinds can
/// breach. Unknown codes are a decode failure, handled by the caller as
/// malformed telemetry.
fn decode_mobile_code(code: i64) -> Option<MobileKind> {
    match code {
        3 => Some(MobileKind::Light),
        4 => Some(MobileKind::Heavy),
        5 => Some(MobileKind::Disruptor),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_opponent_breaches_only() {
        let raw = r#"{
            "turnInfo": [1, 7, 30],
            "events": {
                "breach": [
                    [[1, 12], 10.0, 3, "u1", 2],
                    [[24, 10], 10.0, 4, "u2", 1]
                ]
            }
        }"#;
        let (turn, records) = decode_breaches(raw);
        assert_eq!(turn, 7);
        assert_eq!(
            records,
            vec![BreachRecord {
                location: Location::new(1, 12),
                attacker: MobileKind::Light,
            }]
        );
    }

    #[test]
    fn malformed_entry_does_not_poison_the_frame() {
        let raw = r#"{
            "events": {
                "breach": [
                    [[1, 12], 10.0, 3],
                    [[2, 11], 10.0, 99, "u3", 2],
                    "not-an-entry",
                    [[15, 1], 10.0, 5, "u4", 2]
                ]
            }
        }"#;
        let (_, records) = decode_breaches(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attacker, MobileKind::Disruptor);
        assert_eq!(records[0].location, Location::new(15, 1));
    }

    #[test]
    fn garbage_frame_yields_nothing() {
        let (turn, records) = decode_breaches("not json at all");
        assert_eq!(turn, 0);
        assert!(records.is_empty());
    }

    #[test]
    fn frame_without_events_yields_nothing() {
        let (_, records) = decode_breaches("{}");
        assert!(records.is_empty());
    }
}
