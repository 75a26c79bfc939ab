use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::cards::{Rank, Suit};

/// A single card sighting attributed to a table zone.
/// Optional fields mirror what the vision pipeline actually manages to
/// extract from a frame; a missing rank makes the observation unusable
/// for state tracking and it is dropped downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardObservation {
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

/// A card observation with its capture timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEvent {
    pub timestamp: f64,
    pub observation: CardObservation,
}

/// Enumerated command identifiers. Input commands come from the operator,
/// derived commands are synthesized by the tracker. Unknown ids survive in
/// `Other` so forward-compatible commands pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    ConfigureCountProfile,
    ConfigureRules,
    SetDecksRemaining,
    BeginRound,
    Split,
    Double,
    FinalizeRound,
    CardAdded,
    DealerCardAdded,
    CountSnapshot,
    RoundStarted,
    HandSplit,
    HandDoubled,
    RoundSummary,
    Other(String),
}

impl CommandKind {
    pub fn as_str(&self) -> &str {
        match self {
            CommandKind::ConfigureCountProfile => "configureCountProfile",
            CommandKind::ConfigureRules => "configureRules",
            CommandKind::SetDecksRemaining => "setDecksRemaining",
            CommandKind::BeginRound => "beginRound",
            CommandKind::Split => "split",
            CommandKind::Double => "double",
            CommandKind::FinalizeRound => "finalizeRound",
            CommandKind::CardAdded => "cardAdded",
            CommandKind::DealerCardAdded => "dealerCardAdded",
            CommandKind::CountSnapshot => "countSnapshot",
            CommandKind::RoundStarted => "roundStarted",
            CommandKind::HandSplit => "handSplit",
            CommandKind::HandDoubled => "handDoubled",
            CommandKind::RoundSummary => "roundSummary",
            CommandKind::Other(name) => name,
        }
    }

    pub fn from_wire(s: &str) -> CommandKind {
        match s {
            "configureCountProfile" => CommandKind::ConfigureCountProfile,
            "configureRules" => CommandKind::ConfigureRules,
            "setDecksRemaining" => CommandKind::SetDecksRemaining,
            "beginRound" => CommandKind::BeginRound,
            "split" => CommandKind::Split,
            "double" => CommandKind::Double,
            "finalizeRound" => CommandKind::FinalizeRound,
            "cardAdded" => CommandKind::CardAdded,
            "dealerCardAdded" => CommandKind::DealerCardAdded,
            "countSnapshot" => CommandKind::CountSnapshot,
            "roundStarted" => CommandKind::RoundStarted,
            "handSplit" => CommandKind::HandSplit,
            "handDoubled" => CommandKind::HandDoubled,
            "roundSummary" => CommandKind::RoundSummary,
            other => CommandKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator or derived command. The payload stays an open JSON map
/// because derived events merge state snapshots with arbitrary operator
/// fields, and unknown commands must round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEvent {
    pub timestamp: f64,
    pub command: CommandKind,
    pub payload: Map<String, Value>,
}

impl CommandEvent {
    pub fn new(timestamp: f64, command: CommandKind, payload: Map<String, Value>) -> Self {
        Self {
            timestamp,
            command,
            payload,
        }
    }
}

/// Everything that flows through the monitoring pipeline, in capture order.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Observation(ObservationEvent),
    Command(CommandEvent),
}

impl PipelineEvent {
    pub fn timestamp(&self) -> f64 {
        match self {
            PipelineEvent::Observation(e) => e.timestamp,
            PipelineEvent::Command(e) => e.timestamp,
        }
    }

    /// Decodes one fixture entry: `{"t": .., "obs": {..}}` for observations,
    /// `{"t": .., "command": "..", ..payload}` for commands. Entries that are
    /// not objects are rejected; unknown rank/suit symbols inside an
    /// observation degrade to absent fields (vision tolerance policy).
    pub fn from_value(value: &Value) -> Option<PipelineEvent> {
        let entry = value.as_object()?;
        let timestamp = entry.get("t").and_then(Value::as_f64).unwrap_or(0.0);
        if let Some(obs) = entry.get("obs") {
            let obs = obs.as_object()?;
            let observation = CardObservation {
                zone_id: obs
                    .get("zoneId")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                rank: obs
                    .get("rank")
                    .and_then(Value::as_str)
                    .and_then(Rank::from_symbol),
                suit: obs
                    .get("suit")
                    .and_then(Value::as_str)
                    .and_then(Suit::from_symbol),
                confidence: obs.get("confidence").and_then(Value::as_f64),
                bbox: obs.get("bbox").and_then(Value::as_array).map(|points| {
                    points.iter().filter_map(Value::as_f64).collect()
                }),
            };
            return Some(PipelineEvent::Observation(ObservationEvent {
                timestamp,
                observation,
            }));
        }
        let command = entry
            .get("command")
            .and_then(Value::as_str)
            .map(CommandKind::from_wire)
            .unwrap_or_else(|| CommandKind::Other("unknown".to_string()));
        let payload: Map<String, Value> = entry
            .iter()
            .filter(|(key, _)| key.as_str() != "t" && key.as_str() != "command")
            .map(|(key, val)| (key.clone(), val.clone()))
            .collect();
        Some(PipelineEvent::Command(CommandEvent {
            timestamp,
            command,
            payload,
        }))
    }

    /// Encodes the event back into the fixture wire shape.
    pub fn to_value(&self) -> Value {
        match self {
            PipelineEvent::Observation(event) => {
                let mut entry = Map::new();
                entry.insert("t".to_string(), json_number(event.timestamp));
                let obs = serde_json::to_value(&event.observation)
                    .unwrap_or(Value::Object(Map::new()));
                entry.insert("obs".to_string(), obs);
                Value::Object(entry)
            }
            PipelineEvent::Command(event) => {
                let mut entry = Map::new();
                entry.insert("t".to_string(), json_number(event.timestamp));
                entry.insert(
                    "command".to_string(),
                    Value::String(event.command.as_str().to_string()),
                );
                for (key, value) in &event.payload {
                    entry.insert(key.clone(), value.clone());
                }
                Value::Object(entry)
            }
        }
    }
}

fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Wire view of a `countProfile` command payload. Tags stay keyed by raw
/// strings here; unknown rank symbols are discarded when the profile is
/// built, missing ranks default to weight zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountProfilePayload {
    pub name: Option<String>,
    pub tags: HashMap<String, f64>,
    pub round_down_true_count: bool,
}

/// Wire view of a `configureRules` payload. Only the deck count matters to
/// this core; the rest of the rules object belongs to downstream advisors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesPayload {
    pub decks: Option<f64>,
}

/// Wire view of the seat-targeting fields shared by `split` and `double`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeatPayload {
    pub seat_id: Option<String>,
    pub hand_index: Option<usize>,
}
