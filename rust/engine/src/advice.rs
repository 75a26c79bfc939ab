use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::events::{CommandKind, PipelineEvent};
use crate::tracker::PLAYER_ZONE_PREFIX;

/// Per-seat-per-hand play recommendation. Strategy and deviation tables
/// are out of scope for this core, so the advisor emits a configurable
/// placeholder action; the record shape is what downstream consumers rely
/// on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAdvice {
    pub seat_id: String,
    pub hand_index: usize,
    pub basic_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_tag: Option<String>,
    pub true_count: f64,
}

/// Per-seat bet recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetAdvice {
    pub seat_id: String,
    pub hands: usize,
    pub unit_size: f64,
    pub total_wager: f64,
}

/// Walks the tracker's output stream and produces one advice record per
/// seat observation, carrying the latest true count seen on the stream.
pub fn advise(events: &[PipelineEvent], default_action: &str) -> Vec<StrategyAdvice> {
    let mut advice = Vec::new();
    let mut true_count = 0.0;
    for event in events {
        match event {
            PipelineEvent::Command(cmd) if cmd.command == CommandKind::CountSnapshot => {
                if let Some(value) = cmd.payload.get("true").and_then(Value::as_f64) {
                    true_count = value;
                }
            }
            PipelineEvent::Observation(obs) => {
                advice.push(StrategyAdvice {
                    seat_id: obs.observation.zone_id.clone(),
                    hand_index: 0,
                    basic_action: default_action.to_string(),
                    deviation_action: None,
                    deviation_tag: None,
                    true_count,
                });
            }
            _ => {}
        }
    }
    advice
}

/// Flat-unit bet sizing: one recommendation per distinct seat observed in
/// the stream. Bankroll-aware sizing is downstream of this core.
pub fn recommend_bets(events: &[PipelineEvent], unit_size: f64) -> Vec<BetAdvice> {
    let mut bets = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for event in events {
        if let PipelineEvent::Observation(obs) = event {
            let seat = obs.observation.zone_id.as_str();
            if seat.starts_with(PLAYER_ZONE_PREFIX) && seen.insert(seat) {
                bets.push(BetAdvice {
                    seat_id: seat.to_string(),
                    hands: 1,
                    unit_size,
                    total_wager: unit_size,
                });
            }
        }
    }
    bets
}
