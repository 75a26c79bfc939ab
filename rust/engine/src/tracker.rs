use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::cards::Rank;
use crate::counting::{CountProfile, CountSnapshot, CountingEngine};
use crate::events::{
    CommandEvent, CommandKind, CountProfilePayload, ObservationEvent, PipelineEvent, RulesPayload,
    SeatPayload,
};

/// Zone ids carrying this prefix belong to player seats; everything else is
/// attributed to the dealer.
pub const PLAYER_ZONE_PREFIX: &str = "seat_";

/// A single blackjack hand. The card sequence is append-only within a
/// round; the index is assigned at creation and never reused after a split.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandState {
    pub hand_index: usize,
    pub cards: Vec<Rank>,
    pub doubled: bool,
}

impl HandState {
    fn new(hand_index: usize) -> Self {
        Self {
            hand_index,
            cards: Vec::new(),
            doubled: false,
        }
    }
}

/// All hands belonging to one seat. A seat always starts with exactly one
/// empty hand at index 0; splits append further hands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatState {
    pub seat_id: String,
    pub hands: Vec<HandState>,
}

impl SeatState {
    fn new(seat_id: impl Into<String>) -> Self {
        Self {
            seat_id: seat_id.into(),
            hands: vec![HandState::new(0)],
        }
    }

    /// Grows the hand list until `index` exists, then returns it mutably.
    pub fn ensure_hand(&mut self, index: usize) -> &mut HandState {
        while self.hands.len() <= index {
            let next = self.hands.len();
            self.hands.push(HandState::new(next));
        }
        &mut self.hands[index]
    }
}

/// Deep-copy view of the whole round, attached to every derived event so
/// each one is independently replayable without its predecessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round: u64,
    pub dealer: HandState,
    pub seats: Vec<SeatState>,
    pub count: CountSnapshot,
}

/// Consumes the ordered event stream, maintains seat/hand/dealer state,
/// drives the counting engine, and interleaves derived command events
/// immediately after the event that caused them.
#[derive(Debug, Default)]
pub struct RoundStateTracker {
    counting: CountingEngine,
    round_index: u64,
    round_active: bool,
    // BTreeMap keeps snapshot seat order lexicographic by seat id.
    seats: BTreeMap<String, SeatState>,
    dealer: HandState,
}

impl RoundStateTracker {
    pub fn new() -> Self {
        Self {
            counting: CountingEngine::default(),
            round_index: 0,
            round_active: false,
            seats: BTreeMap::new(),
            dealer: HandState::new(0),
        }
    }

    /// Direct access to the counting engine for callers that configure it
    /// outside the event stream. Configuration through here fails fast on
    /// invalid values; configuration through `ingest` never raises.
    pub fn counting_mut(&mut self) -> &mut CountingEngine {
        &mut self.counting
    }

    pub fn counting(&self) -> &CountingEngine {
        &self.counting
    }

    pub fn round_active(&self) -> bool {
        self.round_active
    }

    /// Processes an ordered batch of events. The output contains every
    /// input event, each immediately followed by the derived events it
    /// caused. State persists across calls.
    pub fn ingest<I>(&mut self, events: I) -> Vec<PipelineEvent>
    where
        I: IntoIterator<Item = PipelineEvent>,
    {
        let mut output = Vec::new();
        for event in events {
            let derived = match &event {
                PipelineEvent::Observation(obs) => self.handle_observation(obs),
                PipelineEvent::Command(cmd) => self.handle_command(cmd),
            };
            output.push(event);
            output.extend(derived);
        }
        output
    }

    /// Value snapshot of the current round.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round_index,
            dealer: self.dealer.clone(),
            seats: self.seats.values().cloned().collect(),
            count: self.counting.snapshot(),
        }
    }

    fn handle_observation(&mut self, event: &ObservationEvent) -> Vec<PipelineEvent> {
        if !self.round_active {
            self.begin_round();
        }
        // Partial observations without a rank are tolerated and dropped.
        let rank = match event.observation.rank {
            Some(rank) => rank,
            None => return Vec::new(),
        };
        let zone_id = event.observation.zone_id.as_str();
        let mut derived = Vec::with_capacity(2);

        if zone_id.starts_with(PLAYER_ZONE_PREFIX) {
            let seat = self
                .seats
                .entry(zone_id.to_string())
                .or_insert_with(|| SeatState::new(zone_id));
            let hand = select_hand_for_card(seat);
            hand.cards.push(rank);
            let hand_index = hand.hand_index;
            derived.push(self.round_state_event(
                event.timestamp,
                CommandKind::CardAdded,
                Some(zone_id.to_string()),
                Some(hand_index),
                Some(rank),
            ));
        } else {
            self.dealer.cards.push(rank);
            derived.push(self.round_state_event(
                event.timestamp,
                CommandKind::DealerCardAdded,
                Some("dealer".to_string()),
                Some(0),
                Some(rank),
            ));
        }

        let snapshot = self.counting.observe_card(rank);
        derived.push(count_snapshot_event(event.timestamp, snapshot));
        derived
    }

    fn handle_command(&mut self, event: &CommandEvent) -> Vec<PipelineEvent> {
        let payload = &event.payload;
        let mut derived = Vec::new();
        match &event.command {
            CommandKind::ConfigureCountProfile => {
                if let Some(profile) = payload.get("countProfile") {
                    if let Ok(parsed) =
                        serde_json::from_value::<CountProfilePayload>(profile.clone())
                    {
                        self.counting
                            .configure_profile(CountProfile::from_payload(&parsed));
                    }
                }
            }
            CommandKind::ConfigureRules => {
                let rules = payload
                    .get("rules")
                    .cloned()
                    .and_then(|value| serde_json::from_value::<RulesPayload>(value).ok())
                    .unwrap_or_default();
                if let Some(decks) = rules.decks {
                    // Invalid deck counts are dropped; ingest never raises.
                    let _ = self.counting.configure_decks(decks);
                }
            }
            CommandKind::SetDecksRemaining => {
                let value = payload.get("value").and_then(Value::as_f64);
                let _ = self.counting.set_decks_remaining(value);
                derived.push(count_snapshot_event(
                    event.timestamp,
                    self.counting.snapshot(),
                ));
            }
            CommandKind::BeginRound => {
                // Unconditional: an operator override may discard an
                // in-progress round.
                self.begin_round();
                derived.push(self.round_state_event(
                    event.timestamp,
                    CommandKind::RoundStarted,
                    None,
                    None,
                    None,
                ));
            }
            CommandKind::Split => {
                let target = seat_payload(payload);
                if let Some(seat_id) = target.seat_id {
                    if self.apply_split(&seat_id) {
                        derived.push(self.round_state_event(
                            event.timestamp,
                            CommandKind::HandSplit,
                            Some(seat_id),
                            None,
                            None,
                        ));
                    }
                }
            }
            CommandKind::Double => {
                let target = seat_payload(payload);
                if let Some(seat_id) = target.seat_id {
                    let hand_index = target.hand_index.unwrap_or(0);
                    let seat = self
                        .seats
                        .entry(seat_id.clone())
                        .or_insert_with(|| SeatState::new(seat_id.clone()));
                    // Idempotent: doubling a doubled hand just re-marks it.
                    seat.ensure_hand(hand_index).doubled = true;
                    derived.push(self.round_state_event(
                        event.timestamp,
                        CommandKind::HandDoubled,
                        Some(seat_id),
                        Some(hand_index),
                        None,
                    ));
                }
            }
            CommandKind::FinalizeRound => {
                let mut summary = payload.clone();
                // Snapshot fields win over any colliding operator fields.
                for (key, value) in self.snapshot_payload() {
                    summary.insert(key, value);
                }
                derived.push(PipelineEvent::Command(CommandEvent::new(
                    event.timestamp,
                    CommandKind::RoundSummary,
                    summary,
                )));
                self.round_active = false;
            }
            // Derived kinds looping back and unknown commands pass through
            // with no effect.
            _ => {}
        }
        derived
    }

    fn begin_round(&mut self) {
        self.round_index += 1;
        self.round_active = true;
        self.seats.clear();
        self.dealer = HandState::new(0);
        self.counting.reset_round();
    }

    fn apply_split(&mut self, seat_id: &str) -> bool {
        let seat = self
            .seats
            .entry(seat_id.to_string())
            .or_insert_with(|| SeatState::new(seat_id));
        // Only hand 0 may be split; re-splitting is out of scope.
        let hand = seat.ensure_hand(0);
        if hand.cards.len() < 2 {
            return false;
        }
        let second = hand.cards[1];
        hand.cards.truncate(1);
        let next_index = seat.hands.len();
        let mut new_hand = HandState::new(next_index);
        new_hand.cards.push(second);
        seat.hands.push(new_hand);
        true
    }

    fn snapshot_payload(&self) -> Map<String, Value> {
        match serde_json::to_value(self.snapshot()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    fn round_state_event(
        &self,
        timestamp: f64,
        command: CommandKind,
        seat_id: Option<String>,
        hand_index: Option<usize>,
        rank: Option<Rank>,
    ) -> PipelineEvent {
        let mut payload = self.snapshot_payload();
        if let Some(seat_id) = seat_id {
            payload.insert("seatId".to_string(), Value::String(seat_id));
        }
        if let Some(hand_index) = hand_index {
            payload.insert("handIndex".to_string(), Value::from(hand_index));
        }
        if let Some(rank) = rank {
            payload.insert("rank".to_string(), Value::String(rank.symbol().to_string()));
        }
        PipelineEvent::Command(CommandEvent::new(timestamp, command, payload))
    }
}

/// Cards round-robin onto the least-filled hand, ties broken by lowest
/// index, modelling multi-hand dealing order.
fn select_hand_for_card(seat: &mut SeatState) -> &mut HandState {
    seat.hands
        .iter_mut()
        .min_by_key(|hand| (hand.cards.len(), hand.hand_index))
        .expect("seat always has at least one hand")
}

fn count_snapshot_event(timestamp: f64, snapshot: CountSnapshot) -> PipelineEvent {
    let payload = match serde_json::to_value(snapshot) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    PipelineEvent::Command(CommandEvent::new(
        timestamp,
        CommandKind::CountSnapshot,
        payload,
    ))
}

fn seat_payload(payload: &Map<String, Value>) -> SeatPayload {
    serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
}
