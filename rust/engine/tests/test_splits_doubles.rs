use serde_json::{json, Map, Value};

use tablesight_engine::cards::Rank;
use tablesight_engine::events::{
    CardObservation, CommandEvent, CommandKind, ObservationEvent, PipelineEvent,
};
use tablesight_engine::tracker::RoundStateTracker;

fn obs(t: f64, zone: &str, rank: &str) -> PipelineEvent {
    PipelineEvent::Observation(ObservationEvent {
        timestamp: t,
        observation: CardObservation {
            zone_id: zone.to_string(),
            rank: Rank::from_symbol(rank),
            ..Default::default()
        },
    })
}

fn cmd(t: f64, name: &str, payload: Value) -> PipelineEvent {
    let map = match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    PipelineEvent::Command(CommandEvent::new(t, CommandKind::from_wire(name), map))
}

fn as_command(event: &PipelineEvent) -> &CommandEvent {
    match event {
        PipelineEvent::Command(cmd) => cmd,
        other => panic!("expected command event, got {:?}", other),
    }
}

#[test]
fn splitting_an_underdealt_hand_is_a_silent_noop() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![obs(0.0, "seat_1", "8")]);
    let output = tracker.ingest(vec![cmd(1.0, "split", json!({"seatId": "seat_1"}))]);
    // No derived event and the hand is untouched.
    assert_eq!(output.len(), 1);
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.seats[0].hands.len(), 1);
    assert_eq!(snapshot.seats[0].hands[0].cards, vec![Rank::Eight]);
}

#[test]
fn splitting_a_two_card_hand_moves_the_second_card() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![obs(0.0, "seat_1", "8"), obs(1.0, "seat_1", "8")]);
    let output = tracker.ingest(vec![cmd(2.0, "split", json!({"seatId": "seat_1"}))]);

    let split = as_command(&output[1]);
    assert_eq!(split.command, CommandKind::HandSplit);
    assert_eq!(split.payload["seatId"], json!("seat_1"));
    assert_eq!(
        split.payload["seats"][0]["hands"],
        json!([
            {"handIndex": 0, "cards": ["8"], "doubled": false},
            {"handIndex": 1, "cards": ["8"], "doubled": false},
        ])
    );
}

#[test]
fn cards_after_a_split_round_robin_onto_the_least_filled_hand() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![
        obs(0.0, "seat_1", "8"),
        obs(1.0, "seat_1", "8"),
        cmd(2.0, "split", json!({"seatId": "seat_1"})),
    ]);

    // Both hands hold one card; the tie breaks to hand 0.
    tracker.ingest(vec![obs(3.0, "seat_1", "3")]);
    let snapshot = tracker.snapshot();
    assert_eq!(
        snapshot.seats[0].hands[0].cards,
        vec![Rank::Eight, Rank::Three]
    );

    // Hand 1 is now the least filled and receives the next card.
    tracker.ingest(vec![obs(4.0, "seat_1", "4")]);
    let snapshot = tracker.snapshot();
    assert_eq!(
        snapshot.seats[0].hands[1].cards,
        vec![Rank::Eight, Rank::Four]
    );
}

#[test]
fn split_without_a_seat_id_is_skipped() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![obs(0.0, "seat_1", "8"), obs(1.0, "seat_1", "8")]);
    let output = tracker.ingest(vec![cmd(2.0, "split", json!({}))]);
    assert_eq!(output.len(), 1);
    assert_eq!(tracker.snapshot().seats[0].hands.len(), 1);
}

#[test]
fn double_marks_the_hand_and_emits_hand_doubled() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![obs(0.0, "seat_2", "5"), obs(1.0, "seat_2", "6")]);
    let output = tracker.ingest(vec![cmd(2.0, "double", json!({"seatId": "seat_2"}))]);

    let doubled = as_command(&output[1]);
    assert_eq!(doubled.command, CommandKind::HandDoubled);
    assert_eq!(doubled.payload["seatId"], json!("seat_2"));
    assert_eq!(doubled.payload["handIndex"], json!(0));
    assert!(tracker.snapshot().seats[0].hands[0].doubled);
}

#[test]
fn double_is_idempotent() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![obs(0.0, "seat_2", "5")]);
    tracker.ingest(vec![cmd(1.0, "double", json!({"seatId": "seat_2"}))]);
    let output = tracker.ingest(vec![cmd(2.0, "double", json!({"seatId": "seat_2"}))]);
    // Re-doubling re-marks and re-emits.
    assert_eq!(output.len(), 2);
    assert!(tracker.snapshot().seats[0].hands[0].doubled);
}

#[test]
fn double_creates_the_targeted_hand_if_missing() {
    let mut tracker = RoundStateTracker::new();
    let output = tracker.ingest(vec![cmd(
        0.0,
        "double",
        json!({"seatId": "seat_4", "handIndex": 1}),
    )]);

    let doubled = as_command(&output[1]);
    assert_eq!(doubled.payload["handIndex"], json!(1));
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.seats[0].hands.len(), 2);
    assert!(!snapshot.seats[0].hands[0].doubled);
    assert!(snapshot.seats[0].hands[1].doubled);
}

#[test]
fn double_without_a_seat_id_is_skipped() {
    let mut tracker = RoundStateTracker::new();
    let output = tracker.ingest(vec![cmd(0.0, "double", json!({"handIndex": 0}))]);
    assert_eq!(output.len(), 1);
    assert!(tracker.snapshot().seats.is_empty());
}

#[test]
fn split_targets_hand_zero_only() {
    let mut tracker = RoundStateTracker::new();
    tracker.ingest(vec![
        obs(0.0, "seat_1", "8"),
        obs(1.0, "seat_1", "8"),
        cmd(2.0, "split", json!({"seatId": "seat_1"})),
        obs(3.0, "seat_1", "2"),
        obs(4.0, "seat_1", "2"),
    ]);
    // Hand 0 holds [8, 2] again and is the only split target.
    let output = tracker.ingest(vec![cmd(5.0, "split", json!({"seatId": "seat_1"}))]);
    let split = as_command(&output[1]);
    assert_eq!(split.command, CommandKind::HandSplit);
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.seats[0].hands.len(), 3);
    assert_eq!(snapshot.seats[0].hands[0].cards, vec![Rank::Eight]);
    assert_eq!(snapshot.seats[0].hands[2].cards, vec![Rank::Two]);
}
