//! # tablesight-engine: Blackjack Table-Monitoring Core
//!
//! The state-tracking core of a blackjack table-monitoring assistant.
//! Consumes a chronological stream of card observations and operator
//! commands, maintains authoritative round state (seats, hands, dealer,
//! split/double status) alongside a running/true card count, and emits
//! derived events for downstream strategy, bet-sizing, and persistence
//! consumers. No I/O happens here; the engine is a pure in-memory
//! automaton driven synchronously by its caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Rank and suit symbols as reported by the vision pipeline
//! - [`events`] - Typed pipeline events and the fixture wire codec
//! - [`counting`] - Running/true count arithmetic and count profiles
//! - [`tracker`] - Round state machine and derived-event emission
//! - [`advice`] - Placeholder strategy/bet collaborators over the output stream
//! - [`export`] - Replay export summaries
//! - [`zones`] - Capture-region and seat-zone calibration geometry
//! - [`errors`] - Error types for configuration and zone persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesight_engine::cards::Rank;
//! use tablesight_engine::events::{CardObservation, ObservationEvent, PipelineEvent};
//! use tablesight_engine::tracker::RoundStateTracker;
//!
//! let mut tracker = RoundStateTracker::new();
//! let events = vec![PipelineEvent::Observation(ObservationEvent {
//!     timestamp: 0.0,
//!     observation: CardObservation {
//!         zone_id: "seat_1".to_string(),
//!         rank: Rank::from_symbol("5"),
//!         ..Default::default()
//!     },
//! })];
//!
//! // The observation comes back followed by a `cardAdded` event and a
//! // `countSnapshot` event.
//! let output = tracker.ingest(events);
//! assert_eq!(output.len(), 3);
//! ```
//!
//! ## Counting
//!
//! The counting engine carries shoe-level state across rounds and only
//! moves when a profile assigns weights:
//!
//! ```rust
//! use std::collections::HashMap;
//! use tablesight_engine::cards::Rank;
//! use tablesight_engine::counting::{CountProfile, CountingEngine};
//!
//! let mut engine = CountingEngine::new(6.0);
//! let mut tags = HashMap::new();
//! tags.insert(Rank::Five, 1.0);
//! tags.insert(Rank::Ten, -1.0);
//! engine.configure_profile(CountProfile::new("HiLo", tags, false));
//!
//! engine.observe_card(Rank::Five);
//! let snapshot = engine.observe_card(Rank::Ten);
//! assert_eq!(snapshot.running, 0.0);
//! ```

pub mod advice;
pub mod cards;
pub mod counting;
pub mod errors;
pub mod events;
pub mod export;
pub mod tracker;
pub mod zones;
