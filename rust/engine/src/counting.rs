use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cards::Rank;
use crate::errors::EngineError;
use crate::events::CountProfilePayload;

/// Shoe size assumed until `configure_decks` says otherwise.
pub const DEFAULT_DECKS: f64 = 6.0;

const CARDS_PER_DECK: f64 = 52.0;
// Floor on the decks-remaining estimate so the true count never divides by
// a vanishing denominator.
const MIN_DECKS_REMAINING: f64 = 0.25;

/// A named mapping from rank to tag weight. The default "Neutral" profile
/// carries no weights, so counting is a no-op until a profile is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct CountProfile {
    pub name: String,
    tags: HashMap<Rank, f64>,
    pub round_down_true_count: bool,
}

impl Default for CountProfile {
    fn default() -> Self {
        Self {
            name: "Neutral".to_string(),
            tags: HashMap::new(),
            round_down_true_count: false,
        }
    }
}

impl CountProfile {
    pub fn new(name: impl Into<String>, tags: HashMap<Rank, f64>, round_down: bool) -> Self {
        Self {
            name: name.into(),
            tags,
            round_down_true_count: round_down,
        }
    }

    /// Builds a profile from the wire payload, dropping tag entries whose
    /// key is not a valid rank symbol.
    pub fn from_payload(payload: &CountProfilePayload) -> Self {
        let tags = payload
            .tags
            .iter()
            .filter_map(|(symbol, weight)| Rank::from_symbol(symbol).map(|rank| (rank, *weight)))
            .collect();
        Self {
            name: payload.name.clone().unwrap_or_else(|| "Neutral".to_string()),
            tags,
            round_down_true_count: payload.round_down_true_count,
        }
    }

    /// Tag weight for a rank; ranks without an entry weigh zero.
    pub fn weight(&self, rank: Rank) -> f64 {
        self.tags.get(&rank).copied().unwrap_or(0.0)
    }
}

/// Point-in-time view of the count, emitted with every observed card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountSnapshot {
    pub running: f64,
    #[serde(rename = "true")]
    pub true_count: f64,
    #[serde(rename = "decksRemaining")]
    pub decks_remaining: f64,
}

/// Tracks running and true counts as cards are observed. State is
/// shoe-level: it spans rounds and only configuration calls alter it
/// outside of card observations.
#[derive(Debug)]
pub struct CountingEngine {
    profile: CountProfile,
    running_count: f64,
    cards_seen: u32,
    decks_total: f64,
    manual_decks_remaining: Option<f64>,
}

impl Default for CountingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DECKS)
    }
}

impl CountingEngine {
    pub fn new(decks: f64) -> Self {
        Self {
            profile: CountProfile::default(),
            running_count: 0.0,
            cards_seen: 0,
            decks_total: decks,
            manual_decks_remaining: None,
        }
    }

    /// Replaces the active profile. The accumulated running count is left
    /// alone; swapping profiles mid-shoe is an operator decision.
    pub fn configure_profile(&mut self, profile: CountProfile) {
        self.profile = profile;
    }

    pub fn profile(&self) -> &CountProfile {
        &self.profile
    }

    /// Sets the total shoe size and clears any manual decks-remaining
    /// override.
    pub fn configure_decks(&mut self, decks: f64) -> Result<(), EngineError> {
        if decks <= 0.0 {
            return Err(EngineError::InvalidConfiguration {
                reason: format!("deck count must be positive, got {}", decks),
            });
        }
        self.decks_total = decks;
        self.manual_decks_remaining = None;
        Ok(())
    }

    /// Pins decks-remaining to a sensed value, or clears the pin with
    /// `None` to revert to the computed estimate.
    pub fn set_decks_remaining(&mut self, decks_remaining: Option<f64>) -> Result<(), EngineError> {
        match decks_remaining {
            None => {
                self.manual_decks_remaining = None;
                Ok(())
            }
            Some(value) if value <= 0.0 => Err(EngineError::InvalidConfiguration {
                reason: format!("decks remaining must be positive, got {}", value),
            }),
            Some(value) => {
                self.manual_decks_remaining = Some(value);
                Ok(())
            }
        }
    }

    /// Reserved for per-round bookkeeping. Counting state is shoe-level,
    /// so round boundaries leave it untouched.
    pub fn reset_round(&mut self) {}

    /// Records one observed card and returns the updated snapshot. Rank
    /// validity is the caller's contract; the engine just applies weights.
    pub fn observe_card(&mut self, rank: Rank) -> CountSnapshot {
        self.running_count += self.profile.weight(rank);
        self.cards_seen += 1;
        self.snapshot()
    }

    pub fn cards_seen(&self) -> u32 {
        self.cards_seen
    }

    pub fn snapshot(&self) -> CountSnapshot {
        let decks_remaining = self.compute_decks_remaining();
        CountSnapshot {
            running: self.running_count,
            true_count: self.compute_true_count(decks_remaining),
            decks_remaining,
        }
    }

    fn compute_decks_remaining(&self) -> f64 {
        if let Some(manual) = self.manual_decks_remaining {
            return manual.max(MIN_DECKS_REMAINING);
        }
        let consumed = f64::from(self.cards_seen) / CARDS_PER_DECK;
        (self.decks_total - consumed).max(0.0).max(MIN_DECKS_REMAINING)
    }

    fn compute_true_count(&self, decks_remaining: f64) -> f64 {
        if decks_remaining <= 0.0 {
            return self.running_count;
        }
        let raw = self.running_count / decks_remaining;
        if !self.profile.round_down_true_count {
            return raw;
        }
        // Truncate toward zero: floor for non-negative, ceil for negative.
        if raw >= 0.0 {
            raw.floor()
        } else {
            raw.ceil()
        }
    }
}
