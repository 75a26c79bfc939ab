use serde::Serialize;

use crate::advice::{BetAdvice, StrategyAdvice};
use crate::events::PipelineEvent;

/// Summary of one replay session. A richer schema (win/loss/net/pushes,
/// penetration depth) is anticipated upstream but not produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayExport {
    pub events: usize,
    pub advice_count: usize,
    pub bet_count: usize,
}

pub fn summarize(
    events: &[PipelineEvent],
    advice: &[StrategyAdvice],
    bets: &[BetAdvice],
) -> ReplayExport {
    ReplayExport {
        events: events.len(),
        advice_count: advice.len(),
        bet_count: bets.len(),
    }
}
