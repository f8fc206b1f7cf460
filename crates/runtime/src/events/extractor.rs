//! Event extraction from pipeline and tick results.
//!
//! Converts the return values of [`battle_core::BattleState`] into the
//! ordered events subscribers see.

use battle_core::{ActionOutcome, PendingChainEffect, RecastState, TickReport};

use super::bus::Event;
use super::types::{ChainEvent, RecastEvent};

/// Events for one resolved action.
///
/// # Event Ordering
///
/// Mirrors the pipeline:
/// 1. `ChainEvent::Triggered` for each fired effect, ascending by owner
/// 2. `RecastEvent::Started` if a recast started
/// 3. `ChainEvent::Registered` if the module left an effect pending
pub fn outcome_events(outcome: &ActionOutcome, recast: Option<&RecastState>) -> Vec<Event> {
    let mut events: Vec<Event> = outcome
        .triggered
        .iter()
        .map(|triggered| {
            Event::Chain(ChainEvent::Triggered {
                by: outcome.agent,
                triggered: triggered.clone(),
            })
        })
        .collect();

    if outcome.recast_started
        && let Some(state) = recast
    {
        events.push(Event::Recast(RecastEvent::Started {
            agent: outcome.agent,
            module: outcome.module,
            total_seconds: state.total_seconds(),
        }));
    }

    if let Some(effect) = outcome.registered {
        events.push(Event::Chain(ChainEvent::Registered(PendingChainEffect {
            agent: outcome.agent,
            effect,
            source_module: outcome.module,
        })));
    }

    events
}

/// Events for one tick: completions first, then expirations.
pub fn tick_events(report: &TickReport) -> Vec<Event> {
    let completed = report
        .completed
        .iter()
        .map(|&agent| Event::Recast(RecastEvent::Completed { agent }));
    let expired = report
        .expired
        .iter()
        .map(|&pending| Event::Chain(ChainEvent::Expired(pending)));

    completed.chain(expired).collect()
}
