//! Battle worker that owns the authoritative [`battle_core::BattleState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them against the
//! battle state one at a time, and publishes events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use battle_content::ModuleCatalog;
use battle_core::{
    ActionOutcome, AgentIndex, BattleSnapshot, BattleState, ModuleAction, ModuleId, RecastState,
    TickReport,
};

use crate::api::{Result, RuntimeError};
use crate::events::{ChainEvent, Event, EventBus, RecastEvent, outcome_events, tick_events};

/// Commands that can be sent to the battle worker
pub enum Command {
    /// Use a catalog module for an agent.
    UseModule {
        agent: AgentIndex,
        module: ModuleId,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Run an externally built action.
    Execute {
        action: ModuleAction,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Advance battle time.
    Advance {
        delta: Duration,
        reply: oneshot::Sender<TickReport>,
    },
    CancelRecast {
        agent: AgentIndex,
        reply: oneshot::Sender<Option<RecastState>>,
    },
    CancelAllRecasts {
        reply: oneshot::Sender<()>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    /// Query the current battle state (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Background task that processes battle commands.
///
/// The worker is the only owner of the battle state, so commands from any
/// number of handles are applied strictly in arrival order.
pub struct BattleWorker {
    state: BattleState,
    catalog: ModuleCatalog,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl BattleWorker {
    /// Creates a new battle worker.
    pub fn new(
        state: BattleState,
        catalog: ModuleCatalog,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            agent_slots = state.config().agent_slots,
            modules = catalog.len(),
            "BattleWorker initialized"
        );

        Self {
            state,
            catalog,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("BattleWorker stopped: all handles dropped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::UseModule {
                agent,
                module,
                reply,
            } => {
                let result = self.use_module(agent, module);
                if reply.send(result).is_err() {
                    debug!("UseModule reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.execute(&action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::Advance { delta, reply } => {
                let report = self.advance(delta);
                if reply.send(report).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::CancelRecast { agent, reply } => {
                let cancelled = self.state.cancel_recast(agent);
                if cancelled.is_some() {
                    self.event_bus
                        .publish(Event::Recast(RecastEvent::Cancelled { agent }));
                }
                if reply.send(cancelled).is_err() {
                    debug!("CancelRecast reply channel closed (caller dropped)");
                }
            }
            Command::CancelAllRecasts { reply } => {
                let agents: Vec<_> = self
                    .state
                    .recasts()
                    .recast_states()
                    .into_iter()
                    .map(|state| state.agent)
                    .collect();
                self.state.cancel_all_recasts();
                self.event_bus.publish_all(
                    agents
                        .into_iter()
                        .map(|agent| Event::Recast(RecastEvent::Cancelled { agent })),
                );
                if reply.send(()).is_err() {
                    debug!("CancelAllRecasts reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.state.reset();
                self.event_bus.publish(Event::Chain(ChainEvent::Cleared));
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.state.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn use_module(&mut self, agent: AgentIndex, module: ModuleId) -> Result<ActionOutcome> {
        let action = self
            .catalog
            .get(module)
            .map(|definition| definition.to_action(agent))
            .ok_or(RuntimeError::UnknownModule { module })?;
        self.execute(&action)
    }

    /// Validates and resolves one action, then publishes its events.
    ///
    /// This is the ONLY method that runs the action pipeline, so every
    /// resolved action is reflected on the event bus.
    fn execute(&mut self, action: &ModuleAction) -> Result<ActionOutcome> {
        let outcome = self.state.try_resolve_action(action)?;

        let recast = self.state.recasts().recast_state(action.agent);
        self.event_bus.publish_all(outcome_events(&outcome, recast));

        debug!(
            agent = %outcome.agent,
            module = %outcome.module,
            triggered = outcome.triggered.len(),
            "action resolved"
        );
        Ok(outcome)
    }

    fn advance(&mut self, delta: Duration) -> TickReport {
        let report = self.state.tick(delta);
        self.event_bus.publish_all(tick_events(&report));
        report
    }
}
