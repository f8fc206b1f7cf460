//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! acting, advancing time, and streaming events from specific topics.
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{
    ActionOutcome, AgentIndex, BattleSnapshot, ModuleAction, ModuleId, RecastState, TickReport,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Have `agent` use a module from the catalog.
    ///
    /// Fails if the module is unknown, the agent is not a configured slot, or
    /// the agent is still recasting.
    pub async fn use_module(&self, agent: AgentIndex, module: ModuleId) -> Result<ActionOutcome> {
        self.request(|reply| Command::UseModule {
            agent,
            module,
            reply,
        })
        .await?
    }

    /// Run an externally built action through the pipeline.
    pub async fn execute(&self, action: ModuleAction) -> Result<ActionOutcome> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Advance battle time by `delta`; expires chain effects of agents whose
    /// recast completed.
    pub async fn advance(&self, delta: Duration) -> Result<TickReport> {
        self.request(|reply| Command::Advance { delta, reply }).await
    }

    /// Cancel the recast of `agent`. Its pending chain effect is kept.
    pub async fn cancel_recast(&self, agent: AgentIndex) -> Result<Option<RecastState>> {
        self.request(|reply| Command::CancelRecast { agent, reply })
            .await
    }

    /// Cancel every recast. Pending chain effects are kept.
    pub async fn cancel_all_recasts(&self) -> Result<()> {
        self.request(|reply| Command::CancelAllRecasts { reply }).await
    }

    /// Clear all recasts and pending chain effects.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_snapshot(&self) -> Result<BattleSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Recast` - Recast started, completed and cancelled
    /// - `Topic::Chain` - Chain effects registered, triggered, expired and cleared
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
