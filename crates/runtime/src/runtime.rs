//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a battle.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use battle_content::ModuleCatalog;
use battle_core::{ActionOutcome, AgentIndex, BattleConfig, BattleState, TickReport};

use crate::api::{ModuleProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{BattleWorker, Command, TickWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Drive the battle clock on this interval. `None` leaves time to
    /// explicit [`RuntimeHandle::advance`] / [`Runtime::step`] calls.
    pub tick_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: None,
        }
    }
}

/// What happened during one [`Runtime::step`].
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub tick: TickReport,
    /// Actions taken by providers, ascending by agent.
    pub outcomes: Vec<ActionOutcome>,
}

/// Main runtime that orchestrates a battle
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Module providers per agent (injected by user)
    providers: BTreeMap<AgentIndex, Box<dyn ModuleProvider>>,

    // Background workers
    battle_worker_handle: JoinHandle<()>,
    tick_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Execute a single battle step
    ///
    /// Advances time by `delta`, then asks the provider of every ready agent,
    /// in ascending agent order, which module to use.
    pub async fn step(&mut self, delta: Duration) -> Result<StepReport> {
        let tick = self.handle.advance(delta).await?;
        let mut outcomes = Vec::new();

        for (&agent, provider) in &self.providers {
            let snapshot = self.handle.query_snapshot().await?;
            if !snapshot.is_agent_ready(agent) {
                continue;
            }
            let Some(module) = provider.choose_module(agent, &snapshot).await? else {
                continue;
            };

            match self.handle.use_module(agent, module).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(RuntimeError::ActionRejected(error)) => {
                    warn!(%agent, %module, %error, "provider chose a rejected action");
                }
                Err(error) => return Err(error),
            }
        }

        Ok(StepReport { tick, outcomes })
    }

    /// Run `steps` battle steps of `delta` each
    pub async fn run_for(&mut self, steps: u32, delta: Duration) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            reports.push(self.step(delta).await?);
        }
        Ok(reports)
    }

    /// Set the module provider of an agent
    pub fn set_provider(&mut self, agent: AgentIndex, provider: impl ModuleProvider + 'static) {
        self.providers.insert(agent, Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Outstanding handles held elsewhere keep the battle worker alive; drop
    /// them before calling this.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(tick_handle) = self.tick_worker_handle {
            tick_handle.abort();
            if let Err(error) = tick_handle.await
                && !error.is_cancelled()
            {
                return Err(RuntimeError::WorkerJoin(error));
            }
        }

        drop(self.handle);

        self.battle_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        debug!("runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<BattleState>,
    catalog: Option<ModuleCatalog>,
    providers: BTreeMap<AgentIndex, Box<dyn ModuleProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            catalog: None,
            providers: BTreeMap::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial battle state (defaults to an empty battle built from
    /// the configured [`BattleConfig`])
    pub fn initial_state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the module catalog used by [`RuntimeHandle::use_module`]
    pub fn catalog(mut self, catalog: ModuleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the module provider of an agent (optional)
    pub fn provider(mut self, agent: AgentIndex, provider: impl ModuleProvider + 'static) -> Self {
        self.providers.insert(agent, Box::new(provider));
        self
    }

    /// Drive the battle clock automatically
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = Some(interval);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let state = self
            .state
            .unwrap_or_else(|| BattleState::new(self.config.battle_config.clone()));
        let catalog = self.catalog.unwrap_or_default();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let battle_worker = BattleWorker::new(state, catalog, command_rx, event_bus);
        let battle_worker_handle = tokio::spawn(async move {
            battle_worker.run().await;
        });

        let tick_worker_handle = self
            .config
            .tick_interval
            .filter(|interval| !interval.is_zero())
            .map(|interval| {
                let tick_worker = TickWorker::new(interval, handle.clone());
                tokio::spawn(async move {
                    tick_worker.run().await;
                })
            });

        Ok(Runtime {
            handle,
            providers: self.providers,
            battle_worker_handle,
            tick_worker_handle,
        })
    }
}
