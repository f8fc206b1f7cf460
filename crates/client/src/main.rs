//! Headless battle client binary.
//!
//! Composition root that loads content, starts the runtime, gives every agent
//! slot a rotation of modules and runs the battle for a fixed simulated time,
//! logging every recast and chain event.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug BATTLE_DURATION_MS=10000 cargo run -p battle-client
//! ```

mod config;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use battle_content::{ConfigLoader, ModuleLoader};
use battle_core::ModuleId;
use config::ClientConfig;
use runtime::{ChainEvent, Event, RotationProvider, Runtime, RuntimeConfig, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();

    let battle_config = match &config.battle_config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::bundled()?,
    };
    let catalog = match &config.modules {
        Some(path) => ModuleLoader::load(path)?,
        None => ModuleLoader::bundled()?,
    };
    let modules: Vec<ModuleId> = catalog.ids().collect();

    let mut builder = Runtime::builder()
        .config(RuntimeConfig {
            battle_config: battle_config.clone(),
            ..Default::default()
        })
        .catalog(catalog);
    for (offset, agent) in battle_config.agents().enumerate() {
        let mut rotation = modules.clone();
        if !rotation.is_empty() {
            let len = rotation.len();
            rotation.rotate_left(offset % len);
        }
        builder = builder.provider(agent, RotationProvider::new(rotation));
    }

    let mut runtime = builder.build().await.context("failed to start runtime")?;
    let chain_log = tokio::spawn(log_chain_events(runtime.subscribe(Topic::Chain)));

    info!(
        agents = battle_config.agent_slots,
        steps = config.steps(),
        "battle started"
    );

    let reports = runtime.run_for(config.steps(), config.tick).await?;
    let actions: usize = reports.iter().map(|report| report.outcomes.len()).sum();
    let bonuses: usize = reports
        .iter()
        .flat_map(|report| &report.outcomes)
        .map(|outcome| outcome.triggered.len())
        .sum();

    runtime.shutdown().await?;
    chain_log.await?;

    info!(actions, bonuses, "battle finished");
    Ok(())
}

async fn log_chain_events(mut rx: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Chain(ChainEvent::Triggered { by, triggered })) => {
                info!(%by, owner = %triggered.source_agent, "{}", triggered.message);
            }
            Ok(Event::Chain(ChainEvent::Expired(pending))) => {
                info!(owner = %pending.agent, kind = pending.effect.kind.as_str(), "chain window closed");
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "chain event log lagging");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
