//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration required to run a headless battle.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// TOML battle configuration. Bundled defaults when unset.
    pub battle_config: Option<PathBuf>,
    /// RON module catalog. Bundled catalog when unset.
    pub modules: Option<PathBuf>,
    /// Simulated time per step.
    pub tick: Duration,
    /// Total simulated battle time.
    pub duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            battle_config: None,
            modules: None,
            tick: Duration::from_millis(100),
            duration: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONFIG` - Path to the battle TOML (default: bundled)
    /// - `BATTLE_MODULES` - Path to the module catalog RON (default: bundled)
    /// - `BATTLE_TICK_MS` - Milliseconds per step (default: 100)
    /// - `BATTLE_DURATION_MS` - Simulated battle length (default: 30000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.battle_config = lookup("BATTLE_CONFIG").map(PathBuf::from);
        config.modules = lookup("BATTLE_MODULES").map(PathBuf::from);

        if let Some(ms) = read_var::<u64>(&lookup, "BATTLE_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_var::<u64>(&lookup, "BATTLE_DURATION_MS") {
            config.duration = Duration::from_millis(ms);
        }

        config
    }

    /// Number of steps needed to cover `duration`.
    pub fn steps(&self) -> u32 {
        let steps = self.duration.as_millis() / self.tick.as_millis().max(1);
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}

fn read_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
