//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the battle state and executes commands, while the
//! tick worker drives time forward on a fixed interval when enabled.

mod battle;
mod ticker;

pub use battle::{BattleWorker, Command};
pub use ticker::TickWorker;
