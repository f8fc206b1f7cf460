//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers can subscribe only
//! to the topics they need.

mod bus;
mod extractor;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use extractor::{outcome_events, tick_events};
pub use types::{ChainEvent, RecastEvent};
