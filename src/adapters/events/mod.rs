//! Event bus adapters.

mod in_memory;
mod logging_handler;

pub use in_memory::{InMemoryEventBus, ALL_EVENTS};
pub use logging_handler::LoggingEventHandler;
