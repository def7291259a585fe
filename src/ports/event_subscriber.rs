//! EventSubscriber port - listeners for board events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to published events.
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for ReputationTracker {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let accepted: AnswerAccepted = event.payload_as()?;
///         // ...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "ReputationTracker"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Registers handlers for event types.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe the same handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}

/// Publisher and subscriber in one.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}
}
