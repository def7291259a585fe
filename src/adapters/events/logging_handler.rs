//! Event handler that writes every board event to the log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// Logs each event at info level with its type, question and payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventHandler;

#[async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id.as_str(),
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or("-"),
            user_id = event.metadata.user_id.as_deref().unwrap_or("-"),
            payload = %event.payload,
            "event published"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn never_fails() {
        let envelope = EventEnvelope::new("qna.vote_cast.v1", "q-1", "Question", json!({"vote": "up"}))
            .with_user_id("sarah-chen");
        assert!(LoggingEventHandler.handle(envelope).await.is_ok());
    }
}
