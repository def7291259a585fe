//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CommunityBackend` - Authoritative remote store for shared counters
//! - `QuestionRepository` - Local store of question threads
//! - `AcceptancePolicy` - Who may accept or withdraw an answer
//! - `EventPublisher` / `EventSubscriber` / `EventHandler` - Domain event flow

mod acceptance_policy;
mod community_backend;
mod event_publisher;
mod event_subscriber;
mod question_repository;

pub use acceptance_policy::AcceptancePolicy;
pub use community_backend::{BackendError, CommunityBackend};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use question_repository::QuestionRepository;
