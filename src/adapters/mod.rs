//! Adapters - Implementations of port interfaces.
//!
//! - `backend` - Community backend (in-memory, HTTP)
//! - `events` - In-process event bus and logging handler
//! - `memory` - In-memory question board
//! - `policy` - Acceptance policy
//! - `seed` - Sample catalog loader

pub mod backend;
pub mod events;
pub mod memory;
pub mod policy;
pub mod seed;

pub use backend::{HttpBackendConfig, HttpCommunityBackend, InMemoryCommunityBackend};
pub use events::{InMemoryEventBus, LoggingEventHandler, ALL_EVENTS};
pub use memory::InMemoryQuestionRepository;
pub use policy::AuthorAcceptancePolicy;
pub use seed::{SampleCatalog, SeedError};
