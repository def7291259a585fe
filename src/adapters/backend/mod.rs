//! Community backend adapters.

mod http;
mod in_memory;

pub use http::{HttpBackendConfig, HttpCommunityBackend};
pub use in_memory::InMemoryCommunityBackend;
