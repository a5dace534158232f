//! # Connector Layer
//!
//! External integrations implementing application ports, and the HTTP surface:
//! - Completion service (OpenAI chat completions, offline mock)
//! - API (axum router, controllers, dependency container)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{build_router, serve, Container, ContainerConfig};
