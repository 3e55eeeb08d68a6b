//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Container engine (docker CLI): build / push / remove
//! - Container registry (aws CLI): authentication
//! - Chat webhook: notifications
//!
//! Each adapter sits behind an async trait so the pipeline orchestrator
//! can be exercised in tests with recording fakes.

pub mod docker;
pub mod notify;
pub mod registry;

// Re-export commonly used types
pub use docker::{ContainerEngine, DockerClient};
pub use notify::{ChatMessage, ChatNotifier, MessageColor, Notifier};
pub use registry::{EcrAuth, RegistryAuth};
