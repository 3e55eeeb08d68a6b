//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod release;

// Re-export commonly used types
pub use release::{BuildContext, ImageReference, ReleaseOutcome, ReleaseStep, StepResult};
