//! Domain layer: configuration constants and the provisioning result types.
//!
//! Nothing in this layer performs I/O.

pub mod config;
pub mod error;

pub use config::{ProvisionerConfig, WriteErrorPolicy};
pub use error::{ProvisionError, ProvisionOutcome, TemplateAttempt};
