//! Application layer.
//!
//! - **`provision`** – the provisioning routine for a single config file,
//!   written against the [`provision::ProvisionFs`] trait.
//! - **`startup`** – which configs are provisioned before the supplicant
//!   starts and which failures are fatal.

pub mod provision;
pub mod startup;
