//! supplicant-config library crate.
//!
//! Makes sure the `wpa_supplicant` config files exist under `/data/misc/wifi`
//! before the supplicant starts, seeding them from the template shipped in
//! the system or vendor image.
//!
//! # Architecture
//!
//! ```text
//! [supplicant-config]
//!   ├── domain/          ProvisionerConfig, ProvisionOutcome, ProvisionError
//!   ├── application/
//!   │     ├── provision/ ConfigProvisioner (one file) + ProvisionFs trait
//!   │     └── startup/   mandatory primary, best-effort secondary
//!   └── infrastructure/
//!         └── fs/        OsFileSystem (std::fs + access(2))
//! ```
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::provision::{ConfigProvisioner, ProvisionFs};
pub use application::startup::{prepare_supplicant_configs, StartupReport};
pub use domain::{ProvisionError, ProvisionOutcome, ProvisionerConfig, WriteErrorPolicy};
pub use infrastructure::OsFileSystem;
