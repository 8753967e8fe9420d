//! Provisioner configuration.
//!
//! [`ProvisionerConfig`] holds every path and constant the provisioner needs.
//! It is built once at startup and passed by reference; nothing here reads
//! the environment or touches the file system.
//!
//! The shipped binary always uses [`ProvisionerConfig::default`]: the paths
//! are fixed by the platform image layout and are not configurable at runtime.

use std::path::{Path, PathBuf};

/// Template path relative to an image root such as `/system`.
pub const TEMPLATE_RELATIVE_PATH: &str = "/etc/wifi/wpa_supplicant.conf";

/// Runtime config read by `wpa_supplicant` for the station interface.
pub const PRIMARY_TARGET: &str = "/data/misc/wifi/wpa_supplicant.conf";

/// Runtime config for the p2p interface. Not every device ships one.
pub const SECONDARY_TARGET: &str = "/data/misc/wifi/p2p_supplicant.conf";

/// Image roots searched for the template, in order.
pub const TEMPLATE_PREFIXES: [&str; 2] = ["/system", "/vendor"];

/// `rw-rw----`: owner and group read/write, nothing for others.
pub const CONFIG_FILE_MODE: u32 = 0o660;

/// Size of the intermediate buffer used while copying a template.
pub const COPY_BUFFER_SIZE: usize = 2048;

/// What to do when writing a chunk to the target fails mid-copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteErrorPolicy {
    /// Log the failure and keep copying. The resulting file may be short.
    #[default]
    Ignore,
    /// Stop, remove the partially written target and report the error.
    Abort,
}

/// All inputs to the provisioner.
///
/// | Field                    | Default                                  |
/// |--------------------------|------------------------------------------|
/// | template_relative_path   | `/etc/wifi/wpa_supplicant.conf`          |
/// | template_prefixes        | `/system`, `/vendor`                     |
/// | primary_target           | `/data/misc/wifi/wpa_supplicant.conf`    |
/// | secondary_target         | `/data/misc/wifi/p2p_supplicant.conf`    |
/// | file_mode                | `0o660`                                  |
/// | copy_buffer_size         | 2048                                     |
/// | write_error_policy       | [`WriteErrorPolicy::Ignore`]             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionerConfig {
    /// Template location below each prefix. May start with `/`.
    pub template_relative_path: PathBuf,
    /// Prefixes tried in order; the first one whose template opens wins.
    pub template_prefixes: Vec<PathBuf>,
    /// Config whose absence is fatal to startup.
    pub primary_target: PathBuf,
    /// Config provisioned on a best-effort basis.
    pub secondary_target: PathBuf,
    /// Permission bits applied to every provisioned file.
    pub file_mode: u32,
    /// Bytes read from the template per iteration. Must be non-zero.
    pub copy_buffer_size: usize,
    pub write_error_policy: WriteErrorPolicy,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            template_relative_path: PathBuf::from(TEMPLATE_RELATIVE_PATH),
            template_prefixes: TEMPLATE_PREFIXES.iter().map(PathBuf::from).collect(),
            primary_target: PathBuf::from(PRIMARY_TARGET),
            secondary_target: PathBuf::from(SECONDARY_TARGET),
            file_mode: CONFIG_FILE_MODE,
            copy_buffer_size: COPY_BUFFER_SIZE,
            write_error_policy: WriteErrorPolicy::default(),
        }
    }
}

impl ProvisionerConfig {
    /// Returns the full template paths to try, in search order.
    ///
    /// The relative path is appended to each prefix textually, so a leading
    /// `/` does not discard the prefix the way [`Path::join`] would.
    pub fn template_candidates(&self) -> Vec<PathBuf> {
        let relative = strip_root(&self.template_relative_path);
        self.template_prefixes
            .iter()
            .map(|prefix| prefix.join(relative))
            .collect()
    }
}

fn strip_root(path: &Path) -> &Path {
    path.strip_prefix("/").unwrap_or(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
