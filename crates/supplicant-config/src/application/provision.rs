//! ConfigProvisioner: guarantees a supplicant config file exists with the
//! fixed permission bits before the daemon starts.
//!
//! # Flow of one call
//!
//! ```text
//! probe target ──accessible──────────────────────────────▶ AlreadyPresent
//!      │ permission denied ──chmod──────────────────────▶ PermissionsRepaired
//!      │ not found
//!      ▼
//! open first template candidate that opens
//!      ▼
//! create target (mode requested at creation)
//!      ▼
//! copy template → target through a bounded buffer
//!      ▼
//! close both, chmod target ──────────────────────────────▶ Seeded
//! ```
//!
//! Any failure ends the call. Once the target has been created, a failure
//! removes it again so no partially populated config is left behind.
//!
//! All file-system access goes through [`ProvisionFs`] so the failure paths
//! can be driven from tests; [`OsFileSystem`](crate::infrastructure::OsFileSystem)
//! is the production implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::domain::{
    ProvisionError, ProvisionOutcome, ProvisionerConfig, TemplateAttempt, WriteErrorPolicy,
};

/// File-system operations the provisioner needs.
///
/// Implementations must retry calls interrupted by a signal instead of
/// returning `ErrorKind::Interrupted`.
#[cfg_attr(test, mockall::automock)]
pub trait ProvisionFs {
    /// Succeeds when `path` is both readable and writable by the caller.
    fn probe_read_write(&self, path: &Path) -> io::Result<()>;

    /// Sets the permission bits of `path` to exactly `mode`.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Opens `path` read-only.
    fn open_template(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Opens `path` read/write, creating it with `mode` if absent.
    fn create_target(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write>>;

    /// Deletes `path`.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Result of probing an existing target.
#[derive(Debug)]
enum Probe {
    Accessible,
    PermissionDenied,
    Missing,
}

/// Provisions config files according to a [`ProvisionerConfig`].
pub struct ConfigProvisioner<F: ProvisionFs> {
    fs: F,
    config: ProvisionerConfig,
}

impl<F: ProvisionFs> ConfigProvisioner<F> {
    pub fn new(fs: F, config: ProvisionerConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    /// Makes sure `target` exists, is readable and writable, and (when it had
    /// to be repaired or created) carries the configured mode.
    ///
    /// Failures are logged before they are returned; callers decide whether a
    /// failure matters.
    ///
    /// # Errors
    ///
    /// Returns the [`ProvisionError`] variant for the step that failed.
    pub fn ensure_config_exists(
        &self,
        target: &Path,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let result = self.provision(target);
        match &result {
            Ok(ProvisionOutcome::AlreadyPresent) => {
                debug!("\"{}\" already present", target.display());
            }
            Ok(ProvisionOutcome::PermissionsRepaired) => {
                info!(
                    "reset permissions of \"{}\" to {:04o}",
                    target.display(),
                    self.config.file_mode
                );
            }
            Ok(ProvisionOutcome::Seeded { template, bytes }) => {
                info!(
                    "created \"{}\" from \"{}\" ({bytes} bytes)",
                    target.display(),
                    template.display()
                );
            }
            Err(err) => log_failure(err),
        }
        result
    }

    fn provision(&self, target: &Path) -> Result<ProvisionOutcome, ProvisionError> {
        let mode = self.config.file_mode;

        match self.probe(target)? {
            Probe::Accessible => return Ok(ProvisionOutcome::AlreadyPresent),
            Probe::PermissionDenied => {
                self.fs.set_mode(target, mode).map_err(|source| {
                    ProvisionError::CannotRepairPermissions {
                        path: target.to_path_buf(),
                        source,
                    }
                })?;
                return Ok(ProvisionOutcome::PermissionsRepaired);
            }
            Probe::Missing => {}
        }

        let (template_path, template) = self.open_template(target)?;

        // An early return here drops `template`, closing it.
        let output =
            self.fs
                .create_target(target, mode)
                .map_err(|source| ProvisionError::CannotCreate {
                    path: target.to_path_buf(),
                    source,
                })?;

        let bytes = match self.copy(template, output, &template_path, target) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.discard(target);
                return Err(err);
            }
        };

        // Mode bits requested at creation are filtered by the umask and are
        // ignored entirely when the file already existed.
        if let Err(source) = self.fs.set_mode(target, mode) {
            self.discard(target);
            return Err(ProvisionError::CannotFinalize {
                path: target.to_path_buf(),
                mode,
                source,
            });
        }

        Ok(ProvisionOutcome::Seeded {
            template: template_path,
            bytes,
        })
    }

    fn probe(&self, target: &Path) -> Result<Probe, ProvisionError> {
        match self.fs.probe_read_write(target) {
            Ok(()) => Ok(Probe::Accessible),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!("\"{}\" exists but is not accessible: {e}", target.display());
                Ok(Probe::PermissionDenied)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Probe::Missing),
            Err(source) => Err(ProvisionError::CannotAccess {
                path: target.to_path_buf(),
                source,
            }),
        }
    }

    /// Opens the first template candidate that can be opened.
    fn open_template(&self, target: &Path) -> Result<(PathBuf, Box<dyn Read>), ProvisionError> {
        let mut attempts = Vec::new();
        for candidate in self.config.template_candidates() {
            match self.fs.open_template(&candidate) {
                Ok(reader) => {
                    debug!("using template \"{}\"", candidate.display());
                    return Ok((candidate, reader));
                }
                Err(error) => attempts.push(TemplateAttempt {
                    path: candidate,
                    error,
                }),
            }
        }
        Err(ProvisionError::NoTemplate {
            target: target.to_path_buf(),
            attempts,
        })
    }

    /// Copies `template` into `output` and returns the number of bytes
    /// written. Both handles are closed when this returns.
    fn copy(
        &self,
        mut template: Box<dyn Read>,
        mut output: Box<dyn Write>,
        template_path: &Path,
        target: &Path,
    ) -> Result<u64, ProvisionError> {
        let mut buf = vec![0u8; self.config.copy_buffer_size.max(1)];
        let mut written = 0u64;

        loop {
            let n = match template.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(ProvisionError::TemplateRead {
                        template: template_path.to_path_buf(),
                        target: target.to_path_buf(),
                        source,
                    })
                }
            };

            match output.write_all(&buf[..n]) {
                Ok(()) => written += n as u64,
                Err(source) => self.on_write_error(source, template_path, target)?,
            }
        }

        if let Err(source) = output.flush() {
            self.on_write_error(source, template_path, target)?;
        }

        Ok(written)
    }

    fn on_write_error(
        &self,
        source: io::Error,
        template_path: &Path,
        target: &Path,
    ) -> Result<(), ProvisionError> {
        match self.config.write_error_policy {
            WriteErrorPolicy::Ignore => {
                warn!("error writing \"{}\": {source}", target.display());
                Ok(())
            }
            WriteErrorPolicy::Abort => Err(ProvisionError::TargetWrite {
                template: template_path.to_path_buf(),
                target: target.to_path_buf(),
                source,
            }),
        }
    }

    /// Removes a target this call created. A failure here is logged only;
    /// the caller reports the error that triggered the cleanup.
    fn discard(&self, target: &Path) {
        if let Err(e) = self.fs.remove(target) {
            warn!("cannot remove \"{}\": {e}", target.display());
        }
    }
}

fn log_failure(err: &ProvisionError) {
    match err {
        ProvisionError::NoTemplate { attempts, .. } => {
            for attempt in attempts {
                error!("{attempt}");
            }
            error!("{err}");
        }
        _ => error!("{err}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
