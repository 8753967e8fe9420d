//! [`ProvisionFs`] backed by the real file system.
//!
//! Unix only: access checks go through `access(2)` and permission bits are
//! set with [`PermissionsExt`]. Every blocking call that can be interrupted
//! by a signal is retried until it completes or fails for another reason.

use std::ffi::CString;
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

use tracing::debug;

use crate::application::provision::ProvisionFs;

/// Runs `op` until it returns anything other than `ErrorKind::Interrupted`.
pub fn retry_on_interrupt<T, F>(mut op: F) -> io::Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    loop {
        match op() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// The production file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ProvisionFs for OsFileSystem {
    /// Checks `R_OK | W_OK` against the real user and group IDs.
    fn probe_read_write(&self, path: &Path) -> io::Result<()> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        retry_on_interrupt(|| {
            // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
            let rc = unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) };
            if rc == 0 {
                Ok(())
            } else {
                Err(io::Error::last_os_error())
            }
        })
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        debug!("chmod {mode:04o} {}", path.display());
        retry_on_interrupt(|| fs::set_permissions(path, Permissions::from_mode(mode)))
    }

    fn open_template(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let file = retry_on_interrupt(|| File::open(path))?;
        Ok(Box::new(file))
    }

    /// Opens `path` read/write, creating it with `mode` (subject to umask)
    /// if it does not exist. Existing content is not truncated.
    fn create_target(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write>> {
        let file = retry_on_interrupt(|| {
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .mode(mode)
                .open(path)
        })?;
        Ok(Box::new(file))
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        retry_on_interrupt(|| fs::remove_file(path))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
