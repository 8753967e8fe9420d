//! Provisioning outcomes and failures.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// How a successful provisioning call satisfied its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The target was already readable and writable; nothing was touched.
    AlreadyPresent,
    /// The target existed but access was denied; its mode was reset.
    PermissionsRepaired,
    /// The target was created from `template`.
    Seeded { template: PathBuf, bytes: u64 },
}

/// A template candidate that could not be opened.
#[derive(Debug)]
pub struct TemplateAttempt {
    pub path: PathBuf,
    pub error: io::Error,
}

impl fmt::Display for TemplateAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot open \"{}\": {}", self.path.display(), self.error)
    }
}

/// Error type for a single provisioning call.
///
/// Every variant aborts the call. Variants raised after the target was
/// created ([`TemplateRead`](Self::TemplateRead),
/// [`TargetWrite`](Self::TargetWrite), [`CannotFinalize`](Self::CannotFinalize))
/// are only returned once the target has been removed again.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Access to an existing target was denied and chmod failed too.
    #[error("cannot set RW to \"{}\": {source}", .path.display())]
    CannotRepairPermissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target could not be probed for a reason other than absence.
    #[error("cannot access \"{}\": {source}", .path.display())]
    CannotAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the template candidates could be opened.
    #[error("no template available for \"{}\" ({} candidate(s) tried)", .target.display(), .attempts.len())]
    NoTemplate {
        target: PathBuf,
        attempts: Vec<TemplateAttempt>,
    },

    /// The target could not be created or opened for writing.
    #[error("cannot create \"{}\": {source}", .path.display())]
    CannotCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the template failed part-way through the copy.
    #[error("error reading \"{}\" into \"{}\": {source}", .template.display(), .target.display())]
    TemplateRead {
        template: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the target failed and the write policy is `Abort`.
    #[error("error writing \"{}\" from \"{}\": {source}", .target.display(), .template.display())]
    TargetWrite {
        template: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The final chmod after seeding failed.
    #[error("error changing permissions of \"{}\" to {mode:04o}: {source}", .path.display())]
    CannotFinalize {
        path: PathBuf,
        mode: u32,
        #[source]
        source: io::Error,
    },
}

impl ProvisionError {
    /// The target path the failed call was provisioning.
    pub fn target(&self) -> &std::path::Path {
        match self {
            Self::CannotRepairPermissions { path, .. }
            | Self::CannotAccess { path, .. }
            | Self::CannotCreate { path, .. }
            | Self::CannotFinalize { path, .. } => path,
            Self::NoTemplate { target, .. }
            | Self::TemplateRead { target, .. }
            | Self::TargetWrite { target, .. } => target,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> io::Error {
        io::Error::from(io::ErrorKind::PermissionDenied)
    }

    #[test]
    fn test_finalize_error_formats_mode_in_octal() {
        // Arrange
        let err = ProvisionError::CannotFinalize {
            path: PathBuf::from("/data/misc/wifi/wpa_supplicant.conf"),
            mode: 0o660,
            source: denied(),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("0660"), "mode must be shown in octal: {msg}");
        assert!(msg.contains("/data/misc/wifi/wpa_supplicant.conf"));
    }

    #[test]
    fn test_no_template_reports_number_of_candidates() {
        let err = ProvisionError::NoTemplate {
            target: PathBuf::from("/data/t.conf"),
            attempts: vec![
                TemplateAttempt {
                    path: PathBuf::from("/system/t.conf"),
                    error: io::Error::from(io::ErrorKind::NotFound),
                },
                TemplateAttempt {
                    path: PathBuf::from("/vendor/t.conf"),
                    error: io::Error::from(io::ErrorKind::NotFound),
                },
            ],
        };
        assert!(err.to_string().contains("2 candidate(s)"));
    }

    #[test]
    fn test_template_attempt_display_names_the_path() {
        let attempt = TemplateAttempt {
            path: PathBuf::from("/vendor/etc/wifi/wpa_supplicant.conf"),
            error: denied(),
        };
        assert!(attempt
            .to_string()
            .starts_with("cannot open \"/vendor/etc/wifi/wpa_supplicant.conf\""));
    }

    #[test]
    fn test_target_returns_the_provisioned_path_for_every_variant() {
        let target = PathBuf::from("/data/t.conf");
        let errors = vec![
            ProvisionError::CannotRepairPermissions {
                path: target.clone(),
                source: denied(),
            },
            ProvisionError::CannotAccess {
                path: target.clone(),
                source: denied(),
            },
            ProvisionError::NoTemplate {
                target: target.clone(),
                attempts: Vec::new(),
            },
            ProvisionError::CannotCreate {
                path: target.clone(),
                source: denied(),
            },
            ProvisionError::TemplateRead {
                template: PathBuf::from("/system/t.conf"),
                target: target.clone(),
                source: denied(),
            },
            ProvisionError::TargetWrite {
                template: PathBuf::from("/system/t.conf"),
                target: target.clone(),
                source: denied(),
            },
            ProvisionError::CannotFinalize {
                path: target.clone(),
                mode: 0o660,
                source: denied(),
            },
        ];

        for err in &errors {
            assert_eq!(err.target(), target.as_path(), "variant: {err:?}");
        }
    }
}
