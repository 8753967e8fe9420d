//! Pre-start policy for the supplicant configs.
//!
//! The station config is mandatory: without it the supplicant cannot run and
//! Wi-Fi must not be enabled. The p2p config is best-effort: not every device
//! has a p2p interface, and a supplicant that does expect the file refuses
//! to start with its own error message.

use tracing::debug;

use crate::application::provision::{ConfigProvisioner, ProvisionFs};
use crate::domain::{ProvisionError, ProvisionOutcome};

/// What [`prepare_supplicant_configs`] achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub primary: ProvisionOutcome,
    /// `None` when the secondary config could not be provisioned.
    pub secondary: Option<ProvisionOutcome>,
}

/// Provisions the primary config, then the secondary one.
///
/// # Errors
///
/// Returns the primary target's [`ProvisionError`]. The secondary target is
/// not attempted in that case. A secondary failure is never returned.
pub fn prepare_supplicant_configs<F: ProvisionFs>(
    provisioner: &ConfigProvisioner<F>,
) -> Result<StartupReport, ProvisionError> {
    let config = provisioner.config();

    let primary = provisioner.ensure_config_exists(&config.primary_target)?;

    // Already logged by the provisioner.
    let secondary = provisioner
        .ensure_config_exists(&config.secondary_target)
        .ok();
    if secondary.is_none() {
        debug!(
            "continuing without \"{}\"",
            config.secondary_target.display()
        );
    }

    Ok(StartupReport { primary, secondary })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::path::Path;

    use crate::application::provision::MockProvisionFs;
    use crate::domain::ProvisionerConfig;

    const PRIMARY: &str = "/data/misc/wifi/wpa_supplicant.conf";
    const SECONDARY: &str = "/data/misc/wifi/p2p_supplicant.conf";

    fn provisioner(fs: MockProvisionFs) -> ConfigProvisioner<MockProvisionFs> {
        ConfigProvisioner::new(fs, ProvisionerConfig::default())
    }

    #[test]
    fn test_both_targets_present() {
        // Arrange
        let mut fs = MockProvisionFs::new();
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(PRIMARY))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(SECONDARY))
            .times(1)
            .returning(|_| Ok(()));

        // Act
        let report = prepare_supplicant_configs(&provisioner(fs)).unwrap();

        // Assert
        assert_eq!(report.primary, ProvisionOutcome::AlreadyPresent);
        assert_eq!(report.secondary, Some(ProvisionOutcome::AlreadyPresent));
    }

    #[test]
    fn test_primary_failure_is_fatal_and_skips_secondary() {
        // Arrange: the secondary probe must never happen
        let mut fs = MockProvisionFs::new();
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(PRIMARY))
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::InvalidInput)));
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(SECONDARY))
            .never();

        // Act
        let err = prepare_supplicant_configs(&provisioner(fs)).unwrap_err();

        // Assert
        assert!(matches!(err, ProvisionError::CannotAccess { .. }));
        assert_eq!(err.target(), Path::new(PRIMARY));
    }

    #[test]
    fn test_secondary_failure_is_ignored() {
        // Arrange: secondary is missing and no template can be found
        let mut fs = MockProvisionFs::new();
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(PRIMARY))
            .returning(|_| Ok(()));
        fs.expect_probe_read_write()
            .withf(|path| path == Path::new(SECONDARY))
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));
        fs.expect_open_template()
            .times(2)
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));

        // Act
        let report = prepare_supplicant_configs(&provisioner(fs)).unwrap();

        // Assert
        assert_eq!(report.primary, ProvisionOutcome::AlreadyPresent);
        assert_eq!(report.secondary, None);
    }
}
