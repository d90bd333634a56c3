//! Platform capabilities, resolved once at startup.
//!
//! Every supported target provides the same small surface: the interface
//! naming conventions used by the selection heuristic, the network-name
//! query, and the privilege requirement for raw sockets.

use whoshere_common::error::Error;

#[derive(Debug, Clone, Copy)]
pub struct Platform;

impl Platform {
    /// Fails on targets this tool has no capability set for.
    pub fn detect() -> Result<Self, Error> {
        if cfg!(any(target_os = "linux", target_os = "windows")) {
            Ok(Self)
        } else {
            Err(Error::UnsupportedPlatform)
        }
    }

    /// Conventional interface name to try when none is configured.
    pub fn default_interface(&self) -> Option<&'static str> {
        imp::DEFAULT_INTERFACE
    }

    /// Name prefix that identifies wireless interfaces, where the platform
    /// has one.
    pub fn wireless_prefix(&self) -> Option<&'static str> {
        imp::WIRELESS_PREFIX
    }

    /// Best-effort query for the advertised network name. Every failure
    /// path answers `None`; callers substitute the sentinel.
    pub fn network_name(&self) -> Option<String> {
        imp::network_name()
    }

    /// Raw link-layer frames need elevation on POSIX targets. Checked
    /// before any scan is attempted.
    pub fn ensure_privileged(&self) -> Result<(), Error> {
        imp::ensure_privileged()
    }
}

#[cfg(target_os = "linux")]
mod imp {
    use std::process::Command;

    use is_root::is_root;
    use whoshere_common::error::Error;

    pub const DEFAULT_INTERFACE: Option<&str> = None;
    pub const WIRELESS_PREFIX: Option<&str> = Some("wl");

    pub fn network_name() -> Option<String> {
        let output = Command::new("iwgetid").arg("-r").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let name = String::from_utf8(output.stdout).ok()?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn ensure_privileged() -> Result<(), Error> {
        if is_root() {
            Ok(())
        } else {
            Err(Error::InterfaceUnusable(
                "raw frame transmission requires root".into(),
            ))
        }
    }
}

#[cfg(target_os = "windows")]
mod imp {
    use std::process::Command;

    use whoshere_common::error::Error;

    pub const DEFAULT_INTERFACE: Option<&str> = Some("Wi-Fi");
    pub const WIRELESS_PREFIX: Option<&str> = None;

    pub fn network_name() -> Option<String> {
        let output = Command::new("powershell.exe")
            .args(["-NoProfile", "-Command", "(Get-NetConnectionProfile).Name"])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let name = String::from_utf8(output.stdout).ok()?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn ensure_privileged() -> Result<(), Error> {
        Ok(())
    }
}

// Platform::detect refuses these targets; the stubs only keep the crate
// compiling.
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
mod imp {
    use whoshere_common::error::Error;

    pub const DEFAULT_INTERFACE: Option<&str> = None;
    pub const WIRELESS_PREFIX: Option<&str> = None;

    pub fn network_name() -> Option<String> {
        None
    }

    pub fn ensure_privileged() -> Result<(), Error> {
        Err(Error::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_is_a_supported_platform() {
        let platform = Platform::detect().unwrap();
        assert_eq!(platform.wireless_prefix(), Some("wl"));
        assert_eq!(platform.default_interface(), None);
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn windows_falls_back_to_the_conventional_name() {
        let platform = Platform::detect().unwrap();
        assert_eq!(platform.default_interface(), Some("Wi-Fi"));
    }
}
