//! Configuration constants and validation functions for the compiler.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CompilerError, Result};
use crate::types::Platform;

/// Namespace of the HTTP extension elements and attributes.
pub const HTTP_NAMESPACE: &str = "http://wixtoolset.org/schemas/v4/wxs/http";

/// Namespace of the core elements the extension elements appear under.
pub const WIX_NAMESPACE: &str = "http://wixtoolset.org/schemas/v4/wxs";

/// Prefix of the virtual service account a service install runs as.
pub const SERVICE_PRINCIPAL_PREFIX: &str = "NT SERVICE\\";

/// Maximum length of an identifier.
pub const MAX_IDENTIFIER_LENGTH: usize = 72;

/// Parent context keys supplied by the hosting compiler.
pub const COMPONENT_ID_KEY: &str = "ComponentId";
pub const SERVICE_INSTALL_COMPONENT_ID_KEY: &str = "ServiceInstallComponentId";
pub const SERVICE_INSTALL_NAME_KEY: &str = "ServiceInstallName";

/// Parent element names the extension can appear under.
pub const COMPONENT_ELEMENT: &str = "Component";
pub const SERVICE_INSTALL_ELEMENT: &str = "ServiceInstall";

/// Extension element names.
pub const URL_RESERVATION_ELEMENT: &str = "UrlReservation";
pub const URL_ACE_ELEMENT: &str = "UrlAce";

/// Output table names.
pub const URL_RESERVATION_TABLE: &str = "WixHttpUrlReservation";
pub const URL_ACE_TABLE: &str = "WixHttpUrlAce";
pub const CUSTOM_ACTION_TABLE: &str = "CustomAction";

/// Custom actions scheduling the reservations on ARM64 targets.
pub const INSTALL_ACTION_ARM64: &str = "Wix4SchedHttpUrlReservationsInstall_ARM64";
pub const UNINSTALL_ACTION_ARM64: &str = "Wix4SchedHttpUrlReservationsUninstall_ARM64";

/// Custom actions scheduling the reservations on every other target.
pub const INSTALL_ACTION_X86: &str = "Wix4SchedHttpUrlReservationsInstall_X86";
pub const UNINSTALL_ACTION_X86: &str = "Wix4SchedHttpUrlReservationsUninstall_X86";

/// Identifier pattern: letter or underscore, then letters, digits, `_` or `.`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("valid regex"));

/// Validate identifier syntax.
///
/// # Examples
/// ```
/// use urlacl_compiler::config::validate_identifier;
///
/// assert!(validate_identifier("ApiReservation").is_ok());
/// assert!(validate_identifier("_private.v2").is_ok());
/// assert!(validate_identifier("1st").is_err());
/// assert!(validate_identifier("has space").is_err());
/// ```
pub fn validate_identifier(id: &str) -> Result<()> {
    if id.len() <= MAX_IDENTIFIER_LENGTH && IDENTIFIER_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(CompilerError::InvalidIdentifier(id.to_string()))
    }
}

/// Install/uninstall custom action pair referenced for a target platform.
///
/// # Examples
/// ```
/// use urlacl_compiler::config::action_handlers;
/// use urlacl_compiler::Platform;
///
/// let (install, _) = action_handlers(Platform::Arm64);
/// assert!(install.ends_with("_ARM64"));
/// let (install, _) = action_handlers(Platform::X64);
/// assert!(install.ends_with("_X86"));
/// ```
#[must_use]
pub fn action_handlers(platform: Platform) -> (&'static str, &'static str) {
    match platform {
        Platform::Arm64 => (INSTALL_ACTION_ARM64, UNINSTALL_ACTION_ARM64),
        Platform::X86 | Platform::X64 => (INSTALL_ACTION_X86, UNINSTALL_ACTION_X86),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier_valid() {
        assert!(validate_identifier("a").is_ok());
        assert!(validate_identifier("Url_Reservation.1").is_ok());
        assert!(validate_identifier(&"x".repeat(MAX_IDENTIFIER_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_identifier_invalid() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("9lives").is_err());
        assert!(validate_identifier("a-b").is_err());
        assert!(validate_identifier(".hidden").is_err());
    }

    #[test]
    fn test_validate_identifier_too_long() {
        let long = "x".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert!(validate_identifier(&long).is_err());
    }

    #[test]
    fn test_action_handlers_per_platform() {
        assert_eq!(
            action_handlers(Platform::Arm64),
            (INSTALL_ACTION_ARM64, UNINSTALL_ACTION_ARM64)
        );
        assert_eq!(
            action_handlers(Platform::X86),
            (INSTALL_ACTION_X86, UNINSTALL_ACTION_X86)
        );
        assert_eq!(
            action_handlers(Platform::X64),
            (INSTALL_ACTION_X86, UNINSTALL_ACTION_X86)
        );
    }
}
