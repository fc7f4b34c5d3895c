//! Registry configuration for the HTTP extension.

use super::core::ElementRegistry;
use super::handlers::{ComponentParent, ServiceInstallParent, UrlReservationHandler};
use crate::config::{COMPONENT_ELEMENT, SERVICE_INSTALL_ELEMENT, URL_RESERVATION_ELEMENT};

/// Create a registry configured for the HTTP extension.
///
/// `UrlReservation` may appear under `Component` and `ServiceInstall`;
/// `UrlAce` is only valid nested inside `UrlReservation` and is handled
/// there.
#[must_use]
pub fn create_http_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    registry.register_parent(COMPONENT_ELEMENT, ComponentParent);
    registry.register_parent(SERVICE_INSTALL_ELEMENT, ServiceInstallParent);

    registry.register(URL_RESERVATION_ELEMENT, UrlReservationHandler);

    registry
}
