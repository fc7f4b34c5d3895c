//! Handler for `<UrlAce>` elements nested in a reservation.

use roxmltree::Node;

use crate::attributes::{for_each_attribute, AttributeSet};
use crate::config::URL_ACE_ELEMENT;
use crate::host::CompilerHost;
use crate::identifier::{derive_identifier, Identifier};
use crate::messages::Message;
use crate::resolver::resolve_token;
use crate::types::{ElementKind, UrlAce, UrlAceRights};
use crate::xml::{element_children, get_tag_name, is_http_element, source_position};

/// Attributes of `<UrlAce>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AceAttribute {
    Id,
    SecurityPrincipal,
    Rights,
}

impl AttributeSet for AceAttribute {
    fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "Id" => Some(Self::Id),
            "SecurityPrincipal" => Some(Self::SecurityPrincipal),
            "Rights" => Some(Self::Rights),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::SecurityPrincipal => "SecurityPrincipal",
            Self::Rights => "Rights",
        }
    }
}

/// Parse a `<UrlAce>` element and emit its row.
///
/// The principal defaults to `default_principal`, the ambient principal of
/// the enclosing reservation. Without an authored `Id` the identifier is
/// derived from the reservation id, the principal and the authored rights
/// token.
///
/// Returns the emitted row, or `None` if the ACE was not emitted.
pub fn parse_url_ace(
    node: Node<'_, '_>,
    reservation_id: &Identifier,
    default_principal: Option<&str>,
    host: &mut dyn CompilerHost,
) -> Option<UrlAce> {
    let position = source_position(node);
    let mut id: Option<Identifier> = None;
    let mut security_principal = default_principal.map(str::to_string);
    let mut rights = UrlAceRights::default();
    let mut rights_token: Option<String> = None;

    for_each_attribute::<AceAttribute, _>(node, host, |attribute, value, host| match attribute {
        AceAttribute::Id => id = value.identifier(host),
        AceAttribute::SecurityPrincipal => {
            if let Some(principal) = value.string(host) {
                security_principal = Some(principal);
            }
        }
        AceAttribute::Rights => {
            if let Some(token) = value.string(host) {
                rights = resolve_token(&value, rights, host).0;
                rights_token = Some(token);
            }
        }
    });

    for child in element_children(node) {
        if is_http_element(child) {
            host.report(
                source_position(child),
                Message::UnexpectedElement {
                    parent: URL_ACE_ELEMENT.to_string(),
                    element: get_tag_name(child).to_string(),
                },
            );
        } else {
            host.parse_extension_element(node, child);
        }
    }

    let id = id.unwrap_or_else(|| {
        derive_identifier(
            ElementKind::UrlAce,
            &[
                Some(reservation_id.as_str()),
                security_principal.as_deref(),
                rights_token.as_deref(),
            ],
        )
    });

    let Some(security_principal) = security_principal else {
        host.report(
            position,
            Message::ExpectedAttribute {
                element: URL_ACE_ELEMENT.to_string(),
                attribute: AceAttribute::SecurityPrincipal.name().to_string(),
            },
        );
        return None;
    };

    if host.encountered_error() {
        tracing::debug!(%id, "errors reported, not emitting url ace");
        return None;
    }

    let record = UrlAce {
        id,
        reservation_id: reservation_id.clone(),
        security_principal,
        rights,
    };
    tracing::debug!(id = %record.id, reservation = %record.reservation_id, "emitting url ace");
    host.add_url_ace(position, record.clone());
    Some(record)
}
