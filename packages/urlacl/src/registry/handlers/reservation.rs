//! Handler for `<UrlReservation>` elements.
//!
//! A reservation is parsed in one pass: attributes first, then nested
//! `<UrlAce>` children in document order, then cross-field validation.
//! Security is given either as an `Sddl` descriptor or as ACE children,
//! never both and never neither. The row and the references to the
//! scheduling custom actions are only emitted if the compilation has not
//! reported any error.

use roxmltree::Node;

use super::ace::parse_url_ace;
use crate::attributes::{for_each_attribute, AttributeSet};
use crate::config::{action_handlers, CUSTOM_ACTION_TABLE, URL_ACE_ELEMENT, URL_RESERVATION_ELEMENT};
use crate::host::CompilerHost;
use crate::identifier::{derive_identifier, Identifier};
use crate::messages::Message;
use crate::registry::handler::ElementHandler;
use crate::registry::types::ParseContext;
use crate::resolver::resolve_token;
use crate::types::{ElementKind, HandleExisting, UrlReservation};
use crate::xml::{element_children, get_tag_name, is_http_element, source_position};

/// Attributes of `<UrlReservation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAttribute {
    Id,
    HandleExisting,
    Sddl,
    Url,
}

impl AttributeSet for ReservationAttribute {
    fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "Id" => Some(Self::Id),
            "HandleExisting" => Some(Self::HandleExisting),
            "Sddl" => Some(Self::Sddl),
            "Url" => Some(Self::Url),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::HandleExisting => "HandleExisting",
            Self::Sddl => "Sddl",
            Self::Url => "Url",
        }
    }
}

/// Handler for `<UrlReservation>` elements.
pub struct UrlReservationHandler;

impl ElementHandler for UrlReservationHandler {
    fn handle(&self, node: Node<'_, '_>, context: &ParseContext, host: &mut dyn CompilerHost) {
        parse_url_reservation(node, context, host);
    }
}

/// Parse a `<UrlReservation>` element, its ACEs, and emit its row.
///
/// Without an authored `Id` the identifier is derived from the owning
/// component, the ambient principal and the URL. It is derived before the
/// children are parsed so that nested ACEs reference it.
///
/// Returns the emitted row, or `None` if the reservation was suppressed.
pub fn parse_url_reservation(
    node: Node<'_, '_>,
    context: &ParseContext,
    host: &mut dyn CompilerHost,
) -> Option<UrlReservation> {
    let position = source_position(node);
    let mut id: Option<Identifier> = None;
    let mut handle_existing = HandleExisting::default();
    let mut sddl: Option<String> = None;
    let mut url: Option<String> = None;

    for_each_attribute::<ReservationAttribute, _>(node, host, |attribute, value, host| {
        match attribute {
            ReservationAttribute::Id => id = value.identifier(host),
            ReservationAttribute::HandleExisting => {
                if value.string(host).is_some() {
                    handle_existing = resolve_token(&value, handle_existing, host).0;
                }
            }
            ReservationAttribute::Sddl => sddl = value.string(host),
            ReservationAttribute::Url => url = value.string(host),
        }
    });

    let id = id.unwrap_or_else(|| {
        derive_identifier(
            ElementKind::UrlReservation,
            &[
                Some(context.component_id.as_str()),
                context.security_principal.as_deref(),
                url.as_deref(),
            ],
        )
    });

    let mut found_ace = false;
    for child in element_children(node) {
        if !is_http_element(child) {
            host.parse_extension_element(node, child);
            continue;
        }

        match get_tag_name(child) {
            URL_ACE_ELEMENT => {
                if sddl.is_some() {
                    host.report(
                        source_position(child),
                        Message::IllegalParentAttributeWhenNested {
                            parent: URL_RESERVATION_ELEMENT.to_string(),
                            attribute: ReservationAttribute::Sddl.name().to_string(),
                            child: URL_ACE_ELEMENT.to_string(),
                        },
                    );
                } else {
                    parse_url_ace(child, &id, context.security_principal.as_deref(), host);
                    found_ace = true;
                }
            }
            other => host.report(
                source_position(child),
                Message::UnexpectedElement {
                    parent: URL_RESERVATION_ELEMENT.to_string(),
                    element: other.to_string(),
                },
            ),
        }
    }

    if url.is_none() {
        host.report(
            position,
            Message::ExpectedAttribute {
                element: URL_RESERVATION_ELEMENT.to_string(),
                attribute: ReservationAttribute::Url.name().to_string(),
            },
        );
    }

    if !found_ace && sddl.is_none() {
        host.report(position, Message::NoSecuritySpecified);
    }

    if host.encountered_error() {
        tracing::debug!(%id, "errors reported, not emitting url reservation");
        return None;
    }

    let record = UrlReservation {
        id,
        handle_existing,
        sddl,
        url: url?,
        component_id: context.component_id.clone(),
    };
    tracing::debug!(id = %record.id, url = %record.url, "emitting url reservation");
    host.add_url_reservation(position, record.clone());

    let (install, uninstall) = action_handlers(host.platform());
    host.create_reference(position, CUSTOM_ACTION_TABLE, install);
    host.create_reference(position, CUSTOM_ACTION_TABLE, uninstall);

    Some(record)
}
