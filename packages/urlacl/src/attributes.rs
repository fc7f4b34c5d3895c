//! Attribute extraction for extension elements.
//!
//! Each element kind declares its attributes as a closed enum implementing
//! [`AttributeSet`]. [`for_each_attribute`] walks the element's attributes
//! once in document order and resolves each name to its enum variant, so
//! the element parsers match on variants instead of strings.

use roxmltree::Node;

use crate::config::validate_identifier;
use crate::host::CompilerHost;
use crate::identifier::Identifier;
use crate::messages::Message;
use crate::types::SourcePosition;
use crate::xml::{attribute_position, get_tag_name, is_own_attribute};

/// Closed set of attributes an element understands.
pub trait AttributeSet: Sized + Copy + PartialEq {
    /// Resolve an attribute's local name.
    fn from_local_name(name: &str) -> Option<Self>;

    /// Local name of the attribute, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Attribute value together with where it was authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    pub element: &'a str,
    pub name: &'static str,
    pub value: &'a str,
    pub position: SourcePosition,
}

impl AttributeValue<'_> {
    /// Read the value as a string, reporting an empty value.
    ///
    /// An empty value is treated as not authored.
    pub fn string(&self, host: &mut dyn CompilerHost) -> Option<String> {
        if self.value.is_empty() {
            host.report(
                self.position,
                Message::IllegalEmptyAttributeValue {
                    element: self.element.to_string(),
                    attribute: self.name.to_string(),
                },
            );
            return None;
        }
        Some(self.value.to_string())
    }

    /// Read the value as an identifier, reporting illegal syntax.
    ///
    /// An illegal identifier is still returned so that the rest of the
    /// element can be validated with it.
    pub fn identifier(&self, host: &mut dyn CompilerHost) -> Option<Identifier> {
        let value = self.string(host)?;
        if validate_identifier(&value).is_err() {
            host.report(
                self.position,
                Message::IllegalIdentifier {
                    element: self.element.to_string(),
                    attribute: self.name.to_string(),
                    value: value.clone(),
                },
            );
        }
        Some(Identifier::new(value))
    }
}

/// Visit every attribute of an element exactly once, in document order.
///
/// Attributes without a namespace or in the HTTP namespace are resolved
/// through `A`; names `A` does not know are reported as unexpected. An
/// attribute authored both unqualified and HTTP-qualified is reported as a
/// duplicate and only its first occurrence is visited. Attributes in any
/// other namespace are forwarded to the host unchanged.
pub fn for_each_attribute<'a, A, F>(node: Node<'a, '_>, host: &mut dyn CompilerHost, mut visit: F)
where
    A: AttributeSet,
    F: FnMut(A, AttributeValue<'a>, &mut dyn CompilerHost),
{
    let element = get_tag_name(node);
    let mut seen: Vec<A> = Vec::new();

    for attribute in node.attributes() {
        if !is_own_attribute(&attribute) {
            host.parse_extension_attribute(node, &attribute);
            continue;
        }

        let position = attribute_position(node, &attribute);
        match A::from_local_name(attribute.name()) {
            Some(known) if seen.contains(&known) => {
                host.report(
                    position,
                    Message::DuplicateAttribute {
                        element: element.to_string(),
                        attribute: known.name().to_string(),
                    },
                );
            }
            Some(known) => {
                seen.push(known);
                let value = AttributeValue {
                    element,
                    name: known.name(),
                    value: attribute.value(),
                    position,
                };
                visit(known, value, host);
            }
            None => {
                tracing::trace!(element, attribute = attribute.name(), "unexpected attribute");
                host.report(
                    position,
                    Message::UnexpectedAttribute {
                        element: element.to_string(),
                        attribute: attribute.name().to_string(),
                    },
                );
            }
        }
    }
}
