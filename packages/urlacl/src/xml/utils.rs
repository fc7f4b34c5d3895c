//! XML utility functions for navigating DOM trees and locating nodes in the source.

use roxmltree::{Attribute, Node};

use crate::config::{HTTP_NAMESPACE, WIX_NAMESPACE};
use crate::types::SourcePosition;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use urlacl_compiler::xml::get_tag_name;
///
/// let xml = r#"<http:UrlReservation xmlns:http="http://wixtoolset.org/schemas/v4/wxs/http"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "UrlReservation");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check whether an element belongs to the HTTP extension namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use urlacl_compiler::xml::is_http_element;
///
/// let xml = r#"<Component xmlns:http="http://wixtoolset.org/schemas/v4/wxs/http"><http:UrlReservation/></Component>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// assert!(!is_http_element(root));
/// assert!(is_http_element(root.first_element_child().unwrap()));
/// ```
pub fn is_http_element(node: Node<'_, '_>) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(HTTP_NAMESPACE)
}

/// Check whether an element belongs to the core schema.
///
/// Sources without a default namespace declaration count as core.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use urlacl_compiler::xml::is_core_element;
///
/// let xml = r#"<Package xmlns="http://wixtoolset.org/schemas/v4/wxs" xmlns:o="urn:other"><o:Component/></Package>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// assert!(is_core_element(root));
/// assert!(!is_core_element(root.first_element_child().unwrap()));
/// ```
pub fn is_core_element(node: Node<'_, '_>) -> bool {
    node.is_element()
        && match node.tag_name().namespace() {
            None => true,
            Some(namespace) => namespace == WIX_NAMESPACE,
        }
}

/// Check whether an attribute is one the extension itself interprets.
///
/// Unqualified attributes and attributes in the HTTP namespace qualify;
/// anything else belongs to another extension.
pub fn is_own_attribute(attribute: &Attribute<'_, '_>) -> bool {
    match attribute.namespace() {
        None => true,
        Some(namespace) => namespace == HTTP_NAMESPACE,
    }
}

/// Get all element children of a node, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use urlacl_compiler::xml::element_children;
///
/// let xml = r#"<root>text<a/><!-- note --><b/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(element_children(doc.root_element()).count(), 2);
/// ```
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get a non-empty attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.is_empty())
}

/// Find the node itself or its nearest ancestor that is a core element
/// with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use urlacl_compiler::xml::{find_core_element, get_attribute};
///
/// let xml = r#"<Component Id="C1"><ServiceInstall Name="Svc"/></Component>"#;
/// let doc = Document::parse(xml).unwrap();
/// let service = doc.root_element().first_element_child().unwrap();
/// let component = find_core_element(service, "Component").unwrap();
/// assert_eq!(get_attribute(component, "Id"), Some("C1"));
/// ```
pub fn find_core_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.ancestors()
        .find(|ancestor| is_core_element(*ancestor) && get_tag_name(*ancestor) == tag)
}

/// Location of an element as a path of local names with 1-based indexes
/// among same-named siblings, e.g. `/Package[1]/Component[2]`.
pub fn element_path(node: Node<'_, '_>) -> String {
    let mut segments: Vec<String> = node
        .ancestors()
        .filter(|ancestor| ancestor.is_element())
        .map(|element| {
            let index = std::iter::successors(element.prev_sibling_element(), |sibling| {
                sibling.prev_sibling_element()
            })
            .filter(|sibling| sibling.tag_name() == element.tag_name())
            .count();
            format!("{}[{}]", get_tag_name(element), index + 1)
        })
        .collect();
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// Source position of an element's start tag.
pub fn source_position(node: Node<'_, '_>) -> SourcePosition {
    node.document().text_pos_at(node.range().start).into()
}

/// Source position of an attribute on an element.
pub fn attribute_position(node: Node<'_, '_>, attribute: &Attribute<'_, '_>) -> SourcePosition {
    node.document().text_pos_at(attribute.range().start).into()
}
