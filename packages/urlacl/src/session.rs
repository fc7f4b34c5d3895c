//! In-memory compilation session.
//!
//! [`CompilationSession`] is a self-contained [`CompilerHost`]: it collects
//! diagnostics, keeps the error flag, stores rows and references, and
//! rejects rows whose identifier already exists in their table. No other
//! extensions are loaded, so foreign-namespace markup is recorded and
//! reported as unsupported.
//!
//! [`compile_document`] walks a whole document and dispatches every HTTP
//! extension element to the registry, building the parent context the way
//! the hosting compiler does.

use std::collections::HashSet;
use std::fmt;

use roxmltree::{Attribute, Document, Node};
use serde::Serialize;

use crate::config::{
    COMPONENT_ELEMENT, COMPONENT_ID_KEY, SERVICE_INSTALL_COMPONENT_ID_KEY,
    SERVICE_INSTALL_ELEMENT, SERVICE_INSTALL_NAME_KEY, URL_ACE_TABLE, URL_RESERVATION_TABLE,
};
use crate::host::CompilerHost;
use crate::identifier::{derive_identifier, Identifier};
use crate::messages::{Message, Severity};
use crate::registry::{create_http_registry, ParentContext, ParseEngine};
use crate::types::{ElementKind, Platform, SourcePosition, UrlAce, UrlReservation};
use crate::xml::{
    attribute_position, element_path, find_core_element, get_attribute, get_tag_name,
    is_core_element, is_http_element, source_position,
};

/// A reported diagnostic with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: SourcePosition,
    pub message: Message,
}

impl Diagnostic {
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.message.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.position,
            self.severity().as_str(),
            self.message
        )
    }
}

/// Dependency on a named row of another table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    pub table: String,
    pub name: String,
}

impl Reference {
    #[must_use]
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }
}

/// Foreign-namespace attribute or element handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionItem {
    /// Element carrying the attribute, or parent of the element.
    pub owner: String,
    pub namespace: String,
    pub name: String,
    pub position: SourcePosition,
}

/// Rows and references emitted during a compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    pub url_reservations: Vec<UrlReservation>,
    pub url_aces: Vec<UrlAce>,
    pub references: Vec<Reference>,
}

impl RecordSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url_reservations.is_empty() && self.url_aces.is_empty() && self.references.is_empty()
    }
}

/// Final result of a compilation.
#[derive(Debug, Clone)]
pub struct CompilationOutput {
    pub diagnostics: Vec<Diagnostic>,
    /// Emitted records; `None` when any error was reported.
    pub records: Option<RecordSet>,
}

impl CompilationOutput {
    /// Number of error-severity diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }
}

/// In-memory host for one compilation.
#[derive(Debug)]
pub struct CompilationSession {
    platform: Platform,
    diagnostics: Vec<Diagnostic>,
    encountered_error: bool,
    records: RecordSet,
    reference_keys: HashSet<Reference>,
    reservation_ids: HashSet<Identifier>,
    ace_ids: HashSet<Identifier>,
    extension_attributes: Vec<ExtensionItem>,
    extension_elements: Vec<ExtensionItem>,
}

impl CompilationSession {
    /// Create a new session targeting `platform`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            diagnostics: Vec::new(),
            encountered_error: false,
            records: RecordSet::default(),
            reference_keys: HashSet::new(),
            reservation_ids: HashSet::new(),
            ace_ids: HashSet::new(),
            extension_attributes: Vec::new(),
            extension_elements: Vec::new(),
        }
    }

    /// Diagnostics reported so far, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Records emitted so far.
    #[must_use]
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// References declared so far, without duplicates.
    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.records.references
    }

    /// Foreign-namespace attributes handed to the host.
    #[must_use]
    pub fn extension_attributes(&self) -> &[ExtensionItem] {
        &self.extension_attributes
    }

    /// Foreign-namespace elements handed to the host.
    #[must_use]
    pub fn extension_elements(&self) -> &[ExtensionItem] {
        &self.extension_elements
    }

    /// Finish the compilation.
    ///
    /// Records are only returned when no error was reported anywhere.
    #[must_use]
    pub fn into_output(self) -> CompilationOutput {
        let records = (!self.encountered_error).then_some(self.records);
        CompilationOutput {
            diagnostics: self.diagnostics,
            records,
        }
    }

    fn duplicate(&mut self, position: SourcePosition, table: &str, id: &Identifier) {
        tracing::warn!(table, %id, "duplicate row rejected");
        self.report(
            position,
            Message::DuplicateSymbol {
                table: table.to_string(),
                id: id.to_string(),
            },
        );
    }
}

impl CompilerHost for CompilationSession {
    fn report(&mut self, position: SourcePosition, message: Message) {
        if message.is_error() {
            self.encountered_error = true;
        }
        self.diagnostics.push(Diagnostic { position, message });
    }

    fn encountered_error(&self) -> bool {
        self.encountered_error
    }

    fn add_url_reservation(&mut self, position: SourcePosition, record: UrlReservation) {
        if !self.reservation_ids.insert(record.id.clone()) {
            self.duplicate(position, URL_RESERVATION_TABLE, &record.id);
            return;
        }
        self.records.url_reservations.push(record);
    }

    fn add_url_ace(&mut self, position: SourcePosition, record: UrlAce) {
        if !self.ace_ids.insert(record.id.clone()) {
            self.duplicate(position, URL_ACE_TABLE, &record.id);
            return;
        }
        self.records.url_aces.push(record);
    }

    fn create_reference(&mut self, _position: SourcePosition, table: &str, name: &str) {
        let reference = Reference::new(table, name);
        if self.reference_keys.insert(reference.clone()) {
            self.records.references.push(reference);
        }
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn parse_extension_attribute(&mut self, element: Node<'_, '_>, attribute: &Attribute<'_, '_>) {
        let item = ExtensionItem {
            owner: get_tag_name(element).to_string(),
            namespace: attribute.namespace().unwrap_or_default().to_string(),
            name: attribute.name().to_string(),
            position: attribute_position(element, attribute),
        };
        self.report(
            item.position,
            Message::UnsupportedExtensionAttribute {
                element: item.owner.clone(),
                namespace: item.namespace.clone(),
                attribute: item.name.clone(),
            },
        );
        self.extension_attributes.push(item);
    }

    fn parse_extension_element(&mut self, parent: Node<'_, '_>, element: Node<'_, '_>) {
        let item = ExtensionItem {
            owner: get_tag_name(parent).to_string(),
            namespace: element.tag_name().namespace().unwrap_or_default().to_string(),
            name: get_tag_name(element).to_string(),
            position: source_position(element),
        };
        self.report(
            item.position,
            Message::UnsupportedExtensionElement {
                parent: item.owner.clone(),
                namespace: item.namespace.clone(),
                element: item.name.clone(),
            },
        );
        self.extension_elements.push(item);
    }
}

/// Build the context values the hosting compiler supplies for `parent`.
///
/// A component without an `Id` gets the identifier the host would
/// generate for it, derived from its location in the document.
fn parent_context(parent: Node<'_, '_>) -> ParentContext {
    let mut context = ParentContext::new();

    if let Some(component) = find_core_element(parent, COMPONENT_ELEMENT) {
        let component_id = get_attribute(component, "Id").map_or_else(
            || {
                let path = element_path(component);
                derive_identifier(ElementKind::Component, &[Some(path.as_str())]).to_string()
            },
            str::to_string,
        );
        context.insert(SERVICE_INSTALL_COMPONENT_ID_KEY, component_id.as_str());
        context.insert(COMPONENT_ID_KEY, component_id);
    }

    if is_core_element(parent) && get_tag_name(parent) == SERVICE_INSTALL_ELEMENT {
        if let Some(name) = get_attribute(parent, "Name") {
            context.insert(SERVICE_INSTALL_NAME_KEY, name);
        }
    }

    context
}

/// Compile every HTTP extension element in a document.
///
/// Extension elements are visited in document order. Elements anywhere
/// inside another extension element belong to that element's handler, or
/// to whichever extension owns the foreign element they sit in.
#[must_use]
pub fn compile_document(doc: &Document<'_>, platform: Platform) -> CompilationSession {
    let engine = ParseEngine::new(create_http_registry());
    let mut session = CompilationSession::new(platform);

    for element in doc.descendants().filter(|n| is_http_element(*n)) {
        let Some(parent) = element.parent_element() else {
            tracing::warn!(
                element = get_tag_name(element),
                "extension element at document root, skipping"
            );
            continue;
        };
        if parent.ancestors().any(is_http_element) {
            continue;
        }

        let context = parent_context(parent);
        engine.parse_element(parent, element, &context, &mut session);
    }

    tracing::debug!(
        platform = %platform,
        reservations = session.records.url_reservations.len(),
        aces = session.records.url_aces.len(),
        diagnostics = session.diagnostics.len(),
        "compilation finished"
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandleExisting;

    const NS: &str = "http://wixtoolset.org/schemas/v4/wxs/http";

    fn reservation(id: &str) -> UrlReservation {
        UrlReservation {
            id: Identifier::new(id),
            handle_existing: HandleExisting::Replace,
            sddl: Some("D:".to_string()),
            url: "http://+:80/".to_string(),
            component_id: "C".to_string(),
        }
    }

    #[test]
    fn test_report_sets_error_flag_for_errors_only() {
        let mut session = CompilationSession::new(Platform::X86);
        session.report(
            SourcePosition::new(1, 1),
            Message::UnsupportedExtensionElement {
                parent: "Component".to_string(),
                namespace: "urn:x".to_string(),
                element: "X".to_string(),
            },
        );
        assert!(!session.encountered_error());

        session.report(SourcePosition::new(2, 1), Message::NoSecuritySpecified);
        assert!(session.encountered_error());
        assert_eq!(session.diagnostics().len(), 2);
    }

    #[test]
    fn test_references_are_idempotent() {
        let mut session = CompilationSession::new(Platform::X86);
        let position = SourcePosition::default();
        session.create_reference(position, "CustomAction", "A");
        session.create_reference(position, "CustomAction", "A");
        session.create_reference(position, "CustomAction", "B");

        assert_eq!(
            session.references(),
            &[
                Reference::new("CustomAction", "A"),
                Reference::new("CustomAction", "B")
            ]
        );
    }

    #[test]
    fn test_duplicate_reservation_rejected() {
        let mut session = CompilationSession::new(Platform::X86);
        session.add_url_reservation(SourcePosition::new(1, 1), reservation("R"));
        session.add_url_reservation(SourcePosition::new(5, 1), reservation("R"));

        assert_eq!(session.records().url_reservations.len(), 1);
        assert_eq!(
            session.diagnostics()[0],
            Diagnostic {
                position: SourcePosition::new(5, 1),
                message: Message::DuplicateSymbol {
                    table: "WixHttpUrlReservation".to_string(),
                    id: "R".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_output_withholds_records_after_error() {
        let mut session = CompilationSession::new(Platform::X86);
        session.add_url_reservation(SourcePosition::new(1, 1), reservation("R"));
        session.report(SourcePosition::new(2, 1), Message::NoSecuritySpecified);

        let output = session.into_output();
        assert!(output.records.is_none());
        assert_eq!(output.error_count(), 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            position: SourcePosition::new(4, 7),
            message: Message::NoSecuritySpecified,
        };
        assert!(diagnostic.to_string().starts_with("4:7: error: The UrlReservation element"));
    }

    #[test]
    fn test_parent_context_for_service_install() {
        let xml = r#"<Component Id="SvcComp"><ServiceInstall Name="Svc1"/></Component>"#;
        let doc = Document::parse(xml).unwrap();
        let service = doc.root_element().first_element_child().unwrap();
        let context = parent_context(service);

        assert_eq!(context.get("ComponentId"), Some("SvcComp"));
        assert_eq!(context.get("ServiceInstallComponentId"), Some("SvcComp"));
        assert_eq!(context.get("ServiceInstallName"), Some("Svc1"));
    }

    #[test]
    fn test_compile_document_skips_nested_extension_elements() {
        let xml = format!(
            r#"<Package xmlns:http="{NS}">
                 <Component Id="C1">
                   <http:UrlReservation Url="http://+:80/">
                     <http:UrlAce SecurityPrincipal="Everyone"/>
                   </http:UrlReservation>
                 </Component>
               </Package>"#
        );
        let doc = Document::parse(&xml).unwrap();
        let session = compile_document(&doc, Platform::X86);

        assert!(session.diagnostics().is_empty());
        assert_eq!(session.records().url_reservations.len(), 1);
        assert_eq!(session.records().url_aces.len(), 1);
    }

    #[test]
    fn test_parent_context_derives_anonymous_component_id() {
        let xml = r#"<Package><Component/><Component><ServiceInstall Name="Svc1"/></Component></Package>"#;
        let doc = Document::parse(xml).unwrap();
        let service = doc.descendants().find(|n| n.has_tag_name("ServiceInstall")).unwrap();
        let context = parent_context(service);

        let expected = derive_identifier(ElementKind::Component, &[Some("/Package[1]/Component[2]")]);
        assert_eq!(context.get("ComponentId"), Some(expected.as_str()));
        assert_eq!(context.get("ServiceInstallComponentId"), Some(expected.as_str()));
    }

    #[test]
    fn test_parent_context_ignores_foreign_component() {
        let xml = r#"<Component Id="Core"><o:Component xmlns:o="urn:other" Id="Foreign"/></Component>"#;
        let doc = Document::parse(xml).unwrap();
        let foreign = doc.root_element().first_element_child().unwrap();
        let context = parent_context(foreign);

        assert_eq!(context.get("ComponentId"), Some("Core"));
    }

    #[test]
    fn test_compile_document_anonymous_component_keeps_walking() {
        let xml = format!(
            r#"<Package xmlns:http="{NS}">
  <Component Id="C1">
    <http:UrlReservation Url="http://+:80/a/" Sddl="D:" HandleExisting="bogus"/>
  </Component>
  <Component>
    <http:UrlReservation Url="http://+:80/b/" Sddl="D:"/>
  </Component>
  <Component Id="C3">
    <http:UrlReservation Url="http://+:80/c/"/>
  </Component>
</Package>"#
        );
        let doc = Document::parse(&xml).unwrap();
        let session = compile_document(&doc, Platform::X86);

        let reported: Vec<(u32, bool)> = session
            .diagnostics()
            .iter()
            .map(|d| (d.position.line, matches!(d.message, Message::NoSecuritySpecified)))
            .collect();
        assert_eq!(reported, vec![(3, false), (9, true)]);
    }

    #[test]
    fn test_compile_document_leaves_markup_inside_foreign_elements() {
        let xml = format!(
            r#"<Component Id="C1" xmlns:http="{NS}" xmlns:o="urn:o">
  <http:UrlReservation Url="http://+:80/" Sddl="D:">
    <o:Note><http:UrlAce SecurityPrincipal="Everyone"/></o:Note>
  </http:UrlReservation>
</Component>"#
        );
        let doc = Document::parse(&xml).unwrap();
        let session = compile_document(&doc, Platform::X86);

        assert_eq!(session.diagnostics().len(), 1);
        assert!(matches!(
            session.diagnostics()[0].message,
            Message::UnsupportedExtensionElement { .. }
        ));
        assert!(!session.encountered_error());
        assert_eq!(session.records().url_reservations.len(), 1);
        assert!(session.records().url_aces.is_empty());
    }
}
