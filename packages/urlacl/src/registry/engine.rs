//! Parse engine that dispatches extension elements using the registry.

use roxmltree::Node;

use super::core::ElementRegistry;
use super::types::ParentContext;
use crate::host::CompilerHost;
use crate::messages::Message;
use crate::xml::{get_tag_name, is_core_element, is_http_element, source_position};

/// Engine that dispatches extension elements to their registered handlers.
///
/// The parent element decides the context the element is parsed in; the
/// element's own name decides the handler. Any combination the registry
/// does not know is reported as an unexpected element and skipped.
pub struct ParseEngine {
    registry: ElementRegistry,
}

impl ParseEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }

    /// Parse one extension element found under `parent`.
    ///
    /// Only core-schema parents are routed; a namesake from another
    /// namespace is an unexpected parent. If the parent lacks a context
    /// value it requires, that is reported at the parent and the element is
    /// skipped.
    ///
    /// # Arguments
    /// * `parent` - The enclosing element
    /// * `element` - The element to parse
    /// * `context` - Values the host knows about the enclosing elements
    /// * `host` - The hosting compiler
    pub fn parse_element(
        &self,
        parent: Node<'_, '_>,
        element: Node<'_, '_>,
        context: &ParentContext,
        host: &mut dyn CompilerHost,
    ) {
        if !is_http_element(element) {
            host.parse_extension_element(parent, element);
            return;
        }

        let parent_name = get_tag_name(parent);
        let element_name = get_tag_name(element);

        let routed = is_core_element(parent)
            .then(|| self.registry.get_parent(parent_name))
            .flatten()
            .zip(self.registry.get_handler(element_name));

        let Some((parent_handler, handler)) = routed else {
            host.report(
                source_position(element),
                Message::UnexpectedElement {
                    parent: parent_name.to_string(),
                    element: element_name.to_string(),
                },
            );
            return;
        };

        let parse_context = match parent_handler.resolve(context) {
            Ok(parse_context) => parse_context,
            Err(message) => {
                host.report(source_position(parent), message);
                return;
            }
        };
        tracing::trace!(
            parent = parent_name,
            element = element_name,
            component = %parse_context.component_id,
            "dispatching extension element"
        );
        handler.handle(element, &parse_context, host);
    }
}
