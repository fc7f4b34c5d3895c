//! Element registry for mapping tag names to handlers.

use std::collections::HashMap;

use super::handler::{ElementHandler, ParentHandler};

/// Registry mapping parent and extension element names to handlers.
///
/// Parent handlers are keyed by the local name of the enclosing element,
/// element handlers by the local name of the extension element.
pub struct ElementRegistry {
    parents: HashMap<String, Box<dyn ParentHandler>>,
    handlers: HashMap<String, Box<dyn ElementHandler>>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Register a parent element extension elements may appear under.
    pub fn register_parent(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl ParentHandler + 'static,
    ) {
        self.parents.insert(tag_name.into(), Box::new(handler));
    }

    /// Register a handler for an extension element.
    pub fn register(&mut self, tag_name: impl Into<String>, handler: impl ElementHandler + 'static) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Get the handler for a parent element.
    #[must_use]
    pub fn get_parent(&self, tag_name: &str) -> Option<&dyn ParentHandler> {
        self.parents.get(tag_name).map(|h| h.as_ref())
    }

    /// Get the handler for an extension element.
    #[must_use]
    pub fn get_handler(&self, tag_name: &str) -> Option<&dyn ElementHandler> {
        self.handlers.get(tag_name).map(|h| h.as_ref())
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
