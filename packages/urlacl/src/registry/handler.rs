//! Handler trait definitions.

use roxmltree::Node;

use super::types::{ParentContext, ParseContext};
use crate::host::CompilerHost;
use crate::messages::Message;

/// Trait for extension element handlers.
///
/// Handlers process one kind of extension element, including its children,
/// and emit records through the host. Problems in the markup are reported
/// to the host, never returned.
pub trait ElementHandler: Send + Sync {
    /// Process the element.
    ///
    /// # Arguments
    /// * `node` - The extension element to process
    /// * `context` - Context resolved from the element's parent
    /// * `host` - The hosting compiler
    fn handle(&self, node: Node<'_, '_>, context: &ParseContext, host: &mut dyn CompilerHost);
}

/// Trait for parent elements that extension elements may appear under.
///
/// A parent handler turns the host's context values into the
/// [`ParseContext`] its extension children are parsed with.
pub trait ParentHandler: Send + Sync {
    /// Resolve the parse context for children of this parent.
    ///
    /// # Errors
    /// Returns the `MissingContextValue` diagnostic if the host did not
    /// supply a value this parent requires.
    fn resolve(&self, context: &ParentContext) -> Result<ParseContext, Message>;
}
