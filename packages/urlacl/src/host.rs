//! Contract between the extension and its hosting compiler.

use roxmltree::{Attribute, Node};

use crate::messages::Message;
use crate::types::{Platform, SourcePosition, UrlAce, UrlReservation};

/// Services the hosting compiler provides to the extension.
///
/// The host owns the diagnostics, the error flag and the output tables.
/// The extension only appends to them and never reads records back.
pub trait CompilerHost {
    /// Report a diagnostic. Error-severity messages set the error flag.
    fn report(&mut self, position: SourcePosition, message: Message);

    /// Whether any error has been reported in this compilation so far.
    fn encountered_error(&self) -> bool;

    /// Append a row to the `WixHttpUrlReservation` table.
    fn add_url_reservation(&mut self, position: SourcePosition, record: UrlReservation);

    /// Append a row to the `WixHttpUrlAce` table.
    fn add_url_ace(&mut self, position: SourcePosition, record: UrlAce);

    /// Declare a dependency on a named row of another table.
    ///
    /// Declaring the same reference twice must be a no-op.
    fn create_reference(&mut self, position: SourcePosition, table: &str, name: &str);

    /// Target platform of this compilation.
    fn platform(&self) -> Platform;

    /// Hand a foreign-namespace attribute to whichever extension owns it.
    fn parse_extension_attribute(&mut self, element: Node<'_, '_>, attribute: &Attribute<'_, '_>);

    /// Hand a foreign-namespace element to whichever extension owns it.
    fn parse_extension_element(&mut self, parent: Node<'_, '_>, element: Node<'_, '_>);
}
