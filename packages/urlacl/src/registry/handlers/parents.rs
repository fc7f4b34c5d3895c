//! Parent handlers resolving the context of extension elements.

use crate::config::{
    COMPONENT_ELEMENT, COMPONENT_ID_KEY, SERVICE_INSTALL_COMPONENT_ID_KEY,
    SERVICE_INSTALL_ELEMENT, SERVICE_INSTALL_NAME_KEY, SERVICE_PRINCIPAL_PREFIX,
};
use crate::messages::Message;
use crate::registry::handler::ParentHandler;
use crate::registry::types::{ParentContext, ParseContext};

fn require(context: &ParentContext, key: &str, element: &str) -> Result<String, Message> {
    context
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| Message::MissingContextValue {
            element: element.to_string(),
            key: key.to_string(),
        })
}

/// Handler for extension elements under `<Component>`.
///
/// Records are owned by the component; there is no ambient principal.
pub struct ComponentParent;

impl ParentHandler for ComponentParent {
    fn resolve(&self, context: &ParentContext) -> Result<ParseContext, Message> {
        let component_id = require(context, COMPONENT_ID_KEY, COMPONENT_ELEMENT)?;
        Ok(ParseContext::new(component_id))
    }
}

/// Handler for extension elements under `<ServiceInstall>`.
///
/// Records are owned by the service's component. The ambient principal is
/// the service's virtual account, `NT SERVICE\<name>`; a service without a
/// name has no ambient principal.
pub struct ServiceInstallParent;

impl ParentHandler for ServiceInstallParent {
    fn resolve(&self, context: &ParentContext) -> Result<ParseContext, Message> {
        let component_id = require(context, SERVICE_INSTALL_COMPONENT_ID_KEY, SERVICE_INSTALL_ELEMENT)?;
        let principal = context
            .get(SERVICE_INSTALL_NAME_KEY)
            .map(|name| format!("{SERVICE_PRINCIPAL_PREFIX}{name}"));
        Ok(ParseContext::new(component_id).with_security_principal(principal))
    }
}
