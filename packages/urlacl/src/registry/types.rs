//! Types for the element registry system.

use std::collections::HashMap;

/// String values the hosting compiler knows about the enclosing elements,
/// keyed by names such as `ComponentId` or `ServiceInstallName`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentContext {
    values: HashMap<String, String>,
}

impl ParentContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a value. Empty values count as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParentContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

/// Context an extension element is parsed in, resolved from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Component that owns the records emitted for the element.
    pub component_id: String,

    /// Principal applied to ACEs that do not name one.
    pub security_principal: Option<String>,
}

impl ParseContext {
    /// Create a parse context without an ambient principal.
    #[must_use]
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            security_principal: None,
        }
    }

    /// Set the ambient security principal.
    #[must_use]
    pub fn with_security_principal(mut self, principal: Option<String>) -> Self {
        self.security_principal = principal;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_context_get() {
        let context: ParentContext = [("ComponentId", "C1"), ("ServiceInstallName", "")]
            .into_iter()
            .collect();
        assert_eq!(context.get("ComponentId"), Some("C1"));
        assert_eq!(context.get("ServiceInstallName"), None);
        assert_eq!(context.get("Missing"), None);
    }

    #[test]
    fn test_parse_context_new() {
        let ctx = ParseContext::new("C1").with_security_principal(Some("NT SERVICE\\Svc".to_string()));
        assert_eq!(ctx.component_id, "C1");
        assert_eq!(ctx.security_principal.as_deref(), Some("NT SERVICE\\Svc"));
    }
}
