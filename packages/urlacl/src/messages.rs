//! Diagnostics reported while compiling.
//!
//! Every problem in authored markup becomes a `Message` sent to the host.
//! Compilation keeps going after any of them so that one run surfaces as
//! many problems as possible.

use thiserror::Error;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Diagnostic message kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Message {
    /// Element is not allowed under its parent.
    #[error("The {parent} element contains an unexpected child element '{element}'.")]
    UnexpectedElement { parent: String, element: String },

    /// Attribute in our namespace that the element does not define.
    #[error("The {element} element contains an unexpected attribute '{attribute}'.")]
    UnexpectedAttribute { element: String, attribute: String },

    /// Same attribute authored both unqualified and namespace-qualified.
    #[error("The {element}/@{attribute} attribute was specified more than once. Only the first value is used.")]
    DuplicateAttribute { element: String, attribute: String },

    /// Token outside the closed set of legal values.
    #[error(
        "The {element}/@{attribute} attribute's value, '{value}', is not one of the legal options: '{}'.",
        .legal.join("', '")
    )]
    IllegalAttributeValue {
        element: String,
        attribute: String,
        value: String,
        legal: &'static [&'static str],
    },

    /// Attribute value that is present but empty.
    #[error("The {element}/@{attribute} attribute's value cannot be an empty string. If a value is not required, simply remove the entire attribute.")]
    IllegalEmptyAttributeValue { element: String, attribute: String },

    /// Identifier that does not follow the identifier grammar.
    #[error("The {element}/@{attribute} attribute's value, '{value}', is not a legal identifier. Identifiers may contain ASCII characters A-Z, a-z, digits, underscores (_), or periods (.). Every identifier must begin with either a letter or an underscore and be at most 72 characters long.")]
    IllegalIdentifier {
        element: String,
        attribute: String,
        value: String,
    },

    /// Child element conflicting with an attribute set on its parent.
    #[error("The {parent}/@{attribute} attribute cannot be specified when a {child} element is nested underneath the {parent} element.")]
    IllegalParentAttributeWhenNested {
        parent: String,
        attribute: String,
        child: String,
    },

    /// Required attribute that was not authored.
    #[error("The {element}/@{attribute} attribute was not found; it is required.")]
    ExpectedAttribute { element: String, attribute: String },

    /// Reservation with neither a security descriptor nor ACEs.
    #[error("The UrlReservation element doesn't identify the security for the reservation. You must either specify the Sddl attribute, or provide child UrlAce elements.")]
    NoSecuritySpecified,

    /// Enclosing element that does not supply a value its extension
    /// children depend on.
    #[error("The {element} element does not provide the {key} value required by its extension elements.")]
    MissingContextValue { element: String, key: String },

    /// Row whose identifier already exists in its table.
    #[error("Duplicate symbol '{table}:{id}' found.")]
    DuplicateSymbol { table: String, id: String },

    /// Foreign-namespace attribute no loaded extension handles.
    #[error("The {element} element contains an unsupported extension attribute '{namespace}:{attribute}'. It will be ignored.")]
    UnsupportedExtensionAttribute {
        element: String,
        namespace: String,
        attribute: String,
    },

    /// Foreign-namespace element no loaded extension handles.
    #[error("The {parent} element contains an unsupported extension element '{namespace}:{element}'. It will be ignored.")]
    UnsupportedExtensionElement {
        parent: String,
        namespace: String,
        element: String,
    },
}

impl Message {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnsupportedExtensionAttribute { .. } | Self::UnsupportedExtensionElement { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}
