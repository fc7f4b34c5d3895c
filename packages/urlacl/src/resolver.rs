//! Resolution of attribute tokens to enumeration values.

use crate::attributes::AttributeValue;
use crate::host::CompilerHost;
use crate::messages::Message;

/// Enumeration authored as one of a closed set of tokens.
pub trait TokenEnum: Sized + Copy {
    /// Every legal token, in the order listed in diagnostics.
    const TOKENS: &'static [&'static str];

    /// Map a token to its value. Tokens are case-sensitive.
    fn from_token(token: &str) -> Option<Self>;
}

/// Resolve an authored token, keeping `current` when the token is not legal.
///
/// An illegal token is reported together with the full list of legal
/// tokens; parsing carries on with the previous value so the rest of the
/// element still gets validated in the same pass.
///
/// Returns the resolved value and whether the token was legal.
pub fn resolve_token<E: TokenEnum>(
    value: &AttributeValue<'_>,
    current: E,
    host: &mut dyn CompilerHost,
) -> (E, bool) {
    match E::from_token(value.value) {
        Some(resolved) => (resolved, true),
        None => {
            host.report(
                value.position,
                Message::IllegalAttributeValue {
                    element: value.element.to_string(),
                    attribute: value.name.to_string(),
                    value: value.value.to_string(),
                    legal: E::TOKENS,
                },
            );
            (current, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CompilationSession;
    use crate::types::{HandleExisting, Platform, SourcePosition, UrlAceRights};

    fn value(name: &'static str, token: &'static str) -> AttributeValue<'static> {
        AttributeValue {
            element: "UrlReservation",
            name,
            value: token,
            position: SourcePosition::new(1, 1),
        }
    }

    #[test]
    fn test_resolve_legal_token() {
        let mut session = CompilationSession::new(Platform::X86);
        let (resolved, ok) = resolve_token(
            &value("HandleExisting", "fail"),
            HandleExisting::default(),
            &mut session,
        );
        assert_eq!(resolved, HandleExisting::Fail);
        assert!(ok);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_resolve_illegal_token_keeps_default() {
        let mut session = CompilationSession::new(Platform::X86);
        let (resolved, ok) = resolve_token(
            &value("HandleExisting", "bogus"),
            HandleExisting::default(),
            &mut session,
        );
        assert_eq!(resolved, HandleExisting::Replace);
        assert!(!ok);
        assert_eq!(
            session.diagnostics()[0].message,
            Message::IllegalAttributeValue {
                element: "UrlReservation".to_string(),
                attribute: "HandleExisting".to_string(),
                value: "bogus".to_string(),
                legal: &["replace", "ignore", "fail"],
            }
        );
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut session = CompilationSession::new(Platform::X86);
        let (resolved, ok) = resolve_token(&value("Rights", "All"), UrlAceRights::Register, &mut session);
        assert_eq!(resolved, UrlAceRights::Register);
        assert!(!ok);
        assert!(session.encountered_error());
    }
}
