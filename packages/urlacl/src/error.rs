//! Error types for the compiler.
//!
//! Problems in the authored markup are never errors here: they are reported
//! as [`Message`](crate::messages::Message) diagnostics and compilation
//! continues. `CompilerError` covers failures that stop a compilation
//! outright, such as unreadable input or output that cannot be written.

use thiserror::Error;

/// Main error type for the compiler library.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Unknown target platform name.
    #[error("Invalid platform: '{0}'. Expected one of x86, x64, arm64")]
    InvalidPlatform(String),

    /// Identifier does not match the identifier grammar.
    #[error("Invalid identifier: '{0}'. Identifiers start with a letter or underscore, contain only letters, digits, underscores and periods, and are at most 72 characters")]
    InvalidIdentifier(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Compilation finished with error diagnostics.
    #[error("Compilation failed with {errors} error(s)")]
    CompilationFailed { errors: usize },
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompilerError>;
