//! URL reservation compiler extension.
//!
//! This crate translates `UrlReservation` and `UrlAce` markup elements from
//! the HTTP extension namespace into typed records for the
//! `WixHttpUrlReservation` and `WixHttpUrlAce` tables, plus references to
//! the platform-specific custom actions that apply the reservations at
//! install time.
//!
//! # Example
//!
//! ```
//! use urlacl_compiler::{compile_document, Platform};
//!
//! let xml = r#"<Package xmlns:http="http://wixtoolset.org/schemas/v4/wxs/http">
//!   <Component Id="WebHost">
//!     <http:UrlReservation Url="http://+:8080/api/" Sddl="D:(A;;GX;;;WD)" />
//!   </Component>
//! </Package>"#;
//! let doc = roxmltree::Document::parse(xml).unwrap();
//! let output = compile_document(&doc, Platform::X86).into_output();
//!
//! let records = output.records.unwrap();
//! assert_eq!(records.url_reservations.len(), 1);
//! assert_eq!(records.url_reservations[0].component_id, "WebHost");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace, element/attribute names, action handler names
//! - [`types`]: Records, enumerations and source positions
//! - [`messages`]: Diagnostics reported while compiling
//! - [`error`]: Fatal error type and Result alias
//! - [`host`]: The contract the hosting compiler implements
//! - [`attributes`]: Attribute extraction with namespace partitioning
//! - [`resolver`]: Token to enumeration resolution
//! - [`identifier`]: Deterministic identifier derivation
//! - [`registry`]: Element dispatch and the reservation/ACE handlers
//! - [`session`]: In-memory compilation session and document walker
//! - [`xml`]: XML utilities
//! - [`cli`]: Command-line interface

pub mod attributes;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod identifier;
pub mod messages;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod types;
pub mod xml;

pub use error::{CompilerError, Result};
pub use host::CompilerHost;
pub use identifier::{derive_identifier, Identifier};
pub use messages::{Message, Severity};
pub use session::{compile_document, CompilationOutput, CompilationSession, Diagnostic, RecordSet};
pub use types::{HandleExisting, Platform, SourcePosition, UrlAce, UrlAceRights, UrlReservation};
