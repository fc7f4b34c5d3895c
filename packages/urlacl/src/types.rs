//! Core data types for the compiler.
//!
//! These types are the typed rows of the `WixHttpUrlReservation` and
//! `WixHttpUrlAce` tables, together with the enumerations stored in them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CompilerError;
use crate::identifier::Identifier;
use crate::resolver::TokenEnum;

/// Line and column of a node or attribute in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<roxmltree::TextPos> for SourcePosition {
    fn from(pos: roxmltree::TextPos) -> Self {
        Self::new(pos.row, pos.col)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Element kinds whose identifiers can be derived when not authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A component without an `Id`, as the hosting compiler names it.
    Component,
    UrlReservation,
    UrlAce,
}

impl ElementKind {
    /// Short tag prefixed to identifiers derived for this kind.
    #[must_use]
    pub fn identifier_prefix(&self) -> &'static str {
        match self {
            Self::Component => "cmp",
            Self::UrlReservation => "url",
            Self::UrlAce => "ace",
        }
    }
}

/// How an existing reservation for the same URL is treated at install time.
///
/// Serialized as its table value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleExisting {
    /// Remove the existing reservation and create ours.
    #[default]
    Replace,
    /// Leave the existing reservation alone.
    Ignore,
    /// Fail the installation.
    Fail,
}

impl HandleExisting {
    /// Numeric value stored in the reservation table.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Replace => 0,
            Self::Ignore => 1,
            Self::Fail => 2,
        }
    }
}

impl Serialize for HandleExisting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl TokenEnum for HandleExisting {
    const TOKENS: &'static [&'static str] = &["replace", "ignore", "fail"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "replace" => Some(Self::Replace),
            "ignore" => Some(Self::Ignore),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }

}

/// Rights granted to a security principal on a reserved URL.
///
/// Serialized as its access mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlAceRights {
    /// Register and delegate (GENERIC_ALL).
    #[default]
    All,
    /// Delegate sub-URLs to other principals (GENERIC_WRITE).
    Delegate,
    /// Register to listen on the URL (GENERIC_EXECUTE).
    Register,
}

impl UrlAceRights {
    /// Access mask stored in the ACE table.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::All => 0x1000_0000,
            Self::Delegate => 0x4000_0000,
            Self::Register => 0x2000_0000,
        }
    }
}

impl Serialize for UrlAceRights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

impl TokenEnum for UrlAceRights {
    const TOKENS: &'static [&'static str] = &["all", "delegate", "register"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "delegate" => Some(Self::Delegate),
            "register" => Some(Self::Register),
            _ => None,
        }
    }

}

/// Target platform of the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    X86,
    X64,
    Arm64,
}

impl Platform {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "intel" => Ok(Self::X86),
            "x64" | "amd64" => Ok(Self::X64),
            "arm64" => Ok(Self::Arm64),
            _ => Err(CompilerError::InvalidPlatform(s.to_string())),
        }
    }
}

/// Row of the `WixHttpUrlReservation` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlReservation {
    pub id: Identifier,
    pub handle_existing: HandleExisting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sddl: Option<String>,
    pub url: String,
    pub component_id: String,
}

/// Row of the `WixHttpUrlAce` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlAce {
    pub id: Identifier,
    pub reservation_id: Identifier,
    pub security_principal: String,
    pub rights: UrlAceRights,
}
