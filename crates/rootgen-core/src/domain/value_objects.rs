//! Domain value objects: DeclKind, DirRole.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DeclKind ──────────────────────────────────────────────────────────────────

/// Kind of a top-level Go declaration tracked by the declaration index.
///
/// Methods are tracked apart from plain functions and keyed as
/// `Receiver.Name`, so a method `(c *Cli) Execute` never satisfies a lookup
/// for the function `Execute`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Constant,
    Variable,
    Function,
    Method,
    Type,
}

impl DeclKind {
    pub const ALL: [DeclKind; 5] = [
        Self::Constant,
        Self::Variable,
        Self::Function,
        Self::Method,
        Self::Type,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Method => "method",
            Self::Type => "type",
        }
    }

    /// The Go keyword that introduces this kind of declaration.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Constant => "const",
            Self::Variable => "var",
            Self::Function | Self::Method => "func",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" | "const" => Ok(Self::Constant),
            "variable" | "var" => Ok(Self::Variable),
            "function" | "func" => Ok(Self::Function),
            "method" => Ok(Self::Method),
            "type" => Ok(Self::Type),
            other => Err(DomainError::InvalidMeta(format!(
                "unknown declaration kind: {other}"
            ))),
        }
    }
}

// ── DirRole ───────────────────────────────────────────────────────────────────

/// Logical role of a directory inside the target project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DirRole {
    /// Where the root command file lives.
    Cmd,
    /// Shared package holding the global configuration structure.
    Global,
}

impl DirRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for DirRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cmd" | "command" => Ok(Self::Cmd),
            "global" | "shared" | "g" => Ok(Self::Global),
            other => Err(DomainError::InvalidMeta(format!(
                "unknown directory role: {other}"
            ))),
        }
    }
}
