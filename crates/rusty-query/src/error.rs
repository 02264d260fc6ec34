// File: src/error.rs
// Purpose: Error taxonomy for decoding, encoding and coercion

use crate::kind::{Kind, TypeInfo};
use std::fmt;
use thiserror::Error;

/// Raised when a type of the wrong shape reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type: {}", .type_info)]
pub struct UnsupportedType {
    pub type_info: TypeInfo,
}

impl UnsupportedType {
    pub fn new(type_info: TypeInfo) -> Self {
        Self { type_info }
    }

    pub fn kind(&self) -> Kind {
        self.type_info.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.type_info.name
    }
}

/// Why a literal could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorReason {
    InvalidSyntax,
    OutOfRange,
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorReason::InvalidSyntax => f.write_str("invalid syntax"),
            ParseErrorReason::OutOfRange => f.write_str("value out of range"),
        }
    }
}

/// A string that is not a valid literal for its destination kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {target} literal {input:?}: {reason}")]
pub struct ParseError {
    pub input: String,
    pub target: Kind,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub(crate) fn syntax(input: &str, target: Kind) -> Self {
        Self {
            input: input.to_string(),
            target,
            reason: ParseErrorReason::InvalidSyntax,
        }
    }

    pub(crate) fn range(input: &str, target: Kind) -> Self {
        Self {
            input: input.to_string(),
            target,
            reason: ParseErrorReason::OutOfRange,
        }
    }
}

/// Failure of a single string-to-value conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedType),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors surfaced by [`parse_query`](crate::parse_query) and
/// [`create_query`](crate::create_query)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Decode target is an empty optional, so there is nothing to write into
    #[error("non-pointer passed")]
    NonPointer,

    /// Decode or encode target is not a record
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedType),

    /// A looked-up value could not be coerced into its field
    #[error("failed to set value for `{key}`: {source}")]
    SetValue {
        key: String,
        #[source]
        source: CoerceError,
    },
}

impl QueryError {
    /// Finds the unsupported type, whether raised structurally or by the coercer
    pub fn unsupported_type(&self) -> Option<&UnsupportedType> {
        match self {
            QueryError::UnsupportedType(err) => Some(err),
            QueryError::SetValue {
                source: CoerceError::UnsupportedType(err),
                ..
            } => Some(err),
            _ => None,
        }
    }

    /// The underlying literal parse failure, if that is what went wrong
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            QueryError::SetValue {
                source: CoerceError::Parse(err),
                ..
            } => Some(err),
            _ => None,
        }
    }

    /// External key whose value failed to be set
    pub fn key(&self) -> Option<&str> {
        match self {
            QueryError::SetValue { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn is_non_pointer(&self) -> bool {
        matches!(self, QueryError::NonPointer)
    }
}
