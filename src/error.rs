// src/error.rs
//! Error types with structured error handling.
//!
//! Failures fall into disjoint families:
//! - [`LocalValidationError`]: the request was rejected before any network
//!   I/O. Always fixable by reshaping the call.
//! - [`ApiResponseError`]: the Notion API answered with a failure. One
//!   kind per wire code, plus a catch-all.
//! - [`DefinitionError`]: a malformed operation, rule or error table.
//!   These are programmer errors and surface when the tables are built.
//!
//! [`NotionError`] wraps them all, together with transport failures.

use crate::taxonomy::{ApiErrorKind, ApiResponseError};
use thiserror::Error;

/// A request rejected locally, before it reached the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalValidationError {
    #[error("The parameter `{param}` must be a mapping.")]
    NotAMapping { param: String },

    #[error("The parameter `{param}` is missing the required key `{key}`.")]
    MissingRequiredKey { param: String, key: String },

    #[error("The parameter `{param}` contains more than one key in the group {group}.")]
    MoreThanOneInGroup { param: String, group: String },

    #[error("The parameter `{param}` does not contain any key in the group {group}.")]
    NoneInGroup { param: String, group: String },

    #[error("The key `{key}` contained in the parameter `{param}` is not in scope. Please remove it.")]
    KeyOutOfScope { param: String, key: String },

    #[error("`{operation}` takes {expected} positional argument(s) but {given} were given.")]
    TooManyPositional {
        operation: String,
        expected: usize,
        given: usize,
    },

    #[error("`{operation}` got multiple values for the argument `{param}`.")]
    DuplicateArgument { operation: String, param: String },

    #[error("`{operation}` is missing the required argument `{param}`.")]
    MissingArgument { operation: String, param: String },

    #[error("`{operation}` got an unexpected keyword argument `{param}`.")]
    UnexpectedKeyword { operation: String, param: String },

    #[error("The argument `{param}` of `{operation}` is invalid: {reason}")]
    InvalidArgument {
        operation: String,
        param: String,
        reason: String,
    },
}

/// A malformed declaration, caught when the tables are built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Defining error kind {name} requires a wire error code.")]
    MissingErrorCode { name: &'static str },

    #[error("The wire error code `{code}` is registered more than once.")]
    DuplicateErrorCode { code: String },

    #[error("The error table has no catch-all kind.")]
    MissingCatchAllKind,

    #[error("The operation `{operation}` must declare the `{param}` parameter.")]
    UndeclaredParameter {
        operation: &'static str,
        param: &'static str,
    },

    #[error("The parameter `{param}` of `{operation}` needs to have a default value.")]
    BodyWithoutDefault {
        operation: &'static str,
        param: &'static str,
    },

    #[error("The operation `{operation}` cannot declare the catch-all keyword parameter `{param}`.")]
    KeywordCollector {
        operation: &'static str,
        param: &'static str,
    },

    #[error("The parameter `{param}` of `{operation}` is declared more than once.")]
    DuplicateParameter {
        operation: &'static str,
        param: &'static str,
    },

    #[error("A one-of group for the parameter `{param}` must name at least one key.")]
    EmptyOneOfGroup { param: &'static str },

    #[error("The operation `{0}` is declared more than once.")]
    DuplicateOperation(&'static str),
}

/// Main error type of the crate.
#[derive(Error, Debug)]
pub enum NotionError {
    #[error(transparent)]
    Validation(#[from] LocalValidationError),

    #[error(transparent)]
    Api(#[from] ApiResponseError),

    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl NotionError {
    /// The taxonomy kind, when the failure came from the API.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Whether the request was rejected before reaching the network.
    pub fn is_local_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the transport gave up waiting for the response.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}

/// Result type alias for convenience
pub type Result<T, E = NotionError> = std::result::Result<T, E>;
