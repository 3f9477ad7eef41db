// src/taxonomy.rs
//! Notion API error codes as a typed vocabulary.
//!
//! Every failure response the Notion API can produce is described by one
//! row of [`ERROR_KINDS`]: the kind, the wire code that selects it, and the
//! message shown to humans. The table is checked at compile time (every
//! registered row has a code) and again when the registry is built
//! (no code appears twice, a catch-all exists).
//!
//! Callers discriminate failures by [`ApiErrorKind`], never by matching on
//! the wire string.

use crate::error::DefinitionError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The closed set of API response failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The request body could not be decoded as JSON.
    InvalidJson,
    /// The request URL is not valid.
    InvalidRequestUrl,
    /// The request is not supported.
    InvalidRequest,
    /// The authorization grant is invalid, expired or revoked.
    InvalidGrant,
    /// The request body does not match the schema for the expected parameters.
    Validation,
    /// The `Notion-Version` header is missing.
    MissingVersion,
    /// The bearer token is not valid.
    Unauthorized,
    /// The token lacks permission for this operation.
    RestrictedResource,
    /// The resource does not exist or is not shared with the integration.
    ObjectNotFound,
    /// The transaction could not be completed, likely a data collision.
    Conflict,
    /// Too many requests.
    RateLimited,
    /// An unexpected error on Notion's side.
    InternalServer,
    /// Notion is unavailable.
    ServiceUnavailable,
    /// Notion's database is unavailable or unqueryable.
    DatabaseConnectionUnavailable,
    /// Notion timed out while handling the request.
    GatewayTimeout,
    /// Catch-all for codes this client does not know and unreadable bodies.
    Unknown,
}

impl ApiErrorKind {
    /// The table row describing this kind.
    pub fn spec(self) -> &'static ErrorKindSpec {
        ERROR_KINDS
            .iter()
            .find(|spec| spec.kind == self)
            .unwrap_or(&UNKNOWN_SPEC)
    }

    /// Wire code for this kind, `None` for registry-excluded kinds.
    pub fn code(self) -> Option<&'static str> {
        let spec = self.spec();
        (!spec.registry_excluded).then_some(spec.code)
    }

    /// Human message template for this kind.
    pub fn message(self) -> &'static str {
        self.spec().message
    }

    /// Whether the failure is transient and a later attempt may succeed.
    ///
    /// The client never retries on its own; this exists so callers can.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::RateLimited
                | Self::InternalServer
                | Self::ServiceUnavailable
                | Self::DatabaseConnectionUnavailable
                | Self::GatewayTimeout
        )
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// One row of the error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKindSpec {
    pub kind: ApiErrorKind,
    pub name: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    /// Excluded rows are never looked up by code.
    pub registry_excluded: bool,
}

impl ErrorKindSpec {
    pub const fn registered(
        kind: ApiErrorKind,
        name: &'static str,
        code: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            kind,
            name,
            code,
            message,
            registry_excluded: false,
        }
    }

    pub const fn excluded(kind: ApiErrorKind, name: &'static str, message: &'static str) -> Self {
        Self {
            kind,
            name,
            code: "",
            message,
            registry_excluded: true,
        }
    }
}

const UNKNOWN_SPEC: ErrorKindSpec = ErrorKindSpec::excluded(
    ApiErrorKind::Unknown,
    "UnknownAPIResponseError",
    "Unknown API response error occurs.",
);

/// Every error kind the Notion API documents, plus the catch-all.
pub const ERROR_KINDS: &[ErrorKindSpec] = &[
    ErrorKindSpec::registered(
        ApiErrorKind::InvalidJson,
        "InvalidJsonError",
        "invalid_json",
        "The request body could not be decoded as JSON.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::InvalidRequestUrl,
        "InvalidRequestUrlError",
        "invalid_request_url",
        "The request URL is not valid.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::InvalidRequest,
        "InvalidRequestError",
        "invalid_request",
        "This request is not supported.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::InvalidGrant,
        "InvalidGrantError",
        "invalid_grant",
        "The provided authorization grant or refresh token is invalid, expired or revoked.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::Validation,
        "ValidationError",
        "validation_error",
        "The request body does not match the schema for the expected parameters.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::MissingVersion,
        "MissingVersionError",
        "missing_version",
        "The request is missing the required Notion-Version header.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::Unauthorized,
        "UnauthorizedError",
        "unauthorized",
        "The bearer token is not valid.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::RestrictedResource,
        "RestrictedResourceError",
        "restricted_resource",
        "Given the bearer token used, the client doesn't have permission to perform this operation.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::ObjectNotFound,
        "ObjectNotFoundError",
        "object_not_found",
        "The resource does not exist.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::Conflict,
        "ConflictError",
        "conflict_error",
        "The transaction could not be completed, potentially due to a data collision. \
         Make sure the parameters are up to date and try again.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::RateLimited,
        "RateLimitedError",
        "rate_limited",
        "This request exceeds the number of requests allowed. Slow down and try again.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::InternalServer,
        "InternalServerError",
        "internal_server_error",
        "An unexpected error occurred.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::ServiceUnavailable,
        "ServiceUnavailableError",
        "service_unavailable",
        "Notion is unavailable. Try again later.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::DatabaseConnectionUnavailable,
        "DatabaseConnectionUnavailableError",
        "database_connection_unavailable",
        "Notion's database is unavailable or in an unqueryable state. Try again later.",
    ),
    ErrorKindSpec::registered(
        ApiErrorKind::GatewayTimeout,
        "GatewayTimeoutError",
        "gateway_timeout",
        "Notion timed out while attempting to complete this request. Try again later.",
    ),
    UNKNOWN_SPEC,
];

const fn registered_rows_have_codes(table: &[ErrorKindSpec]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if !table[i].registry_excluded && table[i].code.is_empty() {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    registered_rows_have_codes(ERROR_KINDS),
    "every registered error kind needs a wire error code"
);

/// Lookup from wire code to error kind.
#[derive(Debug)]
pub struct ErrorRegistry {
    by_code: HashMap<&'static str, &'static ErrorKindSpec>,
    fallback: &'static ErrorKindSpec,
}

impl ErrorRegistry {
    /// Builds a registry from a table, rejecting malformed rows.
    pub fn build(table: &'static [ErrorKindSpec]) -> Result<Self, DefinitionError> {
        let mut by_code = HashMap::with_capacity(table.len());
        let mut fallback = None;

        for spec in table {
            if spec.registry_excluded {
                if spec.kind == ApiErrorKind::Unknown {
                    fallback = Some(spec);
                }
                continue;
            }
            if spec.code.is_empty() {
                return Err(DefinitionError::MissingErrorCode { name: spec.name });
            }
            if by_code.insert(spec.code, spec).is_some() {
                return Err(DefinitionError::DuplicateErrorCode {
                    code: spec.code.to_string(),
                });
            }
        }

        let fallback = fallback.ok_or(DefinitionError::MissingCatchAllKind)?;
        Ok(Self { by_code, fallback })
    }

    /// Resolves a wire code, falling back to the catch-all.
    pub fn resolve(&self, code: Option<&str>) -> &'static ErrorKindSpec {
        code.and_then(|code| self.by_code.get(code).copied())
            .unwrap_or(self.fallback)
    }

    /// Turns a wire code and detail into the matching typed error.
    pub fn raise(&self, code: Option<&str>, detail: impl Into<String>) -> ApiResponseError {
        let spec = self.resolve(code);
        ApiResponseError {
            kind: spec.kind,
            message: spec.message,
            wire_code: code.map(str::to_string),
            detail: detail.into(),
            status: None,
        }
    }

    /// Number of codes that can be looked up.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

static REGISTRY: Lazy<Result<ErrorRegistry, DefinitionError>> =
    Lazy::new(|| ErrorRegistry::build(ERROR_KINDS));

/// The process-wide registry built from [`ERROR_KINDS`].
pub fn error_registry() -> Result<&'static ErrorRegistry, DefinitionError> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// Resolves `code` against the built-in registry and returns the typed error.
pub fn error_for_code(
    code: Option<&str>,
    detail: impl Into<String>,
) -> Result<ApiResponseError, DefinitionError> {
    Ok(error_registry()?.raise(code, detail))
}

/// A failure reported by the Notion API after a completed round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}\nMore details returned by the Notion API:\n{detail}")]
pub struct ApiResponseError {
    kind: ApiErrorKind,
    message: &'static str,
    wire_code: Option<String>,
    detail: String,
    status: Option<u16>,
}

impl ApiResponseError {
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// The code exactly as the server sent it, if any.
    pub fn wire_code(&self) -> Option<&str> {
        self.wire_code.as_deref()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}
