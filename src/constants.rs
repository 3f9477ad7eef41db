// src/constants.rs
//! Domain constants that define how the client talks to the Notion API.
//!
//! Each constant is named for the wire concept it pins down. Reading these
//! should tell you which API version the client speaks, where it sends
//! requests, and how long it waits for an answer.

// ---------------------------------------------------------------------------
// Notion API wire defaults
// ---------------------------------------------------------------------------

/// API version sent in the `Notion-Version` header unless overridden.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Versioned root of the Notion REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Default per-request timeout in milliseconds.
///
/// Notion itself gives up on a request after 60 seconds and answers with
/// `service_unavailable`, so the client waits a little longer than that
/// before treating the call as a transport failure.
pub const DEFAULT_TIMEOUT_MS: u64 = 90_000;

/// Header carrying the API version.
pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Variable holding the integration token.
pub const AUTH_TOKEN_ENV: &str = "NOTION_AUTH_TOKEN";

/// Optional override for the API version.
pub const NOTION_VERSION_ENV: &str = "NOTION_VERSION";

/// Optional override for the base URL (useful against a local mock).
pub const BASE_URL_ENV: &str = "NOTION_BASE_URL";

/// Optional override for the timeout, in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "NOTION_TIMEOUT_MS";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Detail attached to the catch-all error when a failure body is not JSON.
pub const NOT_JSON_ERROR_DETAIL: &str = "The error object is not a valid json object.";

/// Maximum characters shown when previewing a malformed response body.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
