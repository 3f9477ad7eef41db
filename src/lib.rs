// src/lib.rs
//! notionx: a Notion API client that validates requests locally and maps
//! every failure response to a typed error kind.
//!
//! # Public API
//!
//! Everything is re-exported at the crate root, grouped as follows:
//! - **Clients**: `Client` (blocking), `AsyncClient`, and the `Dispatch`
//!   trait carrying the endpoint groups and ad-hoc `get/post/patch/delete`
//! - **Configuration**: `ClientOptions`, `AuthToken`, `CommandLineInput`
//! - **Error handling**: `NotionError`, `LocalValidationError`,
//!   `ApiResponseError`, `ApiErrorKind`, `DefinitionError`
//! - **Validation and binding**: `validate`, `BodyRule`, `Signature`,
//!   `CallShape`, `CallArgs`, `Kwargs`
//!
//! ```no_run
//! use notionx::{Client, Dispatch, Kwargs};
//! use serde_json::json;
//!
//! # fn main() -> notionx::Result<()> {
//! let client = Client::from_env()?;
//! let page = client.pages().retrieve("b55c9c91-384d-452b-81db-d1ef79372b75")?;
//! client.pages().update(
//!     page["id"].as_str().unwrap_or_default(),
//!     Kwargs::new().with("archived", true),
//! )?;
//! client.search(json!({"query": "roadmap"}))?;
//! # Ok(())
//! # }
//! ```

mod api;
mod call_shape;
mod config;
mod constants;
mod error;
mod taxonomy;
mod types;
mod validation;

// --- Clients ---
pub use crate::api::{
    AsyncClient, BlockChildren, Blocks, Client, Comments, Databases, Dispatch, PageProperties,
    Pages, Users,
};

// --- Requests ---
pub use crate::api::{
    catalog, decode_path_param, interpret_response, query_pairs, BodyTarget, Catalog, HttpVerb,
    Operation, PreparedRequest,
};

// --- Configuration ---
pub use crate::config::{ClientOptions, CommandLineInput};
pub use crate::constants::{
    AUTH_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT_MS,
    NOTION_VERSION_ENV, TIMEOUT_MS_ENV,
};

// --- Error Handling ---
pub use crate::error::{DefinitionError, LocalValidationError, NotionError, Result};
pub use crate::taxonomy::{
    error_for_code, error_registry, ApiErrorKind, ApiResponseError, ErrorKindSpec, ErrorRegistry,
    ERROR_KINDS,
};

// --- Validation and Binding ---
pub use crate::call_shape::{BoundCall, CallShape, Param, ParamKind, Signature};
pub use crate::types::{AuthToken, BodyInput, CallArgs, Kwargs};
pub use crate::validation::{validate, BodyRule, Requirement};
