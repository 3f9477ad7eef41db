// src/api/client.rs
//! Blocking HTTP client for the Notion API.
//!
//! A thin wrapper around `reqwest::blocking` that carries authentication,
//! the API version and the timeout. Everything above the wire (binding,
//! validation, request building) comes from [`Dispatch`].

use super::operations::catalog;
use super::request::PreparedRequest;
use super::response::interpret_response;
use super::Dispatch;
use crate::config::ClientOptions;
use crate::constants::NOTION_VERSION_HEADER;
use crate::error::{NotionError, Result};
use crate::taxonomy::error_registry;
use reqwest::header;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Blocking Notion client.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::blocking::Client,
    options: Arc<ClientOptions>,
    base_url: Url,
}

impl Client {
    /// Creates a client. Fails when the options are unusable or a built-in
    /// table is malformed.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = checked_base_url(&options)?;
        let http = reqwest::blocking::Client::builder()
            .default_headers(create_headers(&options)?)
            .timeout(options.timeout())
            .build()?;

        log::info!(
            "Notion client ready: {} (Notion-Version {})",
            base_url,
            options.notion_version()
        );

        Ok(Self {
            http,
            options: Arc::new(options),
            base_url,
        })
    }

    /// Creates a client from `NOTION_AUTH_TOKEN` and the optional overrides.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn send(&self, request: &PreparedRequest) -> Result<Value> {
        let url = request.url(&self.base_url)?;
        log::debug!("{} {}", request.verb(), url);

        let mut builder = self.http.request(request.verb().method(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        log::debug!("{} {} -> {}", request.verb(), request.path(), status);

        let text = response.text()?;
        interpret_response(status, &text)
    }
}

impl Dispatch for Client {
    type Output = Result<Value>;

    fn dispatch(&self, request: PreparedRequest) -> Self::Output {
        self.send(&request)
    }

    fn reject(&self, error: NotionError) -> Self::Output {
        Err(error)
    }
}

/// Checks the built-in tables and parses the base URL.
pub(super) fn checked_base_url(options: &ClientOptions) -> Result<Url> {
    error_registry()?;
    catalog()?;
    options.parsed_base_url()
}

/// Creates the default headers for Notion API requests.
pub(super) fn create_headers(options: &ClientOptions) -> Result<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();

    let auth_header = format!("Bearer {}", options.auth_token().as_str());
    let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
        NotionError::InvalidConfiguration(format!("Invalid auth token format: {}", e))
    })?;
    auth_value.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth_value);

    headers.insert(
        NOTION_VERSION_HEADER,
        header::HeaderValue::from_str(options.notion_version()).map_err(|e| {
            NotionError::InvalidConfiguration(format!("Invalid Notion-Version value: {}", e))
        })?,
    );

    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    Ok(headers)
}
