// src/api/async_client.rs
//! Asynchronous HTTP client for the Notion API.

use super::client::{checked_base_url, create_headers};
use super::request::PreparedRequest;
use super::response::interpret_response;
use super::Dispatch;
use crate::config::ClientOptions;
use crate::error::{NotionError, Result};
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Asynchronous Notion client.
///
/// Every call returns a `'static` future, so calls can be spawned or joined
/// freely. Clones share the connection pool and configuration.
#[derive(Clone, Debug)]
pub struct AsyncClient {
    http: reqwest::Client,
    options: Arc<ClientOptions>,
    base_url: Arc<Url>,
}

impl AsyncClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = checked_base_url(&options)?;
        let http = reqwest::Client::builder()
            .default_headers(create_headers(&options)?)
            .timeout(options.timeout())
            .build()?;

        log::info!(
            "Async Notion client ready: {} (Notion-Version {})",
            base_url,
            options.notion_version()
        );

        Ok(Self {
            http,
            options: Arc::new(options),
            base_url: Arc::new(base_url),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    async fn send(self, request: PreparedRequest) -> Result<Value> {
        let url = request.url(&self.base_url)?;
        log::debug!("{} {}", request.verb(), url);

        let mut builder = self.http.request(request.verb().method(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        log::debug!("{} {} -> {}", request.verb(), request.path(), status);

        let text = response.text().await?;
        interpret_response(status, &text)
    }
}

impl Dispatch for AsyncClient {
    type Output = BoxFuture<'static, Result<Value>>;

    fn dispatch(&self, request: PreparedRequest) -> Self::Output {
        self.clone().send(request).boxed()
    }

    fn reject(&self, error: NotionError) -> Self::Output {
        future::ready(Err(error)).boxed()
    }
}
