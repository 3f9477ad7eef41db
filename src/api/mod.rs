// src/api/mod.rs
//! Notion API interaction.
//!
//! Requests flow through one path regardless of transport: arguments are
//! bound and validated against the operation [`Catalog`], rendered into a
//! [`PreparedRequest`], and handed to a [`Dispatch`] implementation. The
//! blocking [`Client`] and the asynchronous [`AsyncClient`] differ only in
//! how they send the request and what they return.

mod async_client;
mod client;
mod endpoints;
mod operations;
mod request;
mod response;

pub use async_client::AsyncClient;
pub use client::Client;
pub use endpoints::{BlockChildren, Blocks, Comments, Databases, PageProperties, Pages, Users};
pub use operations::{catalog, BodyTarget, Catalog, Operation};
pub use request::{decode_path_param, query_pairs, HttpVerb, PreparedRequest};
pub use response::interpret_response;

use crate::error::NotionError;
use crate::types::{BodyInput, CallArgs};
use serde_json::Value;

const AD_HOC_QUERY_PARAM: &str = "query";

/// The ability to send a prepared request to the Notion API.
///
/// Implementors only decide how a request is sent and how a failure is
/// returned. Binding, validation and request building are shared by the
/// provided methods.
pub trait Dispatch {
    /// What every call returns: a `Result` for blocking clients, a future
    /// resolving to one for asynchronous clients.
    type Output;

    /// Sends a request that has already passed local validation.
    fn dispatch(&self, request: PreparedRequest) -> Self::Output;

    /// Returns a failure without touching the network.
    fn reject(&self, error: NotionError) -> Self::Output;

    /// Invokes a catalog operation by name, e.g. `"pages.update"`.
    fn call(&self, operation: &str, args: CallArgs) -> Self::Output {
        let prepared = catalog()
            .map_err(NotionError::from)
            .and_then(|catalog| catalog.prepare(operation, args));
        match prepared {
            Ok(request) => self.dispatch(request),
            Err(error) => self.reject(error),
        }
    }

    /// Sends a request to an arbitrary path relative to the base URL.
    ///
    /// No key-scope validation is applied. `query` must be a mapping or
    /// `null`; a `null` body is not sent.
    fn request(
        &self,
        verb: HttpVerb,
        path: &str,
        query: Option<Value>,
        body: Option<Value>,
    ) -> Self::Output {
        let mut request = PreparedRequest::raw(verb, path);
        if let Some(query) = query {
            match query_pairs(AD_HOC_QUERY_PARAM, &query) {
                Ok(pairs) => request = request.with_query(pairs),
                Err(error) => return self.reject(error.into()),
            }
        }
        if let Some(body) = body.filter(|body| !body.is_null()) {
            request = request.with_body(body);
        }
        self.dispatch(request)
    }

    fn get(&self, path: &str, query: Option<Value>) -> Self::Output {
        self.request(HttpVerb::Get, path, query, None)
    }

    fn post(&self, path: &str, body: Option<Value>) -> Self::Output {
        self.request(HttpVerb::Post, path, None, body)
    }

    fn patch(&self, path: &str, body: Option<Value>) -> Self::Output {
        self.request(HttpVerb::Patch, path, None, body)
    }

    fn delete(&self, path: &str) -> Self::Output {
        self.request(HttpVerb::Delete, path, None, None)
    }

    fn pages(&self) -> Pages<'_, Self>
    where
        Self: Sized,
    {
        Pages::new(self)
    }

    fn blocks(&self) -> Blocks<'_, Self>
    where
        Self: Sized,
    {
        Blocks::new(self)
    }

    fn databases(&self) -> Databases<'_, Self>
    where
        Self: Sized,
    {
        Databases::new(self)
    }

    fn users(&self) -> Users<'_, Self>
    where
        Self: Sized,
    {
        Users::new(self)
    }

    fn comments(&self) -> Comments<'_, Self>
    where
        Self: Sized,
    {
        Comments::new(self)
    }

    /// Searches every page and database shared with the integration.
    fn search(&self, body: impl Into<BodyInput>) -> Self::Output
    where
        Self: Sized,
    {
        self.call("search", body.into().apply(CallArgs::new()))
    }
}
