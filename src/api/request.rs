// src/api/request.rs
//! Outgoing request description, independent of the transport.
//!
//! A [`PreparedRequest`] is what the validation and binding layers hand to
//! a client: verb, path segments, query pairs and an optional JSON body.
//! Turning it into a URL against a base is the only step that needs the
//! client configuration.

use crate::error::{LocalValidationError, NotionError};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use url::Url;

/// HTTP verbs used by the Notion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    verb: HttpVerb,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl PreparedRequest {
    /// Creates a request from already-decoded path segments.
    pub fn new(verb: HttpVerb, segments: Vec<String>) -> Self {
        Self {
            verb,
            segments,
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a request from a raw relative path such as `pages/abc`.
    pub fn raw(verb: HttpVerb, path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(decode_path_param)
            .collect();
        Self::new(verb, segments)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Relative path, for logging.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Resolves the request against `base`.
    pub fn url(&self, base: &Url) -> Result<Url, NotionError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                NotionError::InvalidConfiguration(format!("base URL cannot carry a path: {}", base))
            })?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// Decodes a path argument so that it can be re-encoded as one segment.
///
/// Notion hands out property ids already percent-encoded (`%3AUPp`);
/// decoding first keeps them from being encoded twice.
pub fn decode_path_param(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Flattens a query mapping into pairs.
///
/// Strings are sent verbatim, `null` is skipped, everything else is sent as
/// its JSON text.
pub fn query_pairs(param: &str, query: &Value) -> Result<Vec<(String, String)>, LocalValidationError> {
    let map = match query {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        _ => {
            return Err(LocalValidationError::NotAMapping {
                param: param.to_string(),
            })
        }
    };

    Ok(map
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key.clone(), text.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect())
}
