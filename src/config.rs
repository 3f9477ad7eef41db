// src/config.rs
use crate::api::Operation;
use crate::constants::{
    AUTH_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT_MS,
    NOTION_VERSION_ENV, TIMEOUT_MS_ENV,
};
use crate::error::{LocalValidationError, NotionError};
use crate::types::{AuthToken, CallArgs};
use clap::Parser;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Parsed command-line input of the `notionx` binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Operation to invoke (e.g. "pages.retrieve"); see --list
    #[arg(required_unless_present = "list")]
    pub operation: Option<String>,

    /// Positional arguments, bound in declaration order
    pub args: Vec<String>,

    /// Explicit request body (or query mapping) as JSON
    #[arg(long = "json", value_name = "BODY")]
    pub json_body: Option<String>,

    /// Keyword argument; values are parsed as JSON, falling back to a string
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// List every available operation and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Notion API version header (overrides NOTION_VERSION)
    #[arg(long)]
    pub notion_version: Option<String>,

    /// API base URL (overrides NOTION_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (overrides NOTION_TIMEOUT_MS)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl CommandLineInput {
    /// Resolves client options from the environment, then applies flags.
    pub fn client_options(&self) -> Result<ClientOptions, NotionError> {
        let mut options = ClientOptions::from_env()?;
        if let Some(version) = &self.notion_version {
            options = options.with_notion_version(version.clone());
        }
        if let Some(base_url) = &self.base_url {
            options = options.with_base_url(base_url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(timeout_ms));
        }
        Ok(options)
    }

    /// Builds the call arguments for `operation`.
    ///
    /// Positional arguments are passed as strings. `--json` binds to the
    /// operation's body parameter by keyword, and each `--field` becomes a
    /// keyword argument.
    pub fn call_args(&self, operation: &Operation) -> Result<CallArgs, NotionError> {
        let mut args = self
            .args
            .iter()
            .fold(CallArgs::new(), |args, value| args.arg(value.as_str()));

        if let Some(raw) = &self.json_body {
            let body: Value = serde_json::from_str(raw).map_err(|e| {
                NotionError::InvalidConfiguration(format!("--json is not valid JSON: {}", e))
            })?;
            let param = operation.body_param().ok_or_else(|| {
                LocalValidationError::UnexpectedKeyword {
                    operation: operation.name().to_string(),
                    param: "--json".to_string(),
                }
            })?;
            args = args.kwarg(param, body);
        }

        for field in &self.fields {
            let (key, value) = parse_field(field)?;
            args = args.kwarg(key, value);
        }

        Ok(args)
    }
}

fn parse_field(field: &str) -> Result<(&str, Value), NotionError> {
    let (key, raw) = field.split_once('=').ok_or_else(|| {
        NotionError::InvalidConfiguration(format!(
            "invalid --field format '{}': expected KEY=VALUE",
            field
        ))
    })?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key, value))
}

/// Everything a client needs to reach the Notion API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    auth_token: AuthToken,
    notion_version: String,
    base_url: String,
    timeout: Duration,
}

impl ClientOptions {
    pub fn new(auth_token: AuthToken) -> Self {
        Self {
            auth_token,
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_notion_version(mut self, notion_version: impl Into<String>) -> Self {
        self.notion_version = notion_version.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    pub fn notion_version(&self) -> &str {
        &self.notion_version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loads options from `NOTION_AUTH_TOKEN` and the optional overrides.
    pub fn from_env() -> Result<Self, NotionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads options through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NotionError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let token = get(AUTH_TOKEN_ENV).ok_or_else(|| {
            NotionError::MissingConfiguration(format!(
                "{} environment variable not set",
                AUTH_TOKEN_ENV
            ))
        })?;
        let mut options = Self::new(AuthToken::new(token)?);

        if let Some(version) = get(NOTION_VERSION_ENV) {
            options = options.with_notion_version(version);
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            options = options.with_base_url(base_url);
        }
        if let Some(raw) = get(TIMEOUT_MS_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                NotionError::InvalidConfiguration(format!(
                    "{} must be a whole number of milliseconds, got '{}'",
                    TIMEOUT_MS_ENV, raw
                ))
            })?;
            options = options.with_timeout(Duration::from_millis(millis));
        }

        Ok(options)
    }

    /// The base URL, parsed and checked to be able to carry a path.
    pub fn parsed_base_url(&self) -> Result<Url, NotionError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            NotionError::InvalidConfiguration(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(NotionError::InvalidConfiguration(format!(
                "base URL cannot carry a path: {}",
                self.base_url
            )));
        }
        Ok(url)
    }
}
