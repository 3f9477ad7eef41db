// src/types/args.rs
//! Call arguments: positional values, keyword values, and the body input
//! accepted by the typed endpoint methods.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keyword arguments, in the order the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kwargs(IndexMap<String, Value>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a keyword, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts into a JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Kwargs {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Map<String, Value>> for Kwargs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

/// Arguments of one call: positional values and keyword values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Kwargs,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(key, value);
        self
    }

    /// Adds every keyword argument from `kwargs`.
    pub fn kwargs(mut self, kwargs: Kwargs) -> Self {
        for (key, value) in kwargs {
            self.keywords.insert(key, value);
        }
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keywords(&self) -> &Kwargs {
        &self.keywords
    }

    pub fn into_parts(self) -> (Vec<Value>, Kwargs) {
        (self.positional, self.keywords)
    }
}

/// The body part of a typed endpoint call.
///
/// `Explicit` passes one structured value as the body parameter.
/// `Keywords` passes loose keyword arguments that get folded into the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BodyInput {
    #[default]
    Unspecified,
    Explicit(Value),
    Keywords(Kwargs),
}

impl BodyInput {
    /// Appends this input to `args` the way a caller would have written it.
    pub fn apply(self, args: CallArgs) -> CallArgs {
        match self {
            BodyInput::Unspecified => args,
            BodyInput::Explicit(body) => args.arg(body),
            BodyInput::Keywords(kwargs) => args.kwargs(kwargs),
        }
    }
}

impl From<Value> for BodyInput {
    fn from(body: Value) -> Self {
        BodyInput::Explicit(body)
    }
}

impl From<Map<String, Value>> for BodyInput {
    fn from(body: Map<String, Value>) -> Self {
        BodyInput::Explicit(Value::Object(body))
    }
}

impl From<Option<Value>> for BodyInput {
    fn from(body: Option<Value>) -> Self {
        body.map_or(BodyInput::Unspecified, BodyInput::Explicit)
    }
}

impl From<Kwargs> for BodyInput {
    fn from(kwargs: Kwargs) -> Self {
        BodyInput::Keywords(kwargs)
    }
}

impl From<()> for BodyInput {
    fn from(_: ()) -> Self {
        BodyInput::Unspecified
    }
}
