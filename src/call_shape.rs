// src/call_shape.rs
//! Call-shape normalization.
//!
//! An operation declares its parameters explicitly through a [`Signature`].
//! A [`CallShape`] wraps a signature that has one designated body parameter
//! and lets callers supply that body either as one structured value or as
//! loose keyword arguments:
//!
//! - keyword arguments naming a declared parameter bind to it;
//! - the remaining keywords are folded into the body, unless the body was
//!   supplied explicitly, in which case they are discarded and never merged.

use crate::error::{DefinitionError, LocalValidationError};
use crate::types::{CallArgs, Kwargs};
use indexmap::IndexMap;
use serde_json::Value;

/// How a declared parameter binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Must be supplied.
    Required,
    /// Defaults to "not supplied".
    Optional,
    /// Collects every keyword that names no other parameter.
    KeywordCollector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Required,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Optional,
        }
    }

    pub const fn keyword_collector(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::KeywordCollector,
        }
    }
}

/// The declared parameter list of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    operation: &'static str,
    params: Vec<Param>,
}

impl Signature {
    pub fn new(
        operation: &'static str,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<Self, DefinitionError> {
        let params: Vec<Param> = params.into_iter().collect();
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|earlier| earlier.name == param.name) {
                return Err(DefinitionError::DuplicateParameter {
                    operation,
                    param: param.name,
                });
            }
        }
        Ok(Self { operation, params })
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    fn collector(&self) -> Option<&Param> {
        self.params
            .iter()
            .find(|param| param.kind == ParamKind::KeywordCollector)
    }

    fn slots(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|param| param.kind != ParamKind::KeywordCollector)
    }

    /// Binds a call without folding: keywords that name no parameter are an
    /// error unless the signature declares a keyword collector.
    pub fn bind(&self, args: CallArgs) -> Result<BoundCall, LocalValidationError> {
        let (positional, keywords) = args.into_parts();
        let (matching, stray) = self.partition(keywords);
        let mut bound = self.bind_matching(positional, matching)?;

        let first_stray = stray.keys().next().map(str::to_string);
        if let Some(key) = first_stray {
            let Some(collector) = self.collector() else {
                return Err(LocalValidationError::UnexpectedKeyword {
                    operation: self.operation.to_string(),
                    param: key,
                });
            };
            bound
                .values
                .insert(collector.name, Some(Value::Object(stray.into_map())));
        }

        Ok(bound)
    }

    /// Splits keywords into those naming a declared parameter and the rest.
    fn partition(&self, keywords: Kwargs) -> (Kwargs, Kwargs) {
        let mut matching = Kwargs::new();
        let mut stray = Kwargs::new();
        for (key, value) in keywords {
            if self.slots().any(|param| param.name == key) {
                matching.insert(key, value);
            } else {
                stray.insert(key, value);
            }
        }
        (matching, stray)
    }

    fn bind_matching(
        &self,
        positional: Vec<Value>,
        matching: Kwargs,
    ) -> Result<BoundCall, LocalValidationError> {
        let mut values: IndexMap<&'static str, Option<Value>> =
            self.slots().map(|param| (param.name, None)).collect();

        if positional.len() > values.len() {
            return Err(LocalValidationError::TooManyPositional {
                operation: self.operation.to_string(),
                expected: values.len(),
                given: positional.len(),
            });
        }

        for (slot, value) in values.values_mut().zip(positional) {
            *slot = Some(value);
        }

        for (key, value) in matching {
            if let Some(slot) = values.get_mut(key.as_str()) {
                if slot.is_some() {
                    return Err(LocalValidationError::DuplicateArgument {
                        operation: self.operation.to_string(),
                        param: key,
                    });
                }
                *slot = Some(value);
            }
        }

        if let Some(missing) = self
            .slots()
            .find(|param| param.kind == ParamKind::Required && values[param.name].is_none())
        {
            return Err(LocalValidationError::MissingArgument {
                operation: self.operation.to_string(),
                param: missing.name.to_string(),
            });
        }

        Ok(BoundCall {
            operation: self.operation,
            values,
            discarded: Vec::new(),
        })
    }
}

/// A signature with a designated body parameter that absorbs stray keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    signature: Signature,
    body_param: &'static str,
}

impl CallShape {
    /// Wraps `signature`, checking that it can carry a folded body.
    pub fn new(signature: Signature, body_param: &'static str) -> Result<Self, DefinitionError> {
        let operation = signature.operation();
        if signature.param(body_param).is_none() {
            return Err(DefinitionError::UndeclaredParameter {
                operation,
                param: body_param,
            });
        }

        for param in signature.params() {
            if param.name == body_param && param.kind == ParamKind::Required {
                return Err(DefinitionError::BodyWithoutDefault {
                    operation,
                    param: body_param,
                });
            }
            if param.kind == ParamKind::KeywordCollector {
                return Err(DefinitionError::KeywordCollector {
                    operation,
                    param: param.name,
                });
            }
        }

        Ok(Self {
            signature,
            body_param,
        })
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn body_param(&self) -> &'static str {
        self.body_param
    }

    /// Binds a call, folding stray keywords into the body when it was not
    /// supplied explicitly.
    pub fn bind(&self, args: CallArgs) -> Result<BoundCall, LocalValidationError> {
        let (positional, keywords) = args.into_parts();
        let (matching, stray) = self.signature.partition(keywords);
        let mut bound = self.signature.bind_matching(positional, matching)?;

        let body = bound.values.entry(self.body_param).or_insert(None);
        match body {
            None | Some(Value::Null) => *body = Some(Value::Object(stray.into_map())),
            Some(_) if !stray.is_empty() => {
                let discarded: Vec<String> = stray.keys().map(str::to_string).collect();
                log::warn!(
                    "{}: explicit `{}` supplied, ignoring keyword arguments {:?}",
                    self.signature.operation(),
                    self.body_param,
                    discarded
                );
                bound.discarded = discarded;
            }
            Some(_) => {}
        }

        Ok(bound)
    }
}

/// Arguments of one call after binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCall {
    operation: &'static str,
    values: IndexMap<&'static str, Option<Value>>,
    discarded: Vec<String>,
}

impl BoundCall {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The value bound to `name`, `None` when it was not supplied.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Removes and returns the value bound to `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.get_mut(name).and_then(Option::take)
    }

    /// The value bound to `name`, which must be a string.
    pub fn str_arg(&self, name: &str) -> Result<&str, LocalValidationError> {
        match self.get(name) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(LocalValidationError::InvalidArgument {
                operation: self.operation.to_string(),
                param: name.to_string(),
                reason: format!("expected a string, got {}", other),
            }),
            None => Err(LocalValidationError::MissingArgument {
                operation: self.operation.to_string(),
                param: name.to_string(),
            }),
        }
    }

    /// Keywords dropped because the body was supplied explicitly.
    pub fn discarded_keywords(&self) -> &[String] {
        &self.discarded
    }
}
