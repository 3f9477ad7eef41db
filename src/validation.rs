// src/validation.rs
//! Local validation of request bodies.
//!
//! Only the outermost keys of a body are checked. A rule carries two kinds
//! of checks, run in this order:
//! 1. every [`Requirement`] in declaration order (a required key, or a
//!    one-of group that must match exactly one key);
//! 2. every key present in the body must belong to the key scope.
//!
//! The first violation is reported. Nothing here touches the network.

use crate::error::{DefinitionError, LocalValidationError};
use indexmap::IndexSet;
use serde_json::{Map, Value};

const ANONYMOUS_PARAM: &str = "body";

/// A condition on which keys must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The key must be present.
    Key(&'static str),
    /// Exactly one of these keys must be present.
    OneOf(&'static [&'static str]),
}

impl Requirement {
    fn check(&self, param: &str, body: &Map<String, Value>) -> Result<(), LocalValidationError> {
        match *self {
            Requirement::Key(key) => {
                if body.contains_key(key) {
                    Ok(())
                } else {
                    Err(LocalValidationError::MissingRequiredKey {
                        param: param.to_string(),
                        key: key.to_string(),
                    })
                }
            }
            Requirement::OneOf(group) => {
                let matched = group.iter().filter(|key| body.contains_key(**key)).count();
                match matched {
                    1 => Ok(()),
                    0 => Err(LocalValidationError::NoneInGroup {
                        param: param.to_string(),
                        group: describe_group(group),
                    }),
                    _ => Err(LocalValidationError::MoreThanOneInGroup {
                        param: param.to_string(),
                        group: describe_group(group),
                    }),
                }
            }
        }
    }
}

fn describe_group(group: &[&str]) -> String {
    format!("{{{}}}", group.join(", "))
}

/// Validation rule bound to a named body parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRule {
    param: &'static str,
    key_scope: IndexSet<&'static str>,
    required: Vec<Requirement>,
}

impl BodyRule {
    pub fn new(
        param: &'static str,
        key_scope: impl IntoIterator<Item = &'static str>,
        required: impl IntoIterator<Item = Requirement>,
    ) -> Result<Self, DefinitionError> {
        let required: Vec<Requirement> = required.into_iter().collect();
        if required
            .iter()
            .any(|req| matches!(req, Requirement::OneOf(group) if group.is_empty()))
        {
            return Err(DefinitionError::EmptyOneOfGroup { param });
        }

        Ok(Self {
            param,
            key_scope: key_scope.into_iter().collect(),
            required,
        })
    }

    /// Name of the parameter this rule guards.
    pub fn param(&self) -> &'static str {
        self.param
    }

    pub fn key_scope(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.key_scope.iter().copied()
    }

    pub fn required(&self) -> &[Requirement] {
        &self.required
    }

    pub fn validate(&self, body: Option<&Value>) -> Result<(), LocalValidationError> {
        check_body(self.param, body, |key| self.key_scope.contains(key), &self.required)
    }
}

/// Validates `body` against a key scope and requirements.
///
/// `None` and JSON `null` count as an empty mapping.
pub fn validate(
    body: Option<&Value>,
    key_scope: &[&str],
    required: &[Requirement],
) -> Result<(), LocalValidationError> {
    check_body(
        ANONYMOUS_PARAM,
        body,
        |key| key_scope.iter().any(|scoped| *scoped == key),
        required,
    )
}

fn check_body(
    param: &str,
    body: Option<&Value>,
    in_scope: impl Fn(&str) -> bool,
    required: &[Requirement],
) -> Result<(), LocalValidationError> {
    let empty = Map::new();
    let body = match body {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(LocalValidationError::NotAMapping {
                param: param.to_string(),
            })
        }
    };

    for requirement in required {
        requirement.check(param, body)?;
    }

    if let Some(key) = body.keys().find(|key| !in_scope(key.as_str())) {
        return Err(LocalValidationError::KeyOutOfScope {
            param: param.to_string(),
            key: key.clone(),
        });
    }

    Ok(())
}
