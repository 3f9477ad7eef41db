// src/api/operations.rs
//! The declared Notion endpoint surface.
//!
//! Every endpoint is one row of [`DECLARATIONS`]: verb, path template,
//! parameter list, and, for endpoints that carry a body or query mapping,
//! the key scope and requirements checked before anything is sent. The
//! table is turned into a [`Catalog`] once per process; a malformed row is
//! a [`DefinitionError`] reported when the first client is built.

use super::request::{query_pairs, HttpVerb, PreparedRequest};
use crate::call_shape::{BoundCall, CallShape, Param, Signature};
use crate::error::{DefinitionError, LocalValidationError, NotionError};
use crate::types::CallArgs;
use crate::validation::{BodyRule, Requirement};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

/// Where the body parameter ends up on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTarget {
    /// Serialized as the JSON request body.
    Json,
    /// Flattened into query parameters.
    Query,
}

struct BodyDecl {
    param: &'static str,
    target: BodyTarget,
    scope: &'static [&'static str],
    required: &'static [Requirement],
}

struct OperationDecl {
    name: &'static str,
    verb: HttpVerb,
    path: &'static str,
    params: &'static [Param],
    body: Option<BodyDecl>,
}

const BODY_DATA: &str = "body_data";
const QUERY_DATA: &str = "query_data";

const PAGINATION: &[&str] = &["start_cursor", "page_size"];

const BLOCK_UPDATE_SCOPE: &[&str] = &[
    "embed",
    "type",
    "bookmark",
    "image",
    "video",
    "pdf",
    "file",
    "audio",
    "code",
    "equation",
    "divider",
    "breadcrumb",
    "table_of_contents",
    "link_to_page",
    "table_row",
    "heading_1",
    "heading_2",
    "heading_3",
    "paragraph",
    "bulleted_list_item",
    "numbered_list_item",
    "quote",
    "to_do",
    "toggle",
    "template",
    "callout",
    "synced_block",
    "table",
    "archived",
];

const fn json_body(scope: &'static [&'static str], required: &'static [Requirement]) -> Option<BodyDecl> {
    Some(BodyDecl {
        param: BODY_DATA,
        target: BodyTarget::Json,
        scope,
        required,
    })
}

const fn query_body(scope: &'static [&'static str], required: &'static [Requirement]) -> Option<BodyDecl> {
    Some(BodyDecl {
        param: QUERY_DATA,
        target: BodyTarget::Query,
        scope,
        required,
    })
}

const DECLARATIONS: &[OperationDecl] = &[
    // pages
    OperationDecl {
        name: "pages.create",
        verb: HttpVerb::Post,
        path: "pages",
        params: &[Param::optional(BODY_DATA)],
        body: json_body(
            &["parent", "properties", "children", "icon", "cover"],
            &[Requirement::Key("parent"), Requirement::Key("properties")],
        ),
    },
    OperationDecl {
        name: "pages.retrieve",
        verb: HttpVerb::Get,
        path: "pages/{page_id}",
        params: &[Param::required("page_id")],
        body: None,
    },
    OperationDecl {
        name: "pages.update",
        verb: HttpVerb::Patch,
        path: "pages/{page_id}",
        params: &[Param::required("page_id"), Param::optional(BODY_DATA)],
        body: json_body(&["properties", "archived", "icon", "cover"], &[]),
    },
    OperationDecl {
        name: "pages.properties.retrieve",
        verb: HttpVerb::Get,
        path: "pages/{page_id}/properties/{property_id}",
        params: &[
            Param::required("page_id"),
            Param::required("property_id"),
            Param::optional(QUERY_DATA),
        ],
        body: query_body(PAGINATION, &[]),
    },
    // blocks
    OperationDecl {
        name: "blocks.retrieve",
        verb: HttpVerb::Get,
        path: "blocks/{block_id}",
        params: &[Param::required("block_id")],
        body: None,
    },
    OperationDecl {
        name: "blocks.update",
        verb: HttpVerb::Patch,
        path: "blocks/{block_id}",
        params: &[Param::required("block_id"), Param::optional(BODY_DATA)],
        body: json_body(BLOCK_UPDATE_SCOPE, &[]),
    },
    OperationDecl {
        name: "blocks.delete",
        verb: HttpVerb::Delete,
        path: "blocks/{block_id}",
        params: &[Param::required("block_id")],
        body: None,
    },
    OperationDecl {
        name: "blocks.children.append",
        verb: HttpVerb::Patch,
        path: "blocks/{block_id}/children",
        params: &[Param::required("block_id"), Param::optional(BODY_DATA)],
        body: json_body(&["children"], &[Requirement::Key("children")]),
    },
    OperationDecl {
        name: "blocks.children.list",
        verb: HttpVerb::Get,
        path: "blocks/{block_id}/children",
        params: &[Param::required("block_id"), Param::optional(QUERY_DATA)],
        body: query_body(PAGINATION, &[]),
    },
    // databases
    OperationDecl {
        name: "databases.retrieve",
        verb: HttpVerb::Get,
        path: "databases/{database_id}",
        params: &[Param::required("database_id")],
        body: None,
    },
    OperationDecl {
        name: "databases.query",
        verb: HttpVerb::Post,
        path: "databases/{database_id}/query",
        params: &[Param::required("database_id"), Param::optional(BODY_DATA)],
        body: json_body(&["filter", "sorts", "start_cursor", "page_size"], &[]),
    },
    OperationDecl {
        name: "databases.create",
        verb: HttpVerb::Post,
        path: "databases",
        params: &[Param::optional(BODY_DATA)],
        body: json_body(
            &["parent", "title", "properties"],
            &[Requirement::Key("parent"), Requirement::Key("properties")],
        ),
    },
    OperationDecl {
        name: "databases.update",
        verb: HttpVerb::Patch,
        path: "databases/{database_id}",
        params: &[Param::required("database_id"), Param::optional(BODY_DATA)],
        body: json_body(&["title", "properties", "description"], &[]),
    },
    OperationDecl {
        name: "databases.list",
        verb: HttpVerb::Get,
        path: "databases",
        params: &[Param::optional(QUERY_DATA)],
        body: query_body(PAGINATION, &[]),
    },
    // users
    OperationDecl {
        name: "users.retrieve",
        verb: HttpVerb::Get,
        path: "users/{user_id}",
        params: &[Param::required("user_id")],
        body: None,
    },
    OperationDecl {
        name: "users.list",
        verb: HttpVerb::Get,
        path: "users",
        params: &[Param::optional(QUERY_DATA)],
        body: query_body(PAGINATION, &[]),
    },
    OperationDecl {
        name: "users.me",
        verb: HttpVerb::Get,
        path: "users/me",
        params: &[],
        body: None,
    },
    // comments
    OperationDecl {
        name: "comments.list",
        verb: HttpVerb::Get,
        path: "comments",
        params: &[Param::optional(QUERY_DATA)],
        body: query_body(
            &["block_id", "start_cursor", "page_size"],
            &[Requirement::Key("block_id")],
        ),
    },
    OperationDecl {
        name: "comments.create",
        verb: HttpVerb::Post,
        path: "comments",
        params: &[Param::optional(BODY_DATA)],
        body: json_body(
            &["parent", "discussion_id", "rich_text"],
            &[
                Requirement::Key("rich_text"),
                Requirement::OneOf(&["discussion_id", "parent"]),
            ],
        ),
    },
    // search
    OperationDecl {
        name: "search",
        verb: HttpVerb::Post,
        path: "search",
        params: &[Param::optional(BODY_DATA)],
        body: json_body(&["query", "sort", "filter", "start_cursor", "page_size"], &[]),
    },
];

#[derive(Debug, Clone)]
enum Binding {
    Plain(Signature),
    Folded(CallShape),
}

impl Binding {
    fn bind(&self, args: CallArgs) -> Result<BoundCall, LocalValidationError> {
        match self {
            Binding::Plain(signature) => signature.bind(args),
            Binding::Folded(shape) => shape.bind(args),
        }
    }

    fn signature(&self) -> &Signature {
        match self {
            Binding::Plain(signature) => signature,
            Binding::Folded(shape) => shape.signature(),
        }
    }
}

/// One endpoint, ready to turn call arguments into a request.
#[derive(Debug, Clone)]
pub struct Operation {
    name: &'static str,
    verb: HttpVerb,
    path: &'static str,
    binding: Binding,
    body: Option<(BodyRule, BodyTarget)>,
}

impl Operation {
    fn from_decl(decl: &OperationDecl) -> Result<Self, DefinitionError> {
        let signature = Signature::new(decl.name, decl.params.iter().copied())?;

        for name in decl.path.split('/').filter_map(placeholder) {
            if signature.param(name).is_none() {
                return Err(DefinitionError::UndeclaredParameter {
                    operation: decl.name,
                    param: name,
                });
            }
        }

        let (binding, body) = match &decl.body {
            None => (Binding::Plain(signature), None),
            Some(body) => {
                let shape = CallShape::new(signature, body.param)?;
                let rule = BodyRule::new(
                    body.param,
                    body.scope.iter().copied(),
                    body.required.iter().copied(),
                )?;
                (Binding::Folded(shape), Some((rule, body.target)))
            }
        };

        Ok(Self {
            name: decl.name,
            verb: decl.verb,
            path: decl.path,
            binding,
            body,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// Path template relative to the API root, e.g. `pages/{page_id}`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn params(&self) -> &[Param] {
        self.binding.signature().params()
    }

    /// Name of the parameter carrying the body or query mapping.
    pub fn body_param(&self) -> Option<&'static str> {
        self.body.as_ref().map(|(rule, _)| rule.param())
    }

    pub fn body_rule(&self) -> Option<&BodyRule> {
        self.body.as_ref().map(|(rule, _)| rule)
    }

    pub fn body_target(&self) -> Option<BodyTarget> {
        self.body.as_ref().map(|(_, target)| *target)
    }

    /// Binds, validates and renders a call. Nothing is sent.
    pub fn prepare(&self, args: CallArgs) -> Result<PreparedRequest, LocalValidationError> {
        let mut bound = self.binding.bind(args)?;

        let payload = match &self.body {
            Some((rule, target)) => {
                rule.validate(bound.get(rule.param()))?;
                let value = bound
                    .take(rule.param())
                    .unwrap_or_else(|| Value::Object(Map::new()));
                Some((value, *target, rule.param()))
            }
            None => None,
        };

        let request = PreparedRequest::new(self.verb, self.render_path(&bound)?);
        Ok(match payload {
            Some((value, BodyTarget::Json, _)) => request.with_body(value),
            Some((value, BodyTarget::Query, param)) => {
                request.with_query(query_pairs(param, &value)?)
            }
            None => request,
        })
    }

    fn render_path(&self, bound: &BoundCall) -> Result<Vec<String>, LocalValidationError> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match placeholder(segment) {
                Some(name) => self.path_arg(bound, name),
                None => Ok(segment.to_string()),
            })
            .collect()
    }

    /// A decoded path argument. Empty, `.` and `..` would not survive as
    /// their own URL segment and are rejected.
    fn path_arg(&self, bound: &BoundCall, name: &str) -> Result<String, LocalValidationError> {
        let value = super::request::decode_path_param(bound.str_arg(name)?);
        if matches!(value.as_str(), "" | "." | "..") {
            return Err(LocalValidationError::InvalidArgument {
                operation: self.name.to_string(),
                param: name.to_string(),
                reason: format!("`{}` cannot be used as a path segment", value),
            });
        }
        Ok(value)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Every declared operation, by name.
#[derive(Debug)]
pub struct Catalog {
    operations: IndexMap<&'static str, Operation>,
}

impl Catalog {
    fn build(declarations: &[OperationDecl]) -> Result<Self, DefinitionError> {
        let mut operations = IndexMap::with_capacity(declarations.len());
        for decl in declarations {
            let operation = Operation::from_decl(decl)?;
            if operations.insert(decl.name, operation).is_some() {
                return Err(DefinitionError::DuplicateOperation(decl.name));
            }
        }
        Ok(Self { operations })
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Looks up `name` and prepares a request for it.
    pub fn prepare(&self, name: &str, args: CallArgs) -> Result<PreparedRequest, NotionError> {
        let operation = self
            .get(name)
            .ok_or_else(|| NotionError::UnknownOperation(name.to_string()))?;
        Ok(operation.prepare(args)?)
    }
}

static CATALOG: Lazy<Result<Catalog, DefinitionError>> =
    Lazy::new(|| Catalog::build(DECLARATIONS));

/// The process-wide operation catalog.
pub fn catalog() -> Result<&'static Catalog, DefinitionError> {
    CATALOG.as_ref().map_err(Clone::clone)
}
