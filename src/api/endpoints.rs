// src/api/endpoints.rs
//! Typed endpoint groups.
//!
//! Each method is a thin front over [`Dispatch::call`]: path ids are passed
//! positionally and the body goes through [`BodyInput`], so it can be a
//! single JSON value or loose keyword arguments.

use super::Dispatch;
use crate::types::{BodyInput, CallArgs};

fn with_body(args: CallArgs, body: impl Into<BodyInput>) -> CallArgs {
    body.into().apply(args)
}

/// `pages.*`
pub struct Pages<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> Pages<'a, D> {
    pub(crate) fn new(client: &'a D) -> Self {
        Self { client }
    }

    /// Creates a page under a page or database parent.
    pub fn create(&self, body: impl Into<BodyInput>) -> D::Output {
        self.client.call("pages.create", with_body(CallArgs::new(), body))
    }

    pub fn retrieve(&self, page_id: &str) -> D::Output {
        self.client.call("pages.retrieve", CallArgs::new().arg(page_id))
    }

    /// Updates page properties, icon, cover, or archives the page.
    pub fn update(&self, page_id: &str, body: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("pages.update", with_body(CallArgs::new().arg(page_id), body))
    }

    pub fn properties(&self) -> PageProperties<'a, D> {
        PageProperties {
            client: self.client,
        }
    }
}

/// `pages.properties.*`
pub struct PageProperties<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> PageProperties<'a, D> {
    /// Retrieves one property item. `property_id` may be given percent-encoded.
    pub fn retrieve(
        &self,
        page_id: &str,
        property_id: &str,
        query: impl Into<BodyInput>,
    ) -> D::Output {
        let args = CallArgs::new().arg(page_id).arg(property_id);
        self.client
            .call("pages.properties.retrieve", with_body(args, query))
    }
}

/// `blocks.*`
pub struct Blocks<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> Blocks<'a, D> {
    pub(crate) fn new(client: &'a D) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, block_id: &str) -> D::Output {
        self.client.call("blocks.retrieve", CallArgs::new().arg(block_id))
    }

    pub fn update(&self, block_id: &str, body: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("blocks.update", with_body(CallArgs::new().arg(block_id), body))
    }

    /// Archives the block.
    pub fn delete(&self, block_id: &str) -> D::Output {
        self.client.call("blocks.delete", CallArgs::new().arg(block_id))
    }

    pub fn children(&self) -> BlockChildren<'a, D> {
        BlockChildren {
            client: self.client,
        }
    }
}

/// `blocks.children.*`
pub struct BlockChildren<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> BlockChildren<'a, D> {
    pub fn append(&self, block_id: &str, body: impl Into<BodyInput>) -> D::Output {
        self.client.call(
            "blocks.children.append",
            with_body(CallArgs::new().arg(block_id), body),
        )
    }

    pub fn list(&self, block_id: &str, query: impl Into<BodyInput>) -> D::Output {
        self.client.call(
            "blocks.children.list",
            with_body(CallArgs::new().arg(block_id), query),
        )
    }
}

/// `databases.*`
pub struct Databases<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> Databases<'a, D> {
    pub(crate) fn new(client: &'a D) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, database_id: &str) -> D::Output {
        self.client
            .call("databases.retrieve", CallArgs::new().arg(database_id))
    }

    /// Queries rows, optionally filtered and sorted.
    pub fn query(&self, database_id: &str, body: impl Into<BodyInput>) -> D::Output {
        self.client.call(
            "databases.query",
            with_body(CallArgs::new().arg(database_id), body),
        )
    }

    pub fn create(&self, body: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("databases.create", with_body(CallArgs::new(), body))
    }

    pub fn update(&self, database_id: &str, body: impl Into<BodyInput>) -> D::Output {
        self.client.call(
            "databases.update",
            with_body(CallArgs::new().arg(database_id), body),
        )
    }

    /// Lists databases shared with the integration. Deprecated by Notion in
    /// favour of `search`, kept for older API versions.
    pub fn list(&self, query: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("databases.list", with_body(CallArgs::new(), query))
    }
}

/// `users.*`
pub struct Users<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> Users<'a, D> {
    pub(crate) fn new(client: &'a D) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, user_id: &str) -> D::Output {
        self.client.call("users.retrieve", CallArgs::new().arg(user_id))
    }

    pub fn list(&self, query: impl Into<BodyInput>) -> D::Output {
        self.client.call("users.list", with_body(CallArgs::new(), query))
    }

    /// The bot user behind the current token.
    pub fn me(&self) -> D::Output {
        self.client.call("users.me", CallArgs::new())
    }
}

/// `comments.*`
pub struct Comments<'a, D> {
    client: &'a D,
}

impl<'a, D: Dispatch> Comments<'a, D> {
    pub(crate) fn new(client: &'a D) -> Self {
        Self { client }
    }

    /// Lists open comments on a block or page; `block_id` is required.
    pub fn list(&self, query: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("comments.list", with_body(CallArgs::new(), query))
    }

    /// Comments on a page (`parent`) or replies in a thread (`discussion_id`).
    pub fn create(&self, body: impl Into<BodyInput>) -> D::Output {
        self.client
            .call("comments.create", with_body(CallArgs::new(), body))
    }
}
