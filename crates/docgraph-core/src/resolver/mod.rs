//! Entity resolution for the users/documents graph.
//!
//! A resolution request moves through a fixed pipeline: fetch the root
//! records, resolve their one-hop relations, assemble the response tree.
//! The visibility policy is pushed into the storage scan wherever
//! possible and re-checked immediately before assembly, so a confidential
//! document cannot reach a response through any path.

pub mod assemble;

use std::sync::Arc;

use crate::error::Error;
use crate::filter::{self, FilterExpr, Predicate, ScalarMode};
use crate::policy;
use crate::schema::{self, Collection};
use crate::storage::{Record, StorageAdapter};
use docgraph_proto::Value;

/// Lifecycle of one resolution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Request accepted, nothing fetched yet.
    Pending,
    /// Fetching root records.
    FetchingRoot,
    /// Resolving declared relations for the roots.
    ResolvingRelations,
    /// Response tree assembled.
    Assembled,
    /// Request failed; no partial tree is returned.
    Failed,
}

/// Per-request context tracking the resolution state machine.
struct ResolutionCtx {
    operation: &'static str,
    state: ResolutionState,
}

impl ResolutionCtx {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            state: ResolutionState::Pending,
        }
    }

    fn advance(&mut self, next: ResolutionState) {
        tracing::debug!(
            operation = self.operation,
            from = ?self.state,
            to = ?next,
            "resolution state"
        );
        self.state = next;
    }
}

/// Resolves root operations against a storage adapter.
///
/// The resolver holds the adapter behind the abstract trait and does not
/// know which backend it is talking to. It performs reads only; relation
/// depth is one hop in each direction by construction, so no traversal
/// bookkeeping is required while the relation set stays acyclic.
pub struct Resolver {
    storage: Arc<dyn StorageAdapter>,
}

impl Resolver {
    /// Create a resolver over a storage adapter.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    /// Resolve all users with their visible documents.
    pub fn get_users(&self) -> Result<serde_json::Value, Error> {
        self.run("getUsers", |this, ctx| this.users_root(ctx, None))
    }

    /// Resolve one user by key; null when absent.
    pub fn get_user(&self, key: i64) -> Result<serde_json::Value, Error> {
        self.run("getUser", |this, ctx| {
            ctx.advance(ResolutionState::FetchingRoot);
            let user = match this.storage.get_by_key(Collection::Users, key)? {
                Some(user) => user,
                None => {
                    ctx.advance(ResolutionState::Assembled);
                    return Ok(serde_json::Value::Null);
                }
            };

            ctx.advance(ResolutionState::ResolvingRelations);
            let tree = this.user_tree(&user)?;
            ctx.advance(ResolutionState::Assembled);
            Ok(tree)
        })
    }

    /// Resolve all visible documents with their owners.
    pub fn get_documents(&self) -> Result<serde_json::Value, Error> {
        self.run("getDocuments", |this, ctx| this.documents_root(ctx, None))
    }

    /// Resolve one document by key; null when absent or confidential.
    pub fn get_document(&self, key: i64) -> Result<serde_json::Value, Error> {
        self.run("getDocument", |this, ctx| {
            ctx.advance(ResolutionState::FetchingRoot);
            let document = match this.storage.get_by_key(Collection::Documents, key)? {
                Some(document) if policy::is_visible(Collection::Documents, &document) => document,
                Some(_) => {
                    tracing::debug!(key, "confidential document suppressed from by-key lookup");
                    ctx.advance(ResolutionState::Assembled);
                    return Ok(serde_json::Value::Null);
                }
                None => {
                    ctx.advance(ResolutionState::Assembled);
                    return Ok(serde_json::Value::Null);
                }
            };

            ctx.advance(ResolutionState::ResolvingRelations);
            let tree = this.document_tree(&document)?;
            ctx.advance(ResolutionState::Assembled);
            Ok(tree)
        })
    }

    /// Resolve users whose name matches the client filter.
    pub fn search_users_by_name(&self, input: &serde_json::Value) -> Result<serde_json::Value, Error> {
        self.run("searchUsersByName", |this, ctx| {
            // Interpreted before any storage call; an invalid filter
            // performs zero backend lookups.
            let expr = filter::parse("username", input, ScalarMode::Substring)?;
            this.users_root(ctx, Some(expr))
        })
    }

    /// Resolve visible documents whose title matches the client filter.
    pub fn search_documents_by_title(
        &self,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        self.run("searchDocumentsByTitle", |this, ctx| {
            let expr = filter::parse("title", input, ScalarMode::Equality)?;
            this.documents_root(ctx, Some(expr))
        })
    }

    /// Drive one request through the state machine.
    fn run(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Self, &mut ResolutionCtx) -> Result<serde_json::Value, Error>,
    ) -> Result<serde_json::Value, Error> {
        let mut ctx = ResolutionCtx::new(operation);
        match f(self, &mut ctx) {
            Ok(tree) => Ok(tree),
            Err(err) => {
                ctx.advance(ResolutionState::Failed);
                tracing::debug!(operation, error = %err, "resolution failed");
                Err(err)
            }
        }
    }

    fn users_root(
        &self,
        ctx: &mut ResolutionCtx,
        user_filter: Option<FilterExpr>,
    ) -> Result<serde_json::Value, Error> {
        ctx.advance(ResolutionState::FetchingRoot);
        let roots = self.fetch_visible(Collection::Users, user_filter)?;

        ctx.advance(ResolutionState::ResolvingRelations);
        let mut nodes = Vec::with_capacity(roots.len());
        for user in &roots {
            nodes.push(self.user_tree(user)?);
        }

        ctx.advance(ResolutionState::Assembled);
        Ok(serde_json::Value::Array(nodes))
    }

    fn documents_root(
        &self,
        ctx: &mut ResolutionCtx,
        user_filter: Option<FilterExpr>,
    ) -> Result<serde_json::Value, Error> {
        ctx.advance(ResolutionState::FetchingRoot);
        let roots = self.fetch_visible(Collection::Documents, user_filter)?;

        ctx.advance(ResolutionState::ResolvingRelations);
        let nodes = self.document_trees(&roots)?;

        ctx.advance(ResolutionState::Assembled);
        Ok(serde_json::Value::Array(nodes))
    }

    /// Fetch records with the visibility policy pushed into the scan.
    fn fetch_visible(
        &self,
        collection: Collection,
        user_filter: Option<FilterExpr>,
    ) -> Result<Vec<Record>, Error> {
        let combined = policy::combine_filters(user_filter, policy::visibility_filter(collection));
        match combined {
            Some(expr) => {
                let predicate = Predicate::new(expr);
                let result = self.storage.scan_where(collection, &predicate)?.collect();
                result
            }
            None => self.storage.scan_all(collection)?.collect(),
        }
    }

    /// Resolve one user's `documents` relation and assemble the node.
    fn user_tree(&self, user: &Record) -> Result<serde_json::Value, Error> {
        let relation = schema::documents_relation();
        let owned = match user.get(relation.from_field).and_then(Value::as_i64) {
            Some(key) => {
                let by_owner = FilterExpr::eq(relation.to_field, Value::Int(key));
                self.fetch_visible(relation.to, Some(by_owner))?
            }
            None => Vec::new(),
        };

        let documents = self.document_trees(&owned)?;
        Ok(assemble::user_node(user, documents))
    }

    /// Assemble document nodes, re-checking visibility at the last gate.
    ///
    /// Output order matches the input (root fetch) order.
    fn document_trees(&self, documents: &[Record]) -> Result<Vec<serde_json::Value>, Error> {
        let mut nodes = Vec::with_capacity(documents.len());
        for document in documents {
            if !policy::is_visible(Collection::Documents, document) {
                tracing::warn!(
                    key = document.key(),
                    "confidential document discarded by pre-assembly re-check"
                );
                continue;
            }
            nodes.push(self.document_tree(document)?);
        }
        Ok(nodes)
    }

    /// Resolve one document's `owner` relation and assemble the node.
    fn document_tree(&self, document: &Record) -> Result<serde_json::Value, Error> {
        let relation = schema::owner_relation();
        let owner = match document.get(relation.from_field).and_then(Value::as_i64) {
            Some(key) => self.storage.get_by_key(relation.to, key)?,
            None => None,
        };
        Ok(assemble::document_node(document, owner.as_ref()))
    }
}
