//! Query front-end: operation dispatch and argument validation.
//!
//! Maps an inbound request to one of the fixed root operations. Argument
//! presence and types are validated here, before the resolver touches a
//! storage adapter.

use std::sync::Arc;

use crate::error::Error;
use crate::resolver::Resolver;
use crate::storage::StorageAdapter;
use docgraph_proto::QueryRequest;

/// A validated root operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RootOperation {
    /// All users with their visible documents.
    GetUsers,
    /// One user by key.
    GetUser { key: i64 },
    /// All visible documents with their owners.
    GetDocuments,
    /// One document by key.
    GetDocument { key: i64 },
    /// Users matching a name filter.
    SearchUsersByName { filter: serde_json::Value },
    /// Visible documents matching a title filter.
    SearchDocumentsByTitle { filter: serde_json::Value },
}

impl RootOperation {
    /// Validate a request into a root operation.
    ///
    /// Filter values are passed through raw; interpreting them is the
    /// filter interpreter's job, not the front-end's.
    pub fn parse(request: &QueryRequest) -> Result<Self, Error> {
        match request.operation.as_str() {
            "getUsers" => {
                validate_argument_names(request, &[])?;
                Ok(RootOperation::GetUsers)
            }
            "getUser" => {
                validate_argument_names(request, &["key"])?;
                Ok(RootOperation::GetUser {
                    key: integer_argument(request, "key")?,
                })
            }
            "getDocuments" => {
                validate_argument_names(request, &[])?;
                Ok(RootOperation::GetDocuments)
            }
            "getDocument" => {
                validate_argument_names(request, &["key"])?;
                Ok(RootOperation::GetDocument {
                    key: integer_argument(request, "key")?,
                })
            }
            "searchUsersByName" => {
                validate_argument_names(request, &["filter"])?;
                Ok(RootOperation::SearchUsersByName {
                    filter: filter_argument(request)?,
                })
            }
            "searchDocumentsByTitle" => {
                validate_argument_names(request, &["filter"])?;
                Ok(RootOperation::SearchDocumentsByTitle {
                    filter: filter_argument(request)?,
                })
            }
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }

    /// The operation name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            RootOperation::GetUsers => "getUsers",
            RootOperation::GetUser { .. } => "getUser",
            RootOperation::GetDocuments => "getDocuments",
            RootOperation::GetDocument { .. } => "getDocument",
            RootOperation::SearchUsersByName { .. } => "searchUsersByName",
            RootOperation::SearchDocumentsByTitle { .. } => "searchDocumentsByTitle",
        }
    }
}

/// Reject argument names outside the operation's expected set.
fn validate_argument_names(request: &QueryRequest, allowed: &[&str]) -> Result<(), Error> {
    for name in request.arguments.keys() {
        if !allowed.contains(&name.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "unexpected argument '{}' for operation '{}'",
                name, request.operation
            )));
        }
    }
    Ok(())
}

/// Extract a required integer argument. Floats, strings, and booleans are
/// rejected rather than coerced.
fn integer_argument(request: &QueryRequest, name: &str) -> Result<i64, Error> {
    let value = request
        .argument(name)
        .ok_or_else(|| Error::InvalidArgument(format!("missing required argument '{}'", name)))?;
    value
        .as_i64()
        .ok_or_else(|| Error::InvalidArgument(format!("argument '{}' must be an integer", name)))
}

/// Extract the required raw filter argument.
fn filter_argument(request: &QueryRequest) -> Result<serde_json::Value, Error> {
    request
        .argument("filter")
        .cloned()
        .ok_or_else(|| Error::InvalidArgument("missing required argument 'filter'".to_string()))
}

/// The dispatch seam in front of the resolver.
pub struct QueryFrontEnd {
    resolver: Resolver,
}

impl QueryFrontEnd {
    /// Create a front-end over a storage adapter.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            resolver: Resolver::new(storage),
        }
    }

    /// Validate and execute one request, returning the resolved tree.
    pub fn execute(&self, request: &QueryRequest) -> Result<serde_json::Value, Error> {
        let operation = RootOperation::parse(request)?;
        tracing::debug!(operation = operation.name(), "dispatching root operation");

        match operation {
            RootOperation::GetUsers => self.resolver.get_users(),
            RootOperation::GetUser { key } => self.resolver.get_user(key),
            RootOperation::GetDocuments => self.resolver.get_documents(),
            RootOperation::GetDocument { key } => self.resolver.get_document(key),
            RootOperation::SearchUsersByName { filter } => {
                self.resolver.search_users_by_name(&filter)
            }
            RootOperation::SearchDocumentsByTitle { filter } => {
                self.resolver.search_documents_by_title(&filter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fixed_operation_set() {
        let op = RootOperation::parse(&QueryRequest::new("getUsers")).unwrap();
        assert_eq!(op, RootOperation::GetUsers);

        let op = RootOperation::parse(
            &QueryRequest::new("getUser").with_argument("key", json!(2)),
        )
        .unwrap();
        assert_eq!(op, RootOperation::GetUser { key: 2 });

        let op = RootOperation::parse(
            &QueryRequest::new("searchDocumentsByTitle").with_argument("filter", json!("--")),
        )
        .unwrap();
        assert_eq!(op.name(), "searchDocumentsByTitle");
    }

    #[test]
    fn test_unknown_operation() {
        let err = RootOperation::parse(&QueryRequest::new("dropUsers")).unwrap_err();
        match err {
            Error::UnknownOperation(name) => assert_eq!(name, "dropUsers"),
            other => panic!("expected UnknownOperation, got {:?}", other),
        }
    }

    #[test]
    fn test_key_must_be_integer() {
        for bad in [json!("2"), json!(2.5), json!(true), json!(null)] {
            let err = RootOperation::parse(
                &QueryRequest::new("getDocument").with_argument("key", bad),
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(matches!(
            RootOperation::parse(&QueryRequest::new("getUser")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            RootOperation::parse(&QueryRequest::new("searchUsersByName")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unexpected_arguments_rejected() {
        let err = RootOperation::parse(
            &QueryRequest::new("getUsers").with_argument("key", json!(1)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = RootOperation::parse(
            &QueryRequest::new("getUser")
                .with_argument("key", json!(1))
                .with_argument("depth", json!(3)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_filter_passes_through_raw() {
        let raw = json!({"$regex": ".*"});
        let op = RootOperation::parse(
            &QueryRequest::new("searchUsersByName").with_argument("filter", raw.clone()),
        )
        .unwrap();
        // The front-end does not judge filter contents; the interpreter
        // rejects this later, before any storage call.
        assert_eq!(op, RootOperation::SearchUsersByName { filter: raw });
    }
}
