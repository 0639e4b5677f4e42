//! Result assembly: shaping resolved records into response trees.
//!
//! The assembler projects schema-declared fields and stitches resolved
//! relations together. It applies no policy: visibility is decided before
//! records reach this module.

use crate::schema::Collection;
use crate::storage::Record;

/// Project a record onto its collection's declared fields.
///
/// A declared field absent from the record is omitted, never null-filled.
/// Undeclared fields never appear, whatever the record carries.
fn project(collection: Collection, record: &Record) -> serde_json::Map<String, serde_json::Value> {
    let mut node = serde_json::Map::new();
    for field in collection.declared_fields() {
        if let Some(value) = record.get(field) {
            node.insert((*field).to_string(), value.to_json());
        }
    }
    node
}

/// Assemble a user node with its resolved `documents` relation.
pub(crate) fn user_node(
    user: &Record,
    documents: Vec<serde_json::Value>,
) -> serde_json::Value {
    let mut node = project(Collection::Users, user);
    node.insert("documents".to_string(), serde_json::Value::Array(documents));
    serde_json::Value::Object(node)
}

/// Assemble a document node with its resolved `owner` relation.
///
/// The owner is schema-nullable: a relation that genuinely resolved to no
/// match is emitted as null. The nested owner is flat - it does not carry
/// a `documents` relation of its own.
pub(crate) fn document_node(document: &Record, owner: Option<&Record>) -> serde_json::Value {
    let mut node = project(Collection::Documents, document);
    let owner_json = match owner {
        Some(owner) => serde_json::Value::Object(project(Collection::Users, owner)),
        None => serde_json::Value::Null,
    };
    node.insert("owner".to_string(), owner_json);
    serde_json::Value::Object(node)
}
