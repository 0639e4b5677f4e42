//! Fixed schema for the users/documents graph.
//!
//! The object graph is closed: two collections and two one-hop relations
//! between them. The resolver and assembler read the schema from here
//! rather than hardcoding field lists at each call site.

use std::fmt;

/// Field carrying the per-document confidentiality flag.
pub const CONFIDENTIAL_FIELD: &str = "confidential";

/// A named collection in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The `users` collection.
    Users,
    /// The `documents` collection.
    Documents,
}

impl Collection {
    /// Collection name as stored in the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Documents => "documents",
        }
    }

    /// The integer key field.
    pub fn key_field(&self) -> &'static str {
        "id"
    }

    /// Fields the schema declares for this collection.
    ///
    /// The assembler emits nothing outside this list; a declared field
    /// absent from a record is omitted from the response, not null-filled.
    pub fn declared_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Users => &["id", "username", "email", "role"],
            Collection::Documents => &[
                "id",
                "title",
                "content",
                "confidential",
                "internal_ref",
                "debug_info",
                "user_id",
            ],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinality of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Foreign key on the source side points at one target record.
    ManyToOne,
    /// Target records carry a foreign key back to the source.
    OneToMany,
}

/// A relation definition between two collections.
#[derive(Debug, Clone)]
pub struct RelationDef {
    /// Relation name as it appears in response trees.
    pub name: &'static str,
    /// Source collection.
    pub from: Collection,
    /// Target collection.
    pub to: Collection,
    /// Relation cardinality.
    pub cardinality: Cardinality,
    /// Field on the source side (foreign key for many-to-one, key
    /// otherwise).
    pub from_field: &'static str,
    /// Field on the target side the source field is matched against.
    pub to_field: &'static str,
    /// Whether the resolved relation may be null in a response.
    pub nullable: bool,
}

/// Document -> owning user, by foreign key.
pub fn owner_relation() -> RelationDef {
    RelationDef {
        name: "owner",
        from: Collection::Documents,
        to: Collection::Users,
        cardinality: Cardinality::ManyToOne,
        from_field: "user_id",
        to_field: "id",
        nullable: true,
    }
}

/// User -> owned documents. The relation is query-time filtered: only
/// documents passing the visibility policy belong to it.
pub fn documents_relation() -> RelationDef {
    RelationDef {
        name: "documents",
        from: Collection::Users,
        to: Collection::Documents,
        cardinality: Cardinality::OneToMany,
        from_field: "id",
        to_field: "user_id",
        nullable: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Users.as_str(), "users");
        assert_eq!(Collection::Documents.as_str(), "documents");
        assert_eq!(Collection::Users.key_field(), "id");
    }

    #[test]
    fn test_declared_fields_cover_annotations() {
        let fields = Collection::Documents.declared_fields();
        assert!(fields.contains(&"internal_ref"));
        assert!(fields.contains(&"debug_info"));
        assert!(fields.contains(&CONFIDENTIAL_FIELD));
    }

    #[test]
    fn test_relations_are_inverse_pairs() {
        let owner = owner_relation();
        let documents = documents_relation();

        assert_eq!(owner.from, documents.to);
        assert_eq!(owner.to, documents.from);
        assert_eq!(owner.from_field, documents.to_field);
        assert_eq!(owner.cardinality, Cardinality::ManyToOne);
        assert_eq!(documents.cardinality, Cardinality::OneToMany);
        assert!(owner.nullable);
        assert!(!documents.nullable);
    }
}
