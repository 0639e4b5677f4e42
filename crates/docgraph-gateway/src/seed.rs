//! Seed-data provisioning.
//!
//! The graph is provisioned once at startup and treated as immutable for
//! the lifetime of the process. Provisioning is idempotent: records are
//! keyed, so re-seeding an existing sled store overwrites in place.

use std::path::Path;

use docgraph_core::{Collection, Error, MemoryAdapter, Record, SledAdapter};
use tracing::info;

/// The seeded users.
pub fn users() -> Vec<Record> {
    vec![
        Record::new()
            .with_field("id", 1i64)
            .with_field("username", "john_doe")
            .with_field("email", "john@company.com")
            .with_field("role", "employee"),
        Record::new()
            .with_field("id", 2i64)
            .with_field("username", "jane_smith")
            .with_field("email", "jane@company.com")
            .with_field("role", "manager"),
        Record::new()
            .with_field("id", 3i64)
            .with_field("username", "admin_user")
            .with_field("email", "admin@company.com")
            .with_field("role", "admin"),
    ]
}

/// The seeded documents. The sensitive note lands in the confidential
/// document's debug_info field; the visibility gate is the only thing
/// keeping it out of responses.
pub fn documents(secret_note: &str) -> Vec<Record> {
    vec![
        Record::new()
            .with_field("id", 1i64)
            .with_field("title", "Public Document")
            .with_field("content", "This is public content")
            .with_field("confidential", false)
            .with_field("internal_ref", "DOC_001")
            .with_field("debug_info", "Public access allowed")
            .with_field("user_id", 1i64),
        Record::new()
            .with_field("id", 2i64)
            .with_field("title", "--")
            .with_field("content", "Secret business data")
            .with_field("confidential", true)
            .with_field("internal_ref", "SECRET_002")
            .with_field("debug_info", secret_note)
            .with_field("user_id", 3i64),
        Record::new()
            .with_field("id", 3i64)
            .with_field("title", "User Manual")
            .with_field("content", "How to use the system")
            .with_field("confidential", false)
            .with_field("internal_ref", "DOC_003")
            .with_field("debug_info", "General documentation")
            .with_field("user_id", 2i64),
        Record::new()
            .with_field("id", 4i64)
            .with_field("title", "Internal Memo")
            .with_field("content", "Company internal communication")
            .with_field("confidential", true)
            .with_field("internal_ref", "MEMO_004")
            .with_field("debug_info", "Internal use only")
            .with_field("user_id", 2i64),
    ]
}

/// Provision a seeded in-process store.
pub fn provision_memory(secret_note: &str) -> Result<MemoryAdapter, Error> {
    let mut adapter = MemoryAdapter::new();
    for record in users() {
        adapter.insert(Collection::Users, record)?;
    }
    for record in documents(secret_note) {
        adapter.insert(Collection::Documents, record)?;
    }
    info!("Seeded in-process store");
    Ok(adapter)
}

/// Provision a seeded sled store at the given data directory.
pub fn provision_sled(path: &Path, secret_note: &str) -> Result<SledAdapter, Error> {
    let adapter = SledAdapter::open(path)?;
    for record in users() {
        adapter.insert(Collection::Users, record)?;
    }
    for record in documents(secret_note) {
        adapter.insert(Collection::Documents, record)?;
    }
    adapter.flush()?;
    info!(path = %path.display(), "Seeded sled store");
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        assert_eq!(users().len(), 3);

        let documents = documents("note");
        assert_eq!(documents.len(), 4);

        // Every document references a seeded user.
        let user_ids: Vec<i64> = users().iter().map(|u| u.key().unwrap()).collect();
        for document in &documents {
            let fk = document.get("user_id").and_then(|v| v.as_i64()).unwrap();
            assert!(user_ids.contains(&fk));
        }
    }

    #[test]
    fn test_secret_note_lands_in_confidential_document() {
        let documents = documents("classified");
        let doc2 = documents.iter().find(|d| d.key() == Some(2)).unwrap();

        assert_eq!(doc2.get("confidential").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(doc2.get("debug_info").and_then(|v| v.as_str()), Some("classified"));
    }
}
