//! Integration tests for the graph query resolver.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docgraph_core::{
    Collection, Error, MemoryAdapter, Predicate, QueryFrontEnd, Record, RecordIter, Resolver,
    SledAdapter, StorageAdapter,
};
use docgraph_proto::QueryRequest;
use serde_json::json;

const SECRET_NOTE: &str = "ops-runbook-credentials";

fn seed_users() -> Vec<Record> {
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

fn seed_documents() -> Vec<Record> {
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
            .with_field("debug_info", SECRET_NOTE)
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

fn memory_adapter() -> MemoryAdapter {
    let mut adapter = MemoryAdapter::new();
    for user in seed_users() {
        adapter.insert(Collection::Users, user).unwrap();
    }
    for document in seed_documents() {
        adapter.insert(Collection::Documents, document).unwrap();
    }
    adapter
}

fn resolver() -> Resolver {
    Resolver::new(Arc::new(memory_adapter()))
}

/// Collect the `id` of every entry in a `documents` relation.
fn document_ids(relation: &serde_json::Value) -> Vec<i64> {
    relation
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_i64().unwrap())
        .collect()
}

/// Walk a response tree and assert no confidential material leaked.
fn assert_no_confidential(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            assert_ne!(map.get("confidential"), Some(&json!(true)));
            assert_ne!(map.get("debug_info"), Some(&json!(SECRET_NOTE)));
            for nested in map.values() {
                assert_no_confidential(nested);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                assert_no_confidential(item);
            }
        }
        _ => {}
    }
}

/// Adapter wrapper that counts every storage access.
struct CountingAdapter {
    inner: MemoryAdapter,
    calls: AtomicUsize,
}

impl CountingAdapter {
    fn new() -> Self {
        Self {
            inner: memory_adapter(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StorageAdapter for CountingAdapter {
    fn get_by_key(&self, collection: Collection, key: i64) -> Result<Option<Record>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_key(collection, key)
    }

    fn scan_all(&self, collection: Collection) -> Result<RecordIter<'_>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.scan_all(collection)
    }

    fn scan_where<'a>(
        &'a self,
        collection: Collection,
        predicate: &'a Predicate,
    ) -> Result<RecordIter<'a>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.scan_where(collection, predicate)
    }
}

/// Adapter simulating a backend that is down.
struct FailingAdapter;

impl StorageAdapter for FailingAdapter {
    fn get_by_key(&self, _collection: Collection, _key: i64) -> Result<Option<Record>, Error> {
        Err(Error::StorageUnavailable("backend offline".to_string()))
    }

    fn scan_all(&self, _collection: Collection) -> Result<RecordIter<'_>, Error> {
        Err(Error::StorageUnavailable("backend offline".to_string()))
    }
}

// ============== Tests ==============

#[test]
fn test_get_users_resolves_visible_documents_in_key_order() {
    let tree = resolver().get_users().unwrap();
    let users = tree.as_array().unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["username"], json!("john_doe"));
    assert_eq!(users[1]["username"], json!("jane_smith"));
    assert_eq!(users[2]["username"], json!("admin_user"));

    assert_eq!(document_ids(&users[0]["documents"]), vec![1]);
    // Jane owns documents 3 and 4; 4 is confidential.
    assert_eq!(document_ids(&users[1]["documents"]), vec![3]);
    // Admin owns only the confidential document 2.
    assert_eq!(document_ids(&users[2]["documents"]), Vec::<i64>::new());
}

#[test]
fn test_confidential_documents_absent_from_every_path() {
    let resolver = resolver();

    for tree in [
        resolver.get_users().unwrap(),
        resolver.get_documents().unwrap(),
        resolver.search_users_by_name(&json!({"exists": true})).unwrap(),
        resolver
            .search_documents_by_title(&json!({"exists": true}))
            .unwrap(),
        resolver
            .search_documents_by_title(&json!({"notEquals": "no-such-title"}))
            .unwrap(),
    ] {
        assert_no_confidential(&tree);
    }
}

#[test]
fn test_get_documents_returns_only_public_documents_with_owners() {
    let tree = resolver().get_documents().unwrap();
    let documents = tree.as_array().unwrap();

    let ids: Vec<i64> = documents.iter().map(|d| d["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);

    assert_eq!(documents[0]["owner"]["username"], json!("john_doe"));
    assert_eq!(documents[1]["owner"]["username"], json!("jane_smith"));
    // The nested owner is flat: no documents relation of its own.
    assert!(!documents[0]["owner"]
        .as_object()
        .unwrap()
        .contains_key("documents"));
}

#[test]
fn test_get_user_filters_owned_documents() {
    let tree = resolver().get_user(2).unwrap();

    assert_eq!(tree["username"], json!("jane_smith"));
    assert_eq!(document_ids(&tree["documents"]), vec![3]);
    assert_eq!(tree["documents"][0]["owner"]["username"], json!("jane_smith"));
}

#[test]
fn test_get_user_missing_key_resolves_to_null() {
    assert_eq!(resolver().get_user(99).unwrap(), serde_json::Value::Null);
}

#[test]
fn test_get_document_by_key_respects_confidentiality() {
    let resolver = resolver();

    // Key 2 exists but is confidential: null, not an error.
    assert_eq!(resolver.get_document(2).unwrap(), serde_json::Value::Null);
    assert_eq!(resolver.get_document(4).unwrap(), serde_json::Value::Null);
    assert_eq!(resolver.get_document(99).unwrap(), serde_json::Value::Null);

    let tree = resolver.get_document(1).unwrap();
    assert_eq!(tree["title"], json!("Public Document"));
    assert_eq!(tree["internal_ref"], json!("DOC_001"));
    assert_eq!(tree["owner"]["username"], json!("john_doe"));
}

#[test]
fn test_read_round_trip_is_idempotent() {
    let resolver = resolver();
    let users = resolver.get_users().unwrap();

    for user in users.as_array().unwrap() {
        let key = user["id"].as_i64().unwrap();
        let again = resolver.get_user(key).unwrap();
        assert_eq!(&again, user);
    }
}

#[test]
fn test_search_users_by_name() {
    let resolver = resolver();

    let tree = resolver.search_users_by_name(&json!({"contains": "john"})).unwrap();
    let users = tree.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], json!("john_doe"));

    let tree = resolver
        .search_users_by_name(&json!({"notEquals": "john_doe"}))
        .unwrap();
    let names: Vec<&str> = tree
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["jane_smith", "admin_user"]);

    // A bare string means substring containment for the name search.
    let tree = resolver.search_users_by_name(&json!("jane")).unwrap();
    assert_eq!(tree.as_array().unwrap().len(), 1);
}

#[test]
fn test_search_documents_by_title() {
    let resolver = resolver();

    // A bare scalar means equality for the title search.
    let tree = resolver.search_documents_by_title(&json!("User Manual")).unwrap();
    let documents = tree.as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["id"], json!(3));

    // Document 2 is titled "--" but confidential: equality on its exact
    // title still returns nothing.
    let tree = resolver.search_documents_by_title(&json!("--")).unwrap();
    assert_eq!(tree.as_array().unwrap().len(), 0);

    let tree = resolver
        .search_documents_by_title(&json!({"notEquals": "--"}))
        .unwrap();
    let ids: Vec<i64> = tree
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_matches_pattern_is_case_sensitive_containment() {
    let resolver = resolver();

    let tree = resolver
        .search_documents_by_title(&json!({"matchesPattern": "Doc"}))
        .unwrap();
    let ids: Vec<i64> = tree
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);

    let tree = resolver
        .search_documents_by_title(&json!({"matchesPattern": "doc"}))
        .unwrap();
    assert_eq!(tree.as_array().unwrap().len(), 0);
}

#[test]
fn test_invalid_filters_perform_zero_storage_calls() {
    let inputs = [
        json!({"$where": "sleep(1000)"}),
        json!({"$regex": ".*"}),
        json!({"matchesPattern": ".*"}),
        json!({"matchesPattern": ""}),
        json!({"equals": {"$ne": ""}}),
        json!({"exists": "yes"}),
        json!([1, 2, 3]),
        json!(null),
        json!({}),
    ];

    for input in &inputs {
        let adapter = Arc::new(CountingAdapter::new());
        let resolver = Resolver::new(adapter.clone());

        let err = resolver.search_documents_by_title(input).unwrap_err();
        assert!(
            matches!(err, Error::InvalidFilter(_)),
            "input {:?} should be InvalidFilter, got {:?}",
            input,
            err
        );
        assert_eq!(adapter.calls(), 0, "input {:?} reached storage", input);
    }

    // Substring mode rejects non-string scalars the same way.
    let adapter = Arc::new(CountingAdapter::new());
    let resolver = Resolver::new(adapter.clone());
    let err = resolver.search_users_by_name(&json!(5)).unwrap_err();
    assert!(matches!(err, Error::InvalidFilter(_)));
    assert_eq!(adapter.calls(), 0);
}

#[test]
fn test_storage_unavailable_fails_the_request() {
    let resolver = Resolver::new(Arc::new(FailingAdapter));

    assert!(matches!(
        resolver.get_users(),
        Err(Error::StorageUnavailable(_))
    ));
    assert!(matches!(
        resolver.get_document(1),
        Err(Error::StorageUnavailable(_))
    ));
    assert!(matches!(
        resolver.search_users_by_name(&json!({"contains": "a"})),
        Err(Error::StorageUnavailable(_))
    ));
}

#[test]
fn test_adapters_agree_on_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let sled_adapter = SledAdapter::open(dir.path()).unwrap();
    for user in seed_users() {
        sled_adapter.insert(Collection::Users, user).unwrap();
    }
    for document in seed_documents() {
        sled_adapter.insert(Collection::Documents, document).unwrap();
    }
    sled_adapter.flush().unwrap();

    let memory_front = QueryFrontEnd::new(Arc::new(memory_adapter()));
    let sled_front = QueryFrontEnd::new(Arc::new(sled_adapter));

    let requests = vec![
        QueryRequest::new("getUsers"),
        QueryRequest::new("getDocuments"),
        QueryRequest::new("getUser").with_argument("key", json!(1)),
        QueryRequest::new("getUser").with_argument("key", json!(2)),
        QueryRequest::new("getUser").with_argument("key", json!(42)),
        QueryRequest::new("getDocument").with_argument("key", json!(1)),
        QueryRequest::new("getDocument").with_argument("key", json!(2)),
        QueryRequest::new("getDocument").with_argument("key", json!(4)),
        QueryRequest::new("searchUsersByName").with_argument("filter", json!("john")),
        QueryRequest::new("searchUsersByName")
            .with_argument("filter", json!({"notEquals": "john_doe"})),
        QueryRequest::new("searchDocumentsByTitle").with_argument("filter", json!("User Manual")),
        QueryRequest::new("searchDocumentsByTitle")
            .with_argument("filter", json!({"matchesPattern": "Doc"})),
        QueryRequest::new("searchDocumentsByTitle").with_argument("filter", json!({"exists": true})),
    ];

    for request in requests {
        let from_memory = memory_front.execute(&request).unwrap();
        let from_sled = sled_front.execute(&request).unwrap();
        assert_eq!(
            from_memory, from_sled,
            "adapters diverged on {:?}",
            request.operation
        );
    }
}

#[test]
fn test_front_end_rejects_before_resolution() {
    let front = QueryFrontEnd::new(Arc::new(memory_adapter()));

    let err = front.execute(&QueryRequest::new("dumpSecrets")).unwrap_err();
    assert!(matches!(err, Error::UnknownOperation(_)));

    let err = front
        .execute(&QueryRequest::new("getUser").with_argument("key", json!(2.5)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
