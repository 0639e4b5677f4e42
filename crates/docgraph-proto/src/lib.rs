//! Docgraph protocol types.
//!
//! This crate defines the JSON contract of the docgraph query endpoint:
//! the inbound request envelope (operation name plus named arguments), the
//! outbound response envelope, and the runtime [`Value`] type stored in
//! records and returned in response trees.
//!
//! Filter values deliberately have no typed representation here. A filter
//! crosses the wire as raw JSON inside `arguments` and is only given
//! meaning by the core's filter interpreter, so nothing client-shaped can
//! be deserialized straight into a backend-evaluable form.
//!
//! # Modules
//!
//! - [`value`] - Runtime value types for record fields
//! - [`request`] - Inbound query envelope
//! - [`response`] - Outbound response envelope and error body
//! - [`error`] - Machine-readable error codes

pub mod error;
pub mod request;
pub mod response;
pub mod value;

pub use error::{codes, ErrorBody};
pub use request::QueryRequest;
pub use response::{QueryMeta, QueryResponse};
pub use value::Value;
