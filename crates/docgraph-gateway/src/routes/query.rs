//! Query endpoint.

use axum::{extract::State, routing::post, Json, Router};
use docgraph_proto::{QueryRequest, QueryResponse};

use crate::error::AppError;
use crate::AppState;

/// Query routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/query", post(handle_query))
}

/// Handle a graph query.
async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    let data = state.frontend.execute(&request)?;
    Ok(Json(QueryResponse::ok(request.operation, data)))
}
