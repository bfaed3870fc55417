//! Agent endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::{validate_body, MutationResponse};
use crate::db::repos::AgentRepo;
use crate::db::Row;
use crate::http::error::ApiError;
use crate::http::extractors::RawFields;
use crate::http::server::AppState;
use crate::models::{NewAgent, NEW_AGENT_RULES};

/// PUT /addAgent
#[instrument(skip(state, body))]
async fn add_agent(
    State(state): State<Arc<AppState>>,
    RawFields(body): RawFields,
) -> Result<Json<MutationResponse>, ApiError> {
    let fields = validate_body(&NEW_AGENT_RULES, &body, "add_agent")?;
    let agent = NewAgent::new(fields)?;

    AgentRepo::new(&state.executor).insert(&agent).await?;

    tracing::info!(agent_code = %agent.code, "agent added");
    Ok(Json(MutationResponse::new("Agent added successfully")))
}

/// GET /getAgents
async fn list_agents(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = AgentRepo::new(&state.executor).list().await?;
    Ok(Json(rows))
}

/// Agent routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addAgent", put(add_agent))
        .route("/getAgents", get(list_agents))
}
