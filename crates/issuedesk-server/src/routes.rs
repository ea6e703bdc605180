//! Request handlers.

use crate::error::{Error, Result};
use crate::models::HealthResponse;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use issuedesk::domain::{
    Issue, IssueId, IssuePage, IssueQuery, IssueUpdate, NewIssue, QueryParams,
};
use issuedesk::storage::IssueStorage;

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub(crate) async fn list_issues(
    State(state): State<AppState>,
    params: std::result::Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<IssuePage>> {
    // Every field is a plain string, so a rejection means an unparseable
    // query string rather than a bad value.
    let Query(params) = params.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;
    let query = IssueQuery::from_params(params, state.defaults())?;

    let storage = state.storage().read().await;
    let page = storage.query(&query).await?;
    Ok(Json(page))
}

pub(crate) async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Issue>> {
    let storage = state.storage().read().await;
    Ok(Json(storage.get(&IssueId::new(id)).await?))
}

pub(crate) async fn create_issue(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewIssue>, JsonRejection>,
) -> Result<(StatusCode, Json<Issue>)> {
    let Json(new_issue) = payload.map_err(invalid_body)?;

    let mut storage = state.storage().write().await;
    let issue = storage.create(new_issue).await?;
    persist(&mut **storage).await?;

    tracing::debug!(id = %issue.id, "created issue");
    Ok((StatusCode::CREATED, Json(issue)))
}

pub(crate) async fn update_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<IssueUpdate>, JsonRejection>,
) -> Result<Json<Issue>> {
    let Json(update) = payload.map_err(invalid_body)?;

    let mut storage = state.storage().write().await;
    let issue = storage.update(&IssueId::new(id), update).await?;
    persist(&mut **storage).await?;

    tracing::debug!(id = %issue.id, "updated issue");
    Ok(Json(issue))
}

fn invalid_body(rejection: JsonRejection) -> Error {
    Error::InvalidBody(rejection.body_text())
}

/// Save after a mutation. If the save fails, reload so memory matches
/// disk again; the caller reports the save error.
async fn persist(storage: &mut dyn IssueStorage) -> Result<()> {
    if let Err(save_err) = storage.save().await {
        if let Err(reload_err) = storage.reload().await {
            tracing::error!(error = %reload_err, "reload after failed save also failed");
        }
        return Err(save_err.into());
    }
    Ok(())
}
