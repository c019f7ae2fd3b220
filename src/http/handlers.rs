//! JSON handlers for the management API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::pagination::{self, DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::sites::store::extract_upstream;
use crate::sites::types::{OperationOutcome, SiteError};
use crate::sites::SiteName;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct SiteListResponse {
    pub sites: Vec<SiteSummary>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSiteRequest {
    pub server_address: String,
    pub server_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSiteRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SiteDetail {
    pub name: String,
    pub content: String,
    pub enabled: bool,
    /// First upstream server address found in the content; display only.
    pub upstream: Option<String>,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub lines: Vec<String>,
}

type HandlerError = (StatusCode, String);

fn internal(e: impl std::fmt::Display) -> HandlerError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn site_error(e: SiteError) -> HandlerError {
    match e {
        SiteError::InvalidName(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        SiteError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        SiteError::AlreadyExists(_) => (StatusCode::CONFLICT, e.to_string()),
        SiteError::Io(_) => internal(e),
    }
}

/// GET /sites — alphabetical listing with search and pagination.
pub async fn list_sites(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<SiteListResponse>, HandlerError> {
    let inner = state.inner.load_full();

    let names = inner.coordinator.store().list().map_err(internal)?;
    metrics::record_site_count(names.len());

    let search = params.search.unwrap_or_default();
    let filtered = pagination::filter_names(&names, &search);
    let total = filtered.len();

    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let sites = pagination::paginate(&filtered, page, per_page)
        .into_iter()
        .map(|name| {
            let enabled = SiteName::parse(name)
                .map(|n| inner.coordinator.symlinks().is_enabled(&n))
                .unwrap_or(false);
            SiteSummary {
                name: name.clone(),
                enabled,
            }
        })
        .collect();

    Ok(Json(SiteListResponse {
        sites,
        page,
        per_page,
        total,
        search,
    }))
}

/// POST /sites — create and enable a new site configuration.
pub async fn create_site(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteRequest>,
) -> Json<OperationOutcome> {
    let inner = state.inner.load_full();
    Json(
        inner
            .coordinator
            .create(&request.server_address, &request.server_name)
            .await,
    )
}

/// GET /sites/{name} — content plus display-time derivations.
pub async fn get_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SiteDetail>, HandlerError> {
    let inner = state.inner.load_full();

    let name = SiteName::parse(&name).map_err(site_error)?;
    let content = inner.coordinator.store().read(&name).map_err(site_error)?;

    let upstream = extract_upstream(&content);
    let rows = content.matches('\n').count() + 1;
    let enabled = inner.coordinator.symlinks().is_enabled(&name);

    Ok(Json(SiteDetail {
        name: name.to_string(),
        content,
        enabled,
        upstream,
        rows,
    }))
}

/// PUT /sites/{name} — overwrite the configuration content.
pub async fn update_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateSiteRequest>,
) -> Json<OperationOutcome> {
    let inner = state.inner.load_full();
    Json(inner.coordinator.edit(&name, &request.content).await)
}

/// DELETE /sites/{name} — disable and remove the configuration.
pub async fn delete_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<OperationOutcome> {
    let inner = state.inner.load_full();
    Json(inner.coordinator.delete(&name).await)
}

/// GET /status — stub_status lines, passed through unmodified.
pub async fn nginx_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, HandlerError> {
    let inner = state.inner.load_full();

    match inner.status.fetch().await {
        Ok(lines) => Ok(Json(StatusResponse { lines })),
        Err(reason) => Err((StatusCode::BAD_GATEWAY, reason)),
    }
}

/// GET /logs/{name} — raw access log for one site.
pub async fn site_logs(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, HandlerError> {
    let inner = state.inner.load_full();

    let name = SiteName::parse(&name).map_err(site_error)?;
    inner.logs.read(&name).map_err(site_error)
}
