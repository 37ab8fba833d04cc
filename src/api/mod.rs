use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    TravelWeatherError,
    dataset::Dataset,
    destinations::DestinationService,
    models::{DestinationId, Month, SavedDestination},
    search::{MonthMatchPolicy, QueryResult, RegionReport, SearchEngine},
    session::FixedIdentity,
};

pub const USER_HEADER: &str = "x-user-id";

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub policy: MonthMatchPolicy,
    pub destinations: DestinationService,
}

impl AppState {
    fn engine(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.dataset, self.policy)
    }
}

/// Error body returned to clients: `{ "error": "..." }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<TravelWeatherError> for ApiError {
    fn from(err: TravelWeatherError) -> Self {
        let status = match &err {
            TravelWeatherError::Validation { .. } | TravelWeatherError::EmptyQuery => {
                StatusCode::BAD_REQUEST
            }
            TravelWeatherError::Unauthenticated => StatusCode::UNAUTHORIZED,
            TravelWeatherError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!("Request failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn identity(headers: &HeaderMap) -> FixedIdentity {
    FixedIdentity::from_header(headers.get(USER_HEADER).and_then(|v| v.to_str().ok()))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub policy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDestinationRequest {
    pub region: String,
    pub month: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitedRequest {
    pub visited: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/months", get(months))
        .route("/regions", get(regions))
        .route("/regions/{name}", get(region))
        .route("/destinations", get(list_destinations).post(save_destination))
        .route(
            "/destinations/{id}",
            patch(update_destination).delete(delete_destination),
        )
        .route("/destinations/{id}/toggle-visited", post(toggle_visited))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<QueryResult> {
    let Query(params) = params?;
    let mut engine = state.engine();
    if let Some(policy) = params.policy.as_deref() {
        engine = engine.with_policy(policy.parse()?);
    }

    let result = engine.search(params.q.as_deref().unwrap_or_default())?;
    Ok(Json(result))
}

async fn months() -> Json<Vec<Month>> {
    Json(Month::ALL.to_vec())
}

async fn regions(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset.region_names().map(str::to_string).collect())
}

async fn region(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RegionReport>, ApiError> {
    match state.engine().search_region(&name) {
        QueryResult::Region(report) => Ok(Json(report)),
        _ => Err(ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("No data found for \"{}\"", name.trim()),
        }),
    }
}

async fn list_destinations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<SavedDestination>> {
    let destinations = state.destinations.list(&identity(&headers)).await?;
    Ok(Json(destinations))
}

async fn save_destination(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<SaveDestinationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedDestination>), ApiError> {
    let Json(request) = request?;
    let month: Month = request.month.parse()?;
    let saved = state
        .destinations
        .save(&identity(&headers), &request.region, month)
        .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_destination(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<DestinationId>, PathRejection>,
    request: Result<Json<VisitedRequest>, JsonRejection>,
) -> ApiResult<SavedDestination> {
    let Path(id) = id?;
    let Json(request) = request?;
    let updated = state
        .destinations
        .set_visited(&identity(&headers), id, request.visited)
        .await?;
    Ok(Json(updated))
}

async fn toggle_visited(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<DestinationId>, PathRejection>,
) -> ApiResult<SavedDestination> {
    let Path(id) = id?;
    let updated = state
        .destinations
        .toggle_visited(&identity(&headers), id)
        .await?;
    Ok(Json(updated))
}

async fn delete_destination(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<DestinationId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.destinations.delete(&identity(&headers), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
