// GET handlers: page, submission redirect, one-shot chart JSON, version

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AppState, ChartQuery};
use crate::chart_view::Applied;
use crate::models::ViewFrame;
use crate::page;
use crate::route::{Route, sanitize_return_path, submission_path};
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET / — chart page for the default CRN.
pub(super) async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    render_page(&state, state.route(""), &query)
}

/// GET /{crn} — chart page for a CRN taken verbatim from the path.
pub(super) async fn page_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    render_page(&state, state.route(&format!("/{identifier}")), &query)
}

fn render_page(state: &AppState, route: Route, query: &ChartQuery) -> Html<String> {
    let optimized = query.optimized(state.config.display.optimized_default);
    Html(page::render(&route, optimized))
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmitQuery {
    crn: Option<String>,
    from: Option<String>,
}

/// GET /submit — CRN form target. Navigates to /{crn}; blank input goes back where it came from.
pub(super) async fn submit_handler(Query(query): Query<SubmitQuery>) -> Redirect {
    match query.crn.as_deref().and_then(submission_path) {
        Some(path) => {
            tracing::debug!(path = %path, "CRN submitted");
            Redirect::to(&path)
        }
        None => Redirect::to(sanitize_return_path(query.from.as_deref())),
    }
}

/// GET /api/chart — chart frame for the default CRN.
pub(super) async fn default_chart_handler(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    chart_frame(&state, state.route(""), &query).await
}

/// GET /api/chart/{crn} — fetches the history once and returns the derived frame.
pub(super) async fn chart_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    chart_frame(&state, state.route(&format!("/{identifier}")), &query).await
}

async fn chart_frame(
    state: &AppState,
    route: Route,
    query: &ChartQuery,
) -> (StatusCode, Json<ViewFrame>) {
    let mut view = state.chart_view(route, query);
    let request = view.request();
    let result = state.history.fetch(&request).await;
    let status = match view.apply(&request.tag, result) {
        Applied::Failed | Applied::Stale => StatusCode::BAD_GATEWAY,
        Applied::Loaded | Applied::NoResults => StatusCode::OK,
    };
    if let Some(index) = query.index {
        view.select(index);
    }
    (status, Json(view.frame()))
}
