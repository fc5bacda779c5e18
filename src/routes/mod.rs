// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::chart_view::ChartView;
use crate::config::AppConfig;
use crate::format::TimestampFormat;
use crate::history_client::HistorySource;
use crate::route::Route;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) history: Arc<dyn HistorySource>,
    pub(crate) timestamps: TimestampFormat,
    pub(crate) config: AppConfig,
}

impl AppState {
    pub(crate) fn route(&self, path: &str) -> Route {
        Route::from_path(path, &self.config.upstream.default_identifier)
    }

    pub(crate) fn chart_view(&self, route: Route, query: &ChartQuery) -> ChartView {
        let optimized = query.optimized(self.config.display.optimized_default);
        ChartView::new(route, optimized, self.timestamps)
    }
}

/// Query shared by the page, the chart API and the chart WebSocket.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChartQuery {
    optimized: Option<String>,
    index: Option<usize>,
}

impl ChartQuery {
    /// Accepts `1`/`0` as the upstream does, and `true`/`false`.
    pub(crate) fn optimized(&self, default: bool) -> bool {
        match self.optimized.as_deref() {
            Some("1" | "true") => true,
            Some("0" | "false") => false,
            _ => default,
        }
    }
}

pub fn app(history: Arc<dyn HistorySource>, config: AppConfig) -> Router {
    let state = AppState {
        history,
        timestamps: TimestampFormat::from(&config.display),
        config,
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/submit", get(http::submit_handler)) // GET /submit?crn=&from=
        .route("/api/chart", get(http::default_chart_handler)) // GET /api/chart
        .route("/api/chart/{identifier}", get(http::chart_handler)) // GET /api/chart/{crn}
        .route("/ws/chart", get(ws::ws_default_chart)) // WS /ws/chart
        .route("/ws/chart/{identifier}", get(ws::ws_chart)) // WS /ws/chart/{crn}
        .route("/{identifier}", get(http::page_handler)) // GET /{crn}
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
