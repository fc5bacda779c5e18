// Chart WebSocket: one ChartView per connection, fed by tagged background fetches

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

use super::{AppState, ChartQuery};
use crate::chart_view::{Applied, ChartView};
use crate::history_client::{FetchError, HistoryRequest, HistorySource, RequestTag};
use crate::models::{ClientMessage, HistoryResponse, ViewFrame};
use crate::route::Route;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Completed fetches waiting to be applied; one per optimized toggle at most.
const FETCH_CHANNEL_CAPACITY: usize = 8;

type Completion = (RequestTag, Result<HistoryResponse, FetchError>);

/// WS /ws/chart — session for the default CRN.
pub(super) async fn ws_default_chart(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    upgrade(ws, &state, state.route(""), &query)
}

/// WS /ws/chart/{crn}
pub(super) async fn ws_chart(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    upgrade(ws, &state, state.route(&format!("/{identifier}")), &query)
}

fn upgrade(
    ws: WebSocketUpgrade,
    state: &AppState,
    route: Route,
    query: &ChartQuery,
) -> Response {
    let view = state.chart_view(route, query);
    let history = state.history.clone();
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = chart_session(socket, view, history).await {
            tracing::info!("Chart stream error: {}", e);
        }
    })
}

fn spawn_fetch(
    history: &Arc<dyn HistorySource>,
    request: HistoryRequest,
    done_tx: mpsc::Sender<Completion>,
) {
    let history = history.clone();
    tokio::spawn(async move {
        let result = history.fetch(&request).await;
        // Receiver gone means the client left; nothing to apply.
        let _ = done_tx.send((request.tag, result)).await;
    });
}

/// Sends one frame; false when the client is gone or too slow.
async fn send_frame(socket: &mut WebSocket, frame: &ViewFrame) -> anyhow::Result<bool> {
    let json = serde_json::to_string(frame)?;
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    Ok(matches!(r, Ok(Ok(()))))
}

async fn chart_session(
    mut socket: WebSocket,
    mut view: ChartView,
    history: Arc<dyn HistorySource>,
) -> anyhow::Result<()> {
    tracing::info!(
        identifier = %view.identifier(),
        optimized = view.optimized(),
        "Client connected to chart stream"
    );
    let (done_tx, mut done_rx) = mpsc::channel::<Completion>(FETCH_CHANNEL_CAPACITY);
    spawn_fetch(&history, view.request(), done_tx.clone());
    if !send_frame(&mut socket, &view.frame()).await? {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval_at(
        tokio::time::Instant::now() + WS_PING_INTERVAL,
        WS_PING_INTERVAL,
    );
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            Some((tag, result)) = done_rx.recv() => {
                match view.apply(&tag, result) {
                    Applied::Loaded | Applied::NoResults => {
                        if !send_frame(&mut socket, &view.frame()).await? {
                            break;
                        }
                    }
                    // Failed fetches leave the page on "Loading data..." with no retry.
                    Applied::Failed | Applied::Stale => {}
                }
            }
            msg = socket.recv() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "Chart stream receive failed");
                        break;
                    }
                };
                let changed = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(ClientMessage::Select { index }) => view.select(index),
                    Ok(ClientMessage::Optimized { enabled }) => {
                        let was = view.optimized();
                        match view.set_optimized(enabled) {
                            Some(request) => {
                                spawn_fetch(&history, request, done_tx.clone());
                                true
                            }
                            // Bare route: the checkbox flips but nothing is refetched.
                            None => view.optimized() != was,
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Ignoring malformed chart message");
                        false
                    }
                };
                if changed && !send_frame(&mut socket, &view.frame()).await? {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!(identifier = %view.identifier(), "Chart stream closed");
    Ok(())
}
