// Chart view state machine: one CRN, one history, one slider position.
//
// The view never performs I/O. It hands out tagged `HistoryRequest`s and is fed the
// completions; completions whose tag no longer matches are dropped, so a slow
// response for an earlier URL can't overwrite a newer one.

use crate::format::TimestampFormat;
use crate::history_client::{FetchError, FetchOutcome, HistoryRequest, RequestTag};
use crate::models::{
    ChartState, HistoryResponse, NO_RESULTS_MESSAGE, Slider, Snapshot, ViewFrame, scale_max,
};
use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewStatus {
    /// Nothing loaded yet. Also where a failed fetch leaves the view.
    Loading,
    NoResults,
    Ready {
        history: Vec<Snapshot>,
        scale_max: u32,
        selected_index: usize,
    },
}

/// What `ChartView::apply` did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Tag no longer current; the view is unchanged.
    Stale,
    Loaded,
    NoResults,
    /// Transport or decode error; logged, the view is unchanged.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChartView {
    route: Route,
    optimized: bool,
    status: ViewStatus,
    timestamps: TimestampFormat,
}

impl ChartView {
    pub fn new(route: Route, optimized: bool, timestamps: TimestampFormat) -> Self {
        Self {
            route,
            optimized,
            status: ViewStatus::Loading,
            timestamps,
        }
    }

    pub fn identifier(&self) -> &str {
        self.route.identifier()
    }

    pub fn optimized(&self) -> bool {
        self.optimized
    }

    /// Tag of the fetch the view wants. Bare routes never send the flag, so the
    /// toggle is not part of their tag.
    pub fn tag(&self) -> RequestTag {
        RequestTag {
            identifier: self.route.identifier().to_string(),
            optimized: self.optimized && self.route.is_explicit(),
        }
    }

    /// The fetch the view currently wants.
    pub fn request(&self) -> HistoryRequest {
        HistoryRequest {
            tag: self.tag(),
            send_optimized_flag: self.route.is_explicit(),
        }
    }

    /// Switches to another CRN. Returns the fetch to issue, or `None` if nothing changed.
    ///
    /// The served page navigates with a full reload through `/submit`, which builds a
    /// fresh view; this is for callers that keep one view across CRNs.
    pub fn navigate(&mut self, route: Route) -> Option<HistoryRequest> {
        if route == self.route {
            return None;
        }
        self.route = route;
        self.status = ViewStatus::Loading;
        Some(self.request())
    }

    /// Toggles the upstream `optimized` flag. The current chart stays up until the
    /// new history lands. Returns the fetch to issue, or `None` if the flag is unchanged
    /// or the route is bare (its request carries no flag, so nothing would differ).
    pub fn set_optimized(&mut self, enabled: bool) -> Option<HistoryRequest> {
        if enabled == self.optimized {
            return None;
        }
        self.optimized = enabled;
        if !self.route.is_explicit() {
            return None;
        }
        Some(self.request())
    }

    /// Feeds a fetch completion issued for `tag`.
    pub fn apply(
        &mut self,
        tag: &RequestTag,
        result: Result<HistoryResponse, FetchError>,
    ) -> Applied {
        if *tag != self.tag() {
            tracing::debug!(
                identifier = %tag.identifier,
                optimized = tag.optimized,
                "Dropping stale history response"
            );
            return Applied::Stale;
        }
        match result.map(FetchOutcome::from_response) {
            Ok(FetchOutcome::Loaded(history)) => {
                self.status = ViewStatus::Ready {
                    scale_max: scale_max(&history),
                    selected_index: history.len() - 1,
                    history,
                };
                Applied::Loaded
            }
            Ok(FetchOutcome::NoResults) => {
                self.status = ViewStatus::NoResults;
                Applied::NoResults
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    identifier = %tag.identifier,
                    operation = "fetch_history",
                    "Error fetching data"
                );
                Applied::Failed
            }
        }
    }

    /// Moves the slider. Clamped to the loaded history; a no-op before anything loads.
    /// Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        let ViewStatus::Ready {
            history,
            selected_index,
            ..
        } = &mut self.status
        else {
            return false;
        };
        let index = index.min(history.len() - 1);
        if index == *selected_index {
            return false;
        }
        *selected_index = index;
        true
    }

    pub fn is_no_results(&self) -> bool {
        self.status == ViewStatus::NoResults
    }

    pub fn chart_state(&self) -> Option<ChartState<'_>> {
        match &self.status {
            ViewStatus::Ready {
                history,
                scale_max,
                selected_index,
            } => ChartState::new(history, *scale_max, *selected_index),
            _ => None,
        }
    }

    pub fn frame(&self) -> ViewFrame {
        let identifier = self.route.identifier().to_string();
        let optimized = self.optimized;
        if self.is_no_results() {
            return ViewFrame::NoResults {
                identifier,
                optimized,
                message: NO_RESULTS_MESSAGE,
            };
        }
        match self.chart_state() {
            Some(state) => ViewFrame::Ready {
                identifier,
                optimized,
                bars: state.bars(),
                slider: Slider {
                    min: 0,
                    max: state.last_index(),
                    value: state.selected_index(),
                },
                as_of: self.timestamps.format(state.displayed().timestamp),
            },
            None => ViewFrame::Loading {
                identifier,
                optimized,
            },
        }
    }
}
