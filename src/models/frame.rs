// Frames pushed to the browser and messages received from it

use serde::{Deserialize, Serialize};

use super::Bar;

/// Message shown in place of the chart when the CRN has no history.
pub const NO_RESULTS_MESSAGE: &str = "Please enter a valid CRN!";

/// Everything the page needs to paint the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewFrame {
    /// Fetch in flight, or failed; the two are deliberately indistinguishable.
    Loading { identifier: String, optimized: bool },
    NoResults {
        identifier: String,
        optimized: bool,
        message: &'static str,
    },
    Ready {
        identifier: String,
        optimized: bool,
        bars: [Bar; 3],
        slider: Slider,
        as_of: Option<String>,
    },
}

impl ViewFrame {
    pub fn identifier(&self) -> &str {
        match self {
            ViewFrame::Loading { identifier, .. }
            | ViewFrame::NoResults { identifier, .. }
            | ViewFrame::Ready { identifier, .. } => identifier,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewFrame::Ready { .. })
    }
}

/// Range input bounds; `max` is the last history index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slider {
    pub min: usize,
    pub max: usize,
    pub value: usize,
}

/// Messages the page sends over the chart WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Slider moved.
    Select { index: usize },
    /// "Use optimized?" checkbox toggled.
    Optimized { enabled: bool },
}
