// Seat history wire models (upstream /v1/seats/history)

use serde::{Deserialize, Serialize};

/// Warning value the upstream sends when a CRN has no recorded history.
pub const NO_RESULTS_WARNING: &str = "no_results";

/// One timestamped observation of a course's seat counts.
///
/// Every field is optional at the decode boundary: a snapshot missing a metric
/// still decodes and renders that bar blank instead of failing the whole view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub seats_available: Option<u32>,
    #[serde(default)]
    pub seats_reserved: Option<u32>,
    #[serde(default)]
    pub waitlist: Option<u32>,
}

impl Snapshot {
    pub fn new(timestamp: i64, seats_available: u32, seats_reserved: u32, waitlist: u32) -> Self {
        Self {
            timestamp: Some(timestamp),
            seats_available: Some(seats_available),
            seats_reserved: Some(seats_reserved),
            waitlist: Some(waitlist),
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<u32> {
        match metric {
            Metric::SeatsAvailable => self.seats_available,
            Metric::SeatsReserved => self.seats_reserved,
            Metric::Waitlist => self.waitlist,
        }
    }

    /// Largest metric present on this snapshot.
    pub fn peak(&self) -> Option<u32> {
        Metric::ALL.iter().filter_map(|m| self.metric(*m)).max()
    }
}

/// Body of GET /v1/seats/history/{crn}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<Snapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl HistoryResponse {
    pub fn is_no_results(&self) -> bool {
        self.warning.as_deref() == Some(NO_RESULTS_WARNING)
    }
}

/// The three charted seat counts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    SeatsAvailable,
    SeatsReserved,
    Waitlist,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::SeatsAvailable, Metric::SeatsReserved, Metric::Waitlist];

    /// Legend text.
    pub fn label(self) -> &'static str {
        match self {
            Metric::SeatsAvailable => "Seats Available",
            Metric::SeatsReserved => "Seats Reserved",
            Metric::Waitlist => "Waitlisted",
        }
    }

    /// CSS class shared by the bar and its legend box.
    pub fn css_class(self) -> &'static str {
        match self {
            Metric::SeatsAvailable => "seats-available",
            Metric::SeatsReserved => "seats-reserved",
            Metric::Waitlist => "waitlist",
        }
    }
}
