// Derived chart state: shared scale, selected snapshot, bar heights

use serde::Serialize;

use super::{Metric, Snapshot};

/// Shared denominator for all three bars: the largest metric anywhere in the history.
/// Zero when the history is empty or carries no metrics at all.
pub fn scale_max(history: &[Snapshot]) -> u32 {
    history.iter().filter_map(Snapshot::peak).max().unwrap_or(0)
}

/// Chart view of one loaded history at one slider position.
#[derive(Debug, Clone, Copy)]
pub struct ChartState<'a> {
    history: &'a [Snapshot],
    scale_max: u32,
    selected_index: usize,
}

impl<'a> ChartState<'a> {
    /// Returns `None` for an empty history. The index is clamped to the last snapshot.
    pub fn new(history: &'a [Snapshot], scale_max: u32, selected_index: usize) -> Option<Self> {
        let last = history.len().checked_sub(1)?;
        Some(Self {
            history,
            scale_max,
            selected_index: selected_index.min(last),
        })
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scale_max(&self) -> u32 {
        self.scale_max
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.history.len() - 1
    }

    pub fn displayed(&self) -> &'a Snapshot {
        &self.history[self.selected_index]
    }

    pub fn bar(&self, metric: Metric) -> Bar {
        Bar::new(metric, self.displayed().metric(metric), self.scale_max)
    }

    pub fn bars(&self) -> [Bar; 3] {
        Metric::ALL.map(|m| self.bar(m))
    }
}

/// One rendered bar. A missing value renders with no height and a blank label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub metric: Metric,
    pub label: &'static str,
    pub css_class: &'static str,
    pub value: Option<u32>,
    /// value / scale_max in [0, 1].
    pub fraction: f64,
    pub height_percent: f64,
}

impl Bar {
    pub fn new(metric: Metric, value: Option<u32>, scale_max: u32) -> Self {
        let fraction = match value {
            Some(v) if scale_max > 0 => (f64::from(v) / f64::from(scale_max)).min(1.0),
            _ => 0.0,
        };
        Self {
            metric,
            label: metric.label(),
            css_class: metric.css_class(),
            value,
            fraction,
            height_percent: fraction * 100.0,
        }
    }

    /// Text drawn inside the bar.
    pub fn value_label(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_default()
    }
}
