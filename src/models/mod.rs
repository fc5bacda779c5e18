// Domain models: upstream history, derived chart state, browser frames

mod chart;
mod frame;
mod history;

pub use chart::{Bar, ChartState, scale_max};
pub use frame::{ClientMessage, NO_RESULTS_MESSAGE, Slider, ViewFrame};
pub use history::{HistoryResponse, Metric, NO_RESULTS_WARNING, Snapshot};
