// Shared test helpers
#![allow(dead_code)]

use crn_tracker::config::AppConfig;
use crn_tracker::history_client::{FetchError, HistoryRequest, HistorySource};
use crn_tracker::models::{HistoryResponse, Snapshot};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_CONFIG: &str = r#"
[server]
port = 8080
host = "127.0.0.1"

[upstream]
base_url = "http://127.0.0.1:9"
default_identifier = "1"
"#;

pub fn test_config() -> AppConfig {
    AppConfig::load_from_str(TEST_CONFIG).unwrap()
}

/// The two-snapshot history used throughout: scale max 10, latest bars 0.8 / 0.7 / 0.2.
pub fn two_snapshot_history() -> Vec<Snapshot> {
    vec![
        Snapshot::new(1_700_000_000, 10, 5, 0),
        Snapshot::new(1_700_003_600, 8, 7, 2),
    ]
}

pub fn loaded(history: Vec<Snapshot>) -> HistoryResponse {
    HistoryResponse {
        history,
        warning: None,
    }
}

pub fn no_results() -> HistoryResponse {
    HistoryResponse {
        history: vec![],
        warning: Some("no_results".into()),
    }
}

/// Canned upstream keyed by CRN. Unknown CRNs answer 500; every call is counted.
#[derive(Default)]
pub struct StubSource {
    responses: Mutex<HashMap<String, HistoryResponse>>,
    calls: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn with(self, identifier: &str, response: HistoryResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(identifier.to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl HistorySource for StubSource {
    fn fetch<'a>(
        &'a self,
        request: &'a HistoryRequest,
    ) -> BoxFuture<'a, Result<HistoryResponse, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(request.path_and_query());
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&request.tag.identifier)
            .cloned();
        Box::pin(async move { response.ok_or(FetchError::Status { status: 500 }) })
    }
}
