// Library for tests to access modules

pub mod chart_view;
pub mod config;
pub mod format;
pub mod history_client;
pub mod models;
pub mod page;
pub mod route;
pub mod routes;
pub mod version;
