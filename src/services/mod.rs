//! Application service layer.
//!
//! Services validate requests and orchestrate the aggregator, history and
//! preferences. They provide a clean boundary between the MCP handlers and
//! the search core.

mod launcher_service;

pub use launcher_service::{
    LauncherService, LauncherServiceImpl, ResultEntry, SearchResponse, TagToggleResponse,
};
