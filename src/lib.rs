pub mod api_connection;
pub mod cli;
pub mod config;
pub mod menu_options;
pub mod menu_request;
pub mod menu_response;
pub mod menu_suggester;
pub mod prompt_formatter;
pub mod suggestion_parser;
pub mod validation;

pub use menu_request::{normalize_and_validate, MenuRequest};
pub use menu_response::{MenuItem, MenuResponse};
pub use validation::ValidationReport;
