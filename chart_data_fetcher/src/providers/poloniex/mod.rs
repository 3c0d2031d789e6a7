//! Poloniex public API, `returnChartData` command.

pub mod params;
pub mod provider;
pub mod response;

pub use params::build_request_url;
pub use provider::{DEFAULT_BASE_URL, PoloniexProvider};
pub use response::parse_response;
