mod config;
mod dashboard;
mod errors;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use errors::DashboardError;
