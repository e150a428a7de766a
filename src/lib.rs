pub mod cli;
pub mod config;
pub mod consolidate;
pub mod extract;
pub mod fetch;
pub mod label;
pub mod pipeline;

pub use consolidate::ConsolidatedReport;
pub use extract::DomainRecord;
