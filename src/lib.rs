pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod logging;
pub mod reporting;
pub mod types;
