//! ROI calculation engine and CLI wizard for Flownetics FaaS programs.
//! The engine lives in the library so the CLI and any future surface
//! share one formula.

pub mod app;
pub mod config;
pub mod currency;
pub mod roi;
pub mod ui_cli;
