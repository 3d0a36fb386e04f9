//! Residential photovoltaic sizing calculator.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod report;
/// Energy balance, sweeps, and core types.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;
pub mod weather;
