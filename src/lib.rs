//! # WE Statusline
//!
//! Fetches the broadband quota of a WE (Telecom Egypt) subscriber from the
//! my.te.eg self-care portal and prints one line for a desktop status bar
//! such as polybar.
//!
//! ## Overview
//!
//! Each invocation runs a single refresh:
//! - read `{"username", "password"}` from the credentials file
//! - prime portal cookies, log in, then query the free-unit balance
//! - render a decorated (colored markup), simple, or JSON line
//! - raise a desktop alert when less than 10GB remain

/// Refresh pipeline tying the components together
pub mod app;

/// Command-line argument parsing
pub mod cli;

/// Credentials file resolution and loading
pub mod config;

/// Status line formatting and quota thresholds
pub mod display;

/// Error types for config, portal and rendering failures
pub mod error;

/// Credentials, auth tokens and quota records
pub mod models;

/// Desktop notifications
pub mod notify;

/// HTTP session and portal requests
pub mod portal;

/// Logging setup and path helpers
pub mod utils;
