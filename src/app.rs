use anyhow::Result;
use std::io::Write;

use crate::cli::Args;
use crate::config::{config_error_message, load_credentials, resolve_config_path};
use crate::display::render;
use crate::notify::Notifier;
use crate::portal::PortalClient;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// One refresh: load credentials, query the portal, write a single line to
/// `out`. Returns the process exit code; `Err` is reserved for failures to
/// write the output itself.
pub fn run(args: &Args, out: &mut dyn Write, notifier: &dyn Notifier) -> Result<u8> {
    let path = resolve_config_path(args.config.as_deref());
    let credentials = match load_credentials(&path) {
        Ok(c) => c,
        Err(e) => {
            writeln!(out, "{}", config_error_message(&e))?;
            return Ok(EXIT_FAILURE);
        }
    };

    let mut client = match args.portal_url.as_deref() {
        Some(url) => PortalClient::with_base_url(url),
        None => PortalClient::new(),
    };
    let response = match client.authenticate_and_fetch(&credentials) {
        Ok(r) => r,
        Err(e) => {
            writeln!(out, "WE: Error ({e})")?;
            return Ok(EXIT_FAILURE);
        }
    };

    match render(&response, args.output_mode(), notifier) {
        Ok(line) => {
            writeln!(out, "{line}")?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            writeln!(out, "WE: Error ({e})")?;
            Ok(EXIT_FAILURE)
        }
    }
}
