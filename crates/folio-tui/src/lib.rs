//! Full-screen portfolio page.

pub mod effects;
pub mod events;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::typewriter::RoleList;
pub use runtime::TuiRuntime;

/// Opens the page and blocks until the user quits.
///
/// `endpoint` overrides the configured contact endpoint.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the terminal cannot be set
/// up, or the role list is empty.
pub fn run_portfolio(config: Config, endpoint: Option<&str>) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The portfolio page requires a terminal.\n\
             Use `folio type` to print the typewriter to a pipe."
        );
    }

    // Reject an empty role list before taking over the screen.
    RoleList::new(config.roles.iter().cloned()).context("Invalid config")?;

    tracing::info!(roles = config.roles.len(), "Opening portfolio page");
    let mut runtime = TuiRuntime::new(config, endpoint)?;
    runtime.run()
}
