//! Default command: the full-screen page.

use anyhow::Result;
use folio_core::config::Config;

#[cfg(feature = "tui")]
pub fn run(config: Config, endpoint: Option<&str>) -> Result<()> {
    folio_tui::run_portfolio(config, endpoint)?;
    println!("Thanks for stopping by!");
    Ok(())
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: Config, _endpoint: Option<&str>) -> Result<()> {
    anyhow::bail!("folio was built without the `tui` feature; use `folio type` instead")
}
