//! Config subcommands handler

use std::path::Path;

use anyhow::{bail, Result};
use scrubline::theme::Theme;
use scrubline::Config;

use super::{config_path, load_config};

/// Show current configuration as TOML.
pub fn handle_show(override_path: Option<&Path>) -> Result<()> {
    let config = load_config(override_path)?;
    let theme = Theme::from_name(config.tui.theme);
    println!("{}", theme.primary_text(config.to_toml()?.trim_end()));
    Ok(())
}

/// Print the config file location.
pub fn handle_path(override_path: Option<&Path>) -> Result<()> {
    println!("{}", config_path(override_path)?.display());
    Ok(())
}

/// Write a default config file.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn handle_init(override_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(override_path)?;
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    let config = Config::default();
    config.save_to(&path)?;

    let theme = Theme::from_name(config.tui.theme);
    println!(
        "{}",
        theme.primary_text(&format!("Wrote default config to {}", path.display()))
    );
    Ok(())
}
