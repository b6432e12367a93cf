use anyhow::{bail, Context as _, Result};
use polaris_core::Config;
use tracing::warn;

use super::Context;
use crate::args::{ConfigCommand, ConfigSetArgs};

pub fn run(ctx: &Context, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set(args) => set(ctx, args),
        ConfigCommand::Show => show(ctx),
    }
}

fn set(ctx: &Context, args: ConfigSetArgs) -> Result<()> {
    let current = match Config::load_from(&ctx.config_dir) {
        Ok(config) => config,
        // Start blank so a lost host must be given again with --host.
        Err(e) => {
            warn!("Ignoring unreadable config: {}", e);
            Config {
                host: String::new(),
                ..Config::default()
            }
        }
    };
    let config = apply(current, args)?;
    config
        .save_to(&ctx.config_dir)
        .context("failed to save config")?;

    println!("✓ Configuration saved!");
    println!("  Host: {}", config.host);
    if let Some(realm) = config.realm() {
        println!("  Realm: {}", realm);
    }
    if let Some(prefix) = config.catalog_prefix() {
        println!("  Catalog Prefix: {}", prefix);
    }
    Ok(())
}

/// Overlay the given flags; an explicit empty realm or prefix clears it.
fn apply(mut config: Config, args: ConfigSetArgs) -> Result<Config> {
    if let Some(host) = args.host.filter(|h| !h.is_empty()) {
        config.host = host;
    }
    if let Some(realm) = args.realm {
        config.realm = Some(realm).filter(|r| !r.is_empty());
    }
    if let Some(prefix) = args.catalog_prefix {
        config.catalog_prefix = Some(prefix).filter(|p| !p.is_empty());
    }
    if config.host.trim().is_empty() {
        bail!("host is required. Use --host to set the Polaris server URL");
    }
    Ok(config)
}

fn show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    println!("Current Configuration:");
    println!("  Host: {}", config.host);
    println!("  Realm: {}", config.realm().unwrap_or("(not set)"));
    println!(
        "  Catalog Prefix: {}",
        config.catalog_prefix().unwrap_or("(not set)")
    );
    Ok(())
}
