//! Command handlers.
//!
//! Each handler receives the per-invocation [`Context`] plus its own parsed
//! arguments, performs one request (two for read-modify-write updates) and
//! prints the result to stdout.

mod auth;
mod catalog_roles;
mod catalogs;
mod config;
mod namespaces;
mod principals;
mod tables;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use polaris_core::api::{ApiClient, CatalogClient, ManagementClient};
use polaris_core::auth::Credentials;
use polaris_core::config::config_dir;
use polaris_core::Config;

use crate::args::{CatalogCommand, Cli, Command};

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config_dir: PathBuf,
}

impl Context {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: config_dir()?,
        })
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_dir).context("failed to load config")
    }

    pub fn load_credentials(&self) -> polaris_core::Result<Credentials> {
        Credentials::load_from(&self.config_dir)
    }

    fn api_client(&self) -> Result<(ApiClient, Config)> {
        let config = self.load_config()?;
        let credentials = self.load_credentials()?;
        let api = ApiClient::new(&config, credentials.access_token()?)?;
        Ok((api, config))
    }

    pub fn management_client(&self) -> Result<ManagementClient> {
        let (api, _) = self.api_client()?;
        Ok(ManagementClient::new(api))
    }

    /// Catalog API client for the `--prefix` flag, or the configured default.
    pub fn catalog_client(&self, prefix: Option<&str>) -> Result<CatalogClient> {
        let (api, config) = self.api_client()?;
        let prefix = resolve_catalog_prefix(prefix, &config)?;
        Ok(CatalogClient::new(api, prefix))
    }
}

fn resolve_catalog_prefix(flag: Option<&str>, config: &Config) -> polaris_core::Result<String> {
    flag.filter(|p| !p.is_empty())
        .or_else(|| config.catalog_prefix())
        .map(str::to_string)
        .ok_or_else(|| {
            polaris_core::Error::validation(
                "catalog prefix is required. Use --prefix or set --catalog-prefix in config",
            )
        })
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, ctx: &Context) -> Result<()> {
    match cli.command {
        Command::Auth { command } => auth::run(ctx, command).await,
        Command::Config { command } => config::run(ctx, command),
        Command::Catalogs { command } => catalogs::run(ctx, command).await,
        Command::Catalog(args) => {
            let prefix = args.prefix.as_deref();
            match args.command {
                CatalogCommand::Namespaces { command } => namespaces::run(ctx, prefix, command).await,
                CatalogCommand::Tables { command } => tables::run(ctx, prefix, command).await,
                CatalogCommand::Roles { command } => catalog_roles::run(ctx, command).await,
            }
        }
        Command::Principals { command } => principals::run(ctx, command).await,
    }
}

/// Print `key=value` lines under a heading, skipping empty maps.
fn print_properties(heading: &str, properties: Option<&BTreeMap<String, String>>) {
    let Some(properties) = properties.filter(|p| !p.is_empty()) else {
        return;
    };
    println!("{}:", heading);
    for (key, value) in properties {
        println!("  {}={}", key, value);
    }
}

/// Print one name per line, or a placeholder when there are none.
fn print_names<'a, I>(names: I, empty: &str)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut any = false;
    for name in names {
        println!("{}", name);
        any = true;
    }
    if !any {
        println!("{}", empty);
    }
}
