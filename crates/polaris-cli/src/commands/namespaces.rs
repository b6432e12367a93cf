use anyhow::Result;
use polaris_core::utils::{format_namespace, parse_namespace, parse_properties};
use tracing::debug;

use super::{print_names, Context};
use crate::args::NamespacesCommand;

pub async fn run(ctx: &Context, prefix: Option<&str>, command: NamespacesCommand) -> Result<()> {
    match command {
        NamespacesCommand::List => {
            let client = ctx.catalog_client(prefix)?;
            let namespaces = client.list_namespaces().await?;
            let formatted: Vec<String> = namespaces.iter().map(|ns| format_namespace(ns)).collect();
            print_names(formatted.iter().map(String::as_str), "(no namespaces)");
        }
        NamespacesCommand::Create {
            namespace,
            properties,
        } => {
            let parts = parse_namespace(&namespace)?;
            let properties = parse_properties(&properties)?;
            let client = ctx.catalog_client(prefix)?;
            debug!("Creating namespace {:?} in {}", parts, client.prefix());
            let created = client.create_namespace(parts, properties).await?;
            println!("Created namespace {}", format_namespace(&created.namespace));
        }
    }
    Ok(())
}
