use anyhow::Result;
use polaris_core::utils::{format_namespace, parse_namespace};

use super::Context;
use crate::args::TablesCommand;

pub async fn run(ctx: &Context, prefix: Option<&str>, command: TablesCommand) -> Result<()> {
    match command {
        TablesCommand::List { namespace } => {
            let parts = parse_namespace(&namespace)?;
            let tables = ctx.catalog_client(prefix)?.list_tables(&parts).await?;
            if tables.is_empty() {
                println!("(no tables)");
            }
            for table in tables {
                println!("{}.{}", format_namespace(&table.namespace), table.name);
            }
        }
    }
    Ok(())
}
