use std::collections::BTreeMap;

use anyhow::{bail, Result};
use polaris_core::models::{
    Catalog, CatalogProperties, CatalogType, StorageConfigInfo, StorageType,
};
use polaris_core::utils::parse_properties;

use super::{catalog_roles, print_names, print_properties, Context};
use crate::args::{CatalogsCommand, CreateCatalogArgs};

pub async fn run(ctx: &Context, command: CatalogsCommand) -> Result<()> {
    match command {
        CatalogsCommand::List => {
            let catalogs = ctx.management_client()?.list_catalogs().await?;
            print_names(catalogs.iter().map(|c| c.name.as_str()), "(no catalogs)");
        }
        CatalogsCommand::Describe(args) => {
            let catalog = ctx.management_client()?.get_catalog(&args.name).await?;
            describe(&catalog);
        }
        CatalogsCommand::Create(args) => {
            // Validate locally before touching credentials or the network.
            let catalog = build_catalog(args)?;
            let name = catalog.name.clone();
            ctx.management_client()?.create_catalog(catalog).await?;
            println!("Created catalog {}", name);
        }
        CatalogsCommand::Delete(args) => {
            ctx.management_client()?.delete_catalog(&args.name).await?;
            println!("Deleted catalog {}", args.name);
        }
        CatalogsCommand::Roles { command } => return catalog_roles::run(ctx, command).await,
    }
    Ok(())
}

fn build_catalog(args: CreateCatalogArgs) -> Result<Catalog> {
    if args.name.trim().is_empty() {
        bail!("--name is required");
    }
    if args.default_base_location.trim().is_empty() {
        bail!("--default-base-location is required");
    }
    let catalog_type: CatalogType = args.catalog_type.parse()?;
    let storage_type: StorageType = args.storage_type.parse()?;
    let additional = parse_properties(&args.properties)?;

    Ok(Catalog {
        catalog_type,
        name: args.name,
        properties: CatalogProperties {
            default_base_location: args.default_base_location,
            additional,
        },
        storage_config_info: StorageConfigInfo {
            storage_type,
            allowed_locations: (!args.allowed_locations.is_empty())
                .then_some(args.allowed_locations),
            extra: BTreeMap::new(),
        },
        create_timestamp: None,
        last_update_timestamp: None,
        entity_version: None,
    })
}

fn describe(catalog: &Catalog) {
    println!("Name: {}", catalog.name);
    println!("Type: {}", catalog.catalog_type);
    println!("Storage Type: {}", catalog.storage_config_info.storage_type);
    if !catalog.properties.default_base_location.is_empty() {
        println!(
            "Default Base Location: {}",
            catalog.properties.default_base_location
        );
    }
    if let Some(locations) = catalog
        .storage_config_info
        .allowed_locations
        .as_ref()
        .filter(|l| !l.is_empty())
    {
        println!("Allowed Locations:");
        for location in locations {
            println!("  {}", location);
        }
    }
    print_properties("Properties", Some(&catalog.properties.additional));
}
