use anyhow::{Context as _, Result};
use polaris_core::models::{CatalogRole, Grant, UpdateEntityRequest};
use polaris_core::utils::parse_properties;
use tracing::debug;

use super::{print_names, print_properties, Context};
use crate::args::{GrantArgs, RoleGrantsCommand, RolePrincipalsCommand, RolesCommand};

pub async fn run(ctx: &Context, command: RolesCommand) -> Result<()> {
    match command {
        RolesCommand::List(args) => {
            let roles = ctx
                .management_client()?
                .list_catalog_roles(&args.catalog)
                .await?;
            print_names(roles.iter().map(|r| r.name.as_str()), "(no roles)");
        }
        RolesCommand::Create(args) => {
            let properties = parse_properties(&args.properties)?;
            let role = CatalogRole {
                name: args.name.clone(),
                properties: (!properties.is_empty()).then_some(properties),
                ..CatalogRole::default()
            };
            ctx.management_client()?
                .create_catalog_role(&args.catalog, role)
                .await?;
            println!(
                "Created catalog role {} in catalog {}",
                args.name, args.catalog
            );
        }
        RolesCommand::Describe(args) => {
            let role = ctx
                .management_client()?
                .get_catalog_role(&args.catalog, &args.name)
                .await?;
            describe(&role);
        }
        RolesCommand::Delete(args) => {
            ctx.management_client()?
                .delete_catalog_role(&args.catalog, &args.name)
                .await?;
            println!(
                "Deleted catalog role {} from catalog {}",
                args.name, args.catalog
            );
        }
        RolesCommand::Update(args) => {
            let properties = parse_properties(&args.properties)?;
            let client = ctx.management_client()?;
            let current = client
                .get_catalog_role(&args.catalog, &args.name)
                .await
                .context("failed to fetch role")?;
            // Replaces the role's properties wholesale.
            let update = UpdateEntityRequest {
                current_entity_version: current.entity_version.unwrap_or(0),
                properties,
            };
            client
                .update_catalog_role(&args.catalog, &args.name, &update)
                .await?;
            println!(
                "Updated catalog role {} in catalog {}",
                args.name, args.catalog
            );
        }
        RolesCommand::Grant(args) => {
            let grant = build_grant(&args)?;
            ctx.management_client()?
                .add_grant(&args.catalog, &args.role, grant.clone())
                .await?;
            println!(
                "Granted {} on {} to role {}",
                grant.privilege(),
                grant.kind(),
                args.role
            );
        }
        RolesCommand::Revoke(args) => {
            let grant = build_grant(&args.grant)?;
            debug!("Revoking {:?} (cascade={})", grant, args.cascade);
            ctx.management_client()?
                .revoke_grant(&args.grant.catalog, &args.grant.role, grant.clone(), args.cascade)
                .await?;
            println!(
                "Revoked {} on {} from role {}",
                grant.privilege(),
                grant.kind(),
                args.grant.role
            );
        }
        RolesCommand::Grants {
            command: RoleGrantsCommand::List(args),
        } => {
            let grants = ctx
                .management_client()?
                .list_grants(&args.catalog, &args.role)
                .await?;
            let lines: Vec<String> = grants.iter().map(|g| g.describe()).collect();
            print_names(lines.iter().map(String::as_str), "(no grants)");
        }
        RolesCommand::Principals {
            command: RolePrincipalsCommand::List(args),
        } => {
            let roles = ctx
                .management_client()?
                .list_assignee_principal_roles(&args.catalog, &args.role)
                .await?;
            print_names(
                roles.iter().map(|r| r.name.as_str()),
                "(no principal roles assigned)",
            );
        }
    }
    Ok(())
}

fn build_grant(args: &GrantArgs) -> polaris_core::Result<Grant> {
    Grant::build(
        &args.resource_type,
        &args.privilege,
        args.namespace.as_deref(),
        args.table.as_deref(),
        args.view.as_deref(),
    )
}

fn describe(role: &CatalogRole) {
    println!("Name: {}", role.name);
    print_properties("Properties", role.properties.as_ref());
    if let Some(created) = role.create_timestamp {
        println!("Created: {}", created);
    }
    if let Some(updated) = role.last_update_timestamp {
        println!("Last Updated: {}", updated);
    }
    if let Some(version) = role.entity_version {
        println!("Version: {}", version);
    }
}
