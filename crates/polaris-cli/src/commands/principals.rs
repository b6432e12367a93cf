use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use polaris_core::api::require_entity_version;
use polaris_core::models::{Principal, PrincipalWithCredentials, UpdateEntityRequest};
use polaris_core::utils::parse_properties;

use super::{print_names, print_properties, Context};
use crate::args::PrincipalsCommand;

pub async fn run(ctx: &Context, command: PrincipalsCommand) -> Result<()> {
    match command {
        PrincipalsCommand::List => {
            let principals = ctx.management_client()?.list_principals().await?;
            print_names(principals.iter().map(|p| p.name.as_str()), "(no principals)");
        }
        PrincipalsCommand::Create(args) => {
            let properties = parse_properties(&args.properties)?;
            let principal = Principal {
                name: args.name,
                properties: (!properties.is_empty()).then_some(properties),
                ..Principal::default()
            };
            let created = ctx.management_client()?.create_principal(principal).await?;
            print_json(&created)?;
        }
        PrincipalsCommand::Delete(args) => {
            ctx.management_client()?.delete_principal(&args.name).await?;
            println!("Deleted principal {}", args.name);
        }
        PrincipalsCommand::Describe(args) => {
            let principal = ctx.management_client()?.get_principal(&args.name).await?;
            describe(&principal);
        }
        PrincipalsCommand::Update(args) => {
            let properties = parse_properties(&args.properties)?;
            let client = ctx.management_client()?;
            let current = client
                .get_principal(&args.name)
                .await
                .context("failed to fetch principal")?;
            let update = UpdateEntityRequest {
                current_entity_version: require_entity_version(current.entity_version, "principal")?,
                properties: merge_properties(current.properties, properties),
            };
            client.update_principal(&args.name, &update).await?;
            println!("Updated principal {}", args.name);
        }
        PrincipalsCommand::RotateCredentials(args) => {
            let rotated = ctx.management_client()?.rotate_credentials(&args.name).await?;
            print_json(&rotated)?;
        }
        PrincipalsCommand::ResetCredentials(args) => {
            let reset = ctx.management_client()?.reset_credentials(&args.name).await?;
            print_json(&reset)?;
        }
        PrincipalsCommand::ListRoles(args) => {
            let roles = ctx
                .management_client()?
                .list_principal_roles(&args.name)
                .await?;
            print_names(roles.iter().map(|r| r.name.as_str()), "(no roles assigned)");
        }
        PrincipalsCommand::AssignRole(args) => {
            ctx.management_client()?
                .assign_principal_role(&args.name, &args.role)
                .await?;
            println!("Assigned role {} to principal {}", args.role, args.name);
        }
        PrincipalsCommand::RevokeRole(args) => {
            ctx.management_client()?
                .revoke_principal_role(&args.name, &args.role)
                .await?;
            println!("Revoked role {} from principal {}", args.role, args.name);
        }
    }
    Ok(())
}

/// New values win over existing ones.
fn merge_properties(
    existing: Option<BTreeMap<String, String>>,
    updates: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = existing.unwrap_or_default();
    merged.extend(updates);
    merged
}

fn print_json(value: &PrincipalWithCredentials) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to format response")?;
    println!("{}", json);
    Ok(())
}

fn describe(principal: &Principal) {
    println!("Name: {}", principal.name);
    if let Some(ref client_id) = principal.client_id {
        println!("Client ID: {}", client_id);
    }
    if let Some(version) = principal.entity_version {
        println!("Entity Version: {}", version);
    }
    if let Some(created) = principal.create_timestamp {
        println!("Create Timestamp: {}", created);
    }
    if let Some(updated) = principal.last_update_timestamp {
        println!("Last Update Timestamp: {}", updated);
    }
    print_properties("Properties", principal.properties.as_ref());
}
