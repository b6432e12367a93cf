use std::io::{self, Write};

use anyhow::{bail, Context as _, Result};
use polaris_core::auth::{logout, AuthClient};
use polaris_core::utils::mask_token;
use polaris_core::Error;
use tracing::debug;

use super::Context;
use crate::args::{AuthCommand, LoginArgs};

pub async fn run(ctx: &Context, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login(args) => login(ctx, args).await,
        AuthCommand::Logout => {
            logout(&ctx.config_dir).context("failed to log out")?;
            println!("✓ Successfully logged out!");
            Ok(())
        }
        AuthCommand::Status => status(ctx),
        AuthCommand::Refresh => refresh(ctx).await,
    }
}

async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let config = ctx.load_config()?;
    if config.host.trim().is_empty() {
        bail!("Polaris host not configured. Run 'polaris config set --host <url>' first");
    }

    let client_id = match args.client_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => prompt_client_id()?,
    };
    if client_id.is_empty() {
        bail!("client ID is required");
    }

    let client_secret = match args.client_secret.filter(|s| !s.is_empty()) {
        Some(secret) => secret,
        None => rpassword::prompt_password("Client Secret: ")
            .context("failed to read client secret")?,
    };
    if client_secret.is_empty() {
        bail!("client secret is required");
    }

    println!("Authenticating with {}...", config.host);
    let credentials = AuthClient::new(&config)?
        .login(&client_id, &client_secret)
        .await
        .context("authentication failed")?;
    credentials
        .save_to(&ctx.config_dir)
        .context("failed to save credentials")?;
    debug!("Saved credentials for client {}", client_id);

    println!("✓ Successfully authenticated!");
    if credentials.expires_in > 0 {
        println!("  Token expires in: {} seconds", credentials.expires_in);
    }
    if !credentials.scope.is_empty() {
        println!("  Scope: {}", credentials.scope);
    }
    Ok(())
}

fn prompt_client_id() -> Result<String> {
    print!("Client ID: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read client ID")?;
    Ok(input.trim().to_string())
}

fn status(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    println!("Host: {}", config.host);
    if let Some(realm) = config.realm() {
        println!("Realm: {}", realm);
    }

    let credentials = match ctx.load_credentials() {
        Ok(credentials) if credentials.is_authenticated() => Some(credentials),
        Ok(_) | Err(Error::NotAuthenticated) => None,
        Err(e) => {
            debug!("Treating unreadable credentials as logged out: {}", e);
            None
        }
    };
    let Some(credentials) = credentials else {
        println!("Status: Not authenticated");
        println!("\nRun 'polaris auth login' to authenticate.");
        return Ok(());
    };

    println!("Status: Authenticated ✓");
    if !credentials.token_type.is_empty() {
        println!("Token Type: {}", credentials.token_type);
    }
    if !credentials.scope.is_empty() {
        println!("Scope: {}", credentials.scope);
    }
    if !credentials.client_id.is_empty() {
        println!("Client ID: {}", credentials.client_id);
    }
    if let Some(masked) = mask_token(&credentials.access_token) {
        println!("Access Token: {}", masked);
    }
    Ok(())
}

async fn refresh(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let current = ctx.load_credentials().context("not authenticated")?;

    println!("Refreshing access token...");
    let refreshed = AuthClient::new(&config)?
        .refresh_token(&current)
        .await
        .context("failed to refresh token")?;
    refreshed
        .save_to(&ctx.config_dir)
        .context("failed to save credentials")?;

    println!("✓ Token refreshed successfully!");
    if refreshed.expires_in > 0 {
        println!("  New token expires in: {} seconds", refreshed.expires_in);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaris_core::auth::Credentials;

    fn context() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config_dir: dir.path().to_path_buf(),
        };
        (dir, ctx)
    }

    #[test]
    fn test_status_without_credentials_succeeds() {
        let (_dir, ctx) = context();
        assert!(status(&ctx).is_ok());
    }

    #[test]
    fn test_status_with_credentials_succeeds() {
        let (_dir, ctx) = context();
        Credentials {
            access_token: "abcdefghijklmnopqrstuvwxyz".to_string(),
            token_type: "bearer".to_string(),
            client_id: "root".to_string(),
            ..Credentials::default()
        }
        .save_to(&ctx.config_dir)
        .unwrap();
        assert!(status(&ctx).is_ok());
    }

    #[test]
    fn test_status_with_corrupt_credentials_succeeds() {
        let (_dir, ctx) = context();
        std::fs::write(ctx.config_dir.join("credentials.json"), "{\"access_token\":").unwrap();
        assert!(status(&ctx).is_ok());
    }

    #[tokio::test]
    async fn test_refresh_without_login_fails() {
        let (_dir, ctx) = context();
        let err = refresh(&ctx).await.unwrap_err();
        assert!(format!("{:#}", err).starts_with("not authenticated"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (_dir, ctx) = context();
        run(&ctx, AuthCommand::Logout).await.unwrap();
        run(&ctx, AuthCommand::Logout).await.unwrap();
    }
}
