use clap::{Args, Parser, Subcommand};

/// Apache Polaris CLI - manage catalogs, principals, namespaces and tables
#[derive(Parser, Debug)]
#[command(name = "polaris")]
#[command(version)]
#[command(about = "A CLI for Apache Polaris")]
#[command(long_about = "Apache Polaris CLI is a command-line interface for managing
Apache Polaris catalogs, namespaces, tables, and more.

To get started, configure your Polaris server and authenticate:
  polaris config set --host http://localhost:8181
  polaris auth login --client-id <your-client-id> --client-secret <your-client-secret>")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Catalog management commands
    Catalogs {
        #[command(subcommand)]
        command: CatalogsCommand,
    },
    /// Catalog API commands (namespaces, tables)
    Catalog(CatalogArgs),
    /// Principal management commands
    Principals {
        #[command(subcommand)]
        command: PrincipalsCommand,
    },
}

// ===== auth =====

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Authenticate with the Polaris server using client credentials
    Login(LoginArgs),
    /// Clear stored authentication credentials
    Logout,
    /// Show authentication status
    Status,
    /// Exchange the current access token for a new one
    Refresh,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// OAuth client ID (prompted for when missing)
    #[arg(long = "client-id", env = "POLARIS_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret (prompted for when missing)
    #[arg(long = "client-secret", env = "POLARIS_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
}

// ===== config =====

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Show current configuration
    Show,
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Polaris server URL (e.g., http://localhost:8181)
    #[arg(long)]
    pub host: Option<String>,

    /// Polaris realm (for multi-tenant setups); pass "" to clear
    #[arg(long)]
    pub realm: Option<String>,

    /// Default catalog prefix for catalog API calls; pass "" to clear
    #[arg(long = "catalog-prefix")]
    pub catalog_prefix: Option<String>,
}

// ===== catalogs =====

#[derive(Subcommand, Debug)]
pub enum CatalogsCommand {
    /// List catalogs
    List,
    /// Describe a catalog
    Describe(CatalogNameArgs),
    /// Create a catalog
    Create(CreateCatalogArgs),
    /// Delete a catalog
    Delete(CatalogNameArgs),
    /// Catalog role management commands
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
}

#[derive(Args, Debug)]
pub struct CatalogNameArgs {
    /// Catalog name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateCatalogArgs {
    /// Catalog name
    #[arg(long)]
    pub name: String,

    /// Catalog type: INTERNAL or EXTERNAL
    #[arg(long = "type", default_value = "INTERNAL")]
    pub catalog_type: String,

    /// Storage type: S3, GCS, AZURE, FILE
    #[arg(long = "storage-type", default_value = "S3")]
    pub storage_type: String,

    /// Default base location
    #[arg(long = "default-base-location")]
    pub default_base_location: String,

    /// Allowed location (repeatable)
    #[arg(long = "allowed-location")]
    pub allowed_locations: Vec<String>,

    /// Catalog property key=value (repeatable)
    #[arg(long = "property")]
    pub properties: Vec<String>,
}

// ===== catalog (Iceberg REST) =====

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog prefix (required if not set in config)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Namespace operations
    Namespaces {
        #[command(subcommand)]
        command: NamespacesCommand,
    },
    /// Table operations
    Tables {
        #[command(subcommand)]
        command: TablesCommand,
    },
    /// Catalog role management commands (same as `catalogs roles`)
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NamespacesCommand {
    /// List namespaces
    List,
    /// Create a namespace
    Create {
        /// Namespace (dot- or slash-separated)
        namespace: String,

        /// Namespace property key=value (repeatable)
        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TablesCommand {
    /// List tables in a namespace
    List {
        /// Namespace (dot- or slash-separated)
        #[arg(long)]
        namespace: String,
    },
}

// ===== catalog roles =====

#[derive(Subcommand, Debug)]
pub enum RolesCommand {
    /// List catalog roles
    List(CatalogOnlyArgs),
    /// Create a catalog role
    Create(RolePropertiesArgs),
    /// Describe a catalog role
    Describe(RoleNameArgs),
    /// Delete a catalog role
    Delete(RoleNameArgs),
    /// Replace the properties of a catalog role
    Update(RolePropertiesArgs),
    /// Grant a privilege to a catalog role
    Grant(GrantArgs),
    /// Revoke a privilege from a catalog role
    Revoke(RevokeArgs),
    /// Manage grants for a catalog role
    Grants {
        #[command(subcommand)]
        command: RoleGrantsCommand,
    },
    /// Manage principal roles assigned to a catalog role
    Principals {
        #[command(subcommand)]
        command: RolePrincipalsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleGrantsCommand {
    /// List grants for a catalog role
    List(RoleRefArgs),
}

#[derive(Subcommand, Debug)]
pub enum RolePrincipalsCommand {
    /// List principal roles assigned to a catalog role
    List(RoleRefArgs),
}

#[derive(Args, Debug)]
pub struct CatalogOnlyArgs {
    /// Catalog name
    #[arg(long)]
    pub catalog: String,
}

#[derive(Args, Debug)]
pub struct RoleNameArgs {
    /// Catalog name
    #[arg(long)]
    pub catalog: String,

    /// Role name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct RolePropertiesArgs {
    /// Catalog name
    #[arg(long)]
    pub catalog: String,

    /// Role name
    #[arg(long)]
    pub name: String,

    /// Role property key=value (repeatable)
    #[arg(long = "property")]
    pub properties: Vec<String>,
}

/// Identifies a role by `--role` rather than `--name`
#[derive(Args, Debug)]
pub struct RoleRefArgs {
    /// Catalog name
    #[arg(long)]
    pub catalog: String,

    /// Role name
    #[arg(long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct GrantArgs {
    /// Catalog name
    #[arg(long)]
    pub catalog: String,

    /// Role name
    #[arg(long)]
    pub role: String,

    /// Resource type: catalog, namespace, table, view
    #[arg(long = "type")]
    pub resource_type: String,

    /// Privilege, e.g. TABLE_READ_DATA
    #[arg(long)]
    pub privilege: String,

    /// Namespace (for namespace, table, view grants)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Table name (for table grants)
    #[arg(long)]
    pub table: Option<String>,

    /// View name (for view grants)
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Args, Debug)]
pub struct RevokeArgs {
    #[command(flatten)]
    pub grant: GrantArgs,

    /// Cascade revocation
    #[arg(long)]
    pub cascade: bool,
}

// ===== principals =====

#[derive(Subcommand, Debug)]
pub enum PrincipalsCommand {
    /// List principals
    List,
    /// Create a principal and print its credentials
    Create(PrincipalPropertiesArgs),
    /// Delete a principal
    Delete(PrincipalNameArgs),
    /// Describe a principal
    Describe(PrincipalNameArgs),
    /// Merge properties into a principal
    Update(PrincipalPropertiesArgs),
    /// Rotate principal credentials
    RotateCredentials(PrincipalNameArgs),
    /// Reset principal credentials
    ResetCredentials(PrincipalNameArgs),
    /// List roles assigned to a principal
    ListRoles(PrincipalNameArgs),
    /// Assign a principal role to a principal
    AssignRole(PrincipalRoleArgs),
    /// Revoke a principal role from a principal
    RevokeRole(PrincipalRoleArgs),
}

#[derive(Args, Debug)]
pub struct PrincipalNameArgs {
    /// Principal name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct PrincipalPropertiesArgs {
    /// Principal name
    #[arg(long)]
    pub name: String,

    /// Principal property key=value (repeatable)
    #[arg(long = "property")]
    pub properties: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PrincipalRoleArgs {
    /// Principal name
    #[arg(long)]
    pub name: String,

    /// Principal role name
    #[arg(long)]
    pub role: String,
}
