//! Storepulse CLI - Multi-tenant Shopify analytics from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password prompted when not passed)
//! storepulse login -e ada@example.com
//!
//! # Manage tenants
//! storepulse tenants list
//! storepulse tenants add acme-store.myshopify.com shpat_xxx owner@acme.test
//! storepulse tenants switch <tenant-id>
//!
//! # Metrics for the selected tenant
//! storepulse overview
//! storepulse orders --from 2024-01-01 --to 2024-01-31
//! storepulse customers --limit 5
//! ```
//!
//! # Environment Variables
//!
//! - `STOREPULSE_API_URL` - Backend base URL (default: `http://localhost:8080`)
//! - `STOREPULSE_SESSION_FILE` - Session blob path
//!   (default: `$HOME/.storepulse/session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storepulse_client::{ClientConfig, DashboardClient};
use storepulse_session::{SessionFile, SessionStore};

#[allow(clippy::print_stdout)]
mod commands;

#[derive(Parser)]
#[command(name = "storepulse")]
#[command(author, version, about = "Multi-tenant Shopify analytics dashboard")]
struct Cli {
    /// Path of the persisted session blob.
    #[arg(long, global = true, env = "STOREPULSE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Operator email address
        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Clear the persisted session
    Logout,
    /// Manage connected tenants
    Tenants {
        #[command(subcommand)]
        action: TenantAction,
    },
    /// Trigger a backend sync for a tenant (selected tenant by default)
    Sync {
        /// Tenant id to sync
        tenant_id: Option<String>,
    },
    /// Show aggregated overview metrics for the selected tenant
    Overview,
    /// Show the per-day order series for the selected tenant
    Orders {
        /// Range start (yyyy-mm-dd, default 30 days ago)
        #[arg(long)]
        from: Option<String>,

        /// Range end (yyyy-mm-dd, default today)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the highest-spending customers for the selected tenant
    Customers {
        /// Maximum number of customers
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
    /// Show the most recent orders for the selected tenant
    Recent {
        /// Maximum number of orders
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Manage the selected tenant's product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum TenantAction {
    /// List known tenants
    List,
    /// Onboard a new tenant
    Add {
        /// Shop domain (e.g., acme-store.myshopify.com)
        shop_domain: String,

        /// Shopify access token for the shop
        access_token: String,

        /// Contact email for the storefront
        contact_email: String,
    },
    /// Remove a tenant from the session
    Remove {
        /// Tenant id
        id: String,
    },
    /// Select the tenant subsequent commands operate on
    Switch {
        /// Tenant id
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List the synced catalog
    List,
    /// Create a product
    Create {
        /// Product title
        title: String,

        /// Product price
        price: f64,

        /// Upstream Shopify product id
        #[arg(long)]
        shop_product_id: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Resolve the session blob path: flag/env first, then `$HOME/.storepulse/`.
fn session_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(|| {
        std::env::var_os("HOME").map_or_else(
            || PathBuf::from("storepulse-session.json"),
            |home| PathBuf::from(home).join(".storepulse").join("session.json"),
        )
    })
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = DashboardClient::new(&config)?;
    let storage = SessionFile::new(session_path(cli.session_file));
    let store = SessionStore::with_storage(client, storage).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&store, &email, password).await?;
        }
        Commands::Logout => commands::session::logout(&store).await,
        Commands::Tenants { action } => match action {
            TenantAction::List => commands::session::tenants_list(&store).await,
            TenantAction::Add {
                shop_domain,
                access_token,
                contact_email,
            } => {
                commands::session::tenants_add(&store, &shop_domain, &access_token, &contact_email)
                    .await?;
            }
            TenantAction::Remove { id } => commands::session::tenants_remove(&store, &id).await,
            TenantAction::Switch { id } => commands::session::tenants_switch(&store, &id).await?,
        },
        Commands::Sync { tenant_id } => {
            commands::session::sync(&store, tenant_id.as_deref()).await?;
        }
        Commands::Overview => commands::metrics::overview(&store).await?,
        Commands::Orders { from, to } => {
            commands::metrics::orders(&store, from.as_deref(), to.as_deref()).await?;
        }
        Commands::Customers { limit } => commands::metrics::customers(&store, limit).await?,
        Commands::Recent { limit } => commands::metrics::recent(&store, limit).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&store).await?,
            ProductAction::Create {
                title,
                price,
                shop_product_id,
            } => commands::products::create(&store, title, price, shop_product_id).await?,
        },
    }
    Ok(())
}
