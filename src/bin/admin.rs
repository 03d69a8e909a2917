//! CLI administration tool for link-service.
//!
//! Inspects and manages stored links without going through the HTTP API.
//! Mutations use the same service chain as the server, so quota and ownership
//! rules apply and change events are published.
//!
//! # Usage
//!
//! ```bash
//! # List a user's links
//! cargo run --bin admin -- links list alice
//!
//! # Delete a link (asks for confirmation unless -y is given)
//! cargo run --bin admin -- links delete alice https://example.com -y
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! The same variables as the server (see `link_service::config`). `DATABASE_URL`
//! or the `DB_*` components are required.

use link_service::config::{self, StoreBackend};
use link_service::domain::LinkError;
use link_service::domain::entities::LinkFilter;
use link_service::server::build_state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// CLI tool for managing link-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage stored links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all links of a user
    List {
        /// Owner username
        owner: String,
    },

    /// Delete one link of a user
    Delete {
        /// Owner username
        owner: String,

        /// URL of the link to delete
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.store_backend != StoreBackend::Postgres {
        anyhow::bail!("admin requires LINK_STORE=postgres");
    }

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, config: &config::Config) -> Result<()> {
    let state = build_state(config).await?;

    match action {
        LinksAction::List { owner } => {
            println!("{}", "📋 Links".bright_blue().bold());
            println!();

            let links = state
                .link_manager
                .get_links(&owner, LinkFilter::default())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

            if links.is_empty() {
                println!("{}", format!("  No links found for {}", owner).yellow());
                return Ok(());
            }

            println!(
                "  {:<50} {:<30} {:<20}",
                "URL".bright_white().bold(),
                "Title".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(100).bright_black());

            for link in &links {
                println!(
                    "  {:<50} {:<30} {:<20}",
                    link.url.cyan(),
                    link.title,
                    link.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
                if !link.tags.is_empty() {
                    let tags: Vec<&str> = link.tags.iter().map(String::as_str).collect();
                    println!("    {}", tags.join(", ").bright_black());
                }
            }

            println!();
            println!(
                "  Total: {}",
                links.len().to_string().bright_white().bold()
            );
            println!();
        }
        LinksAction::Delete { owner, url, yes } => {
            println!("{}", "🗑  Delete Link".bright_blue().bold());
            println!();
            println!("  Owner: {}", owner.cyan());
            println!("  URL:   {}", url.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            match state.link_manager.delete_link(&owner, &url).await {
                Ok(()) => {
                    println!("{}", "✅ Link deleted".green().bold());
                }
                Err(LinkError::NotFound { .. }) => {
                    println!("{}", "⚠️  No such link".yellow());
                }
                Err(e) => return Err(anyhow::anyhow!("Failed to delete link: {}", e)),
            }
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &config::Config) -> Result<()> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = PgPool::connect(database_url)
                .await
                .context("Failed to connect to database")?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(&pool)
                .await
                .context("Links table missing, has the server run its migrations?")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Links stored: {}",
                links_count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
