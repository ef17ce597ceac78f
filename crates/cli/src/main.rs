//! CoffeeCorner CLI - Local user and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create a user in the local credential store
//! cc-cli user create -u "Jane" -e jane@example.com -p "a long password"
//!
//! # List users in the local credential store
//! cc-cli user list
//!
//! # List the product catalog
//! cc-cli catalog list
//! ```
//!
//! # Commands
//!
//! - `user create` / `user list` - Manage the local credential store (the
//!   same `users.json` the server uses when Contentstack is not configured)
//! - `catalog list` - Print the seeded catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "CoffeeCorner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage local credential-store users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user in the local credential store
    Create {
        /// Display username
        #[arg(short, long)]
        username: String,

        /// Email address (the store key)
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// List users in the local credential store
    List,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                email,
                password,
            } => {
                commands::users::create(&username, &email, &password).await?;
            }
            UserAction::List => commands::users::list()?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
        },
    }
    Ok(())
}
