//! Fashion Cube CLI - catalog seeding and storefront commands.
//!
//! # Usage
//!
//! ```bash
//! # Seed the API server's data file with a generated catalog
//! fc-cli seed --count 100 --seed 42
//!
//! # Browse the catalog
//! fc-cli catalog list --category Shoes
//! fc-cli catalog search jeans
//! fc-cli catalog show 12
//!
//! # Account and cart
//! fc-cli account register -n "Ada Lovelace" -e ada@example.com -p engine
//! fc-cli account login -e ada@example.com -p engine
//! fc-cli cart add 12
//! fc-cli cart show
//! fc-cli cart summary
//! ```
//!
//! # Commands
//!
//! - `seed` - Write a generated catalog into a storefront data file
//! - `catalog` - List, search and show products
//! - `account` - Register, log in, log out, show the session
//! - `cart` - Show the cart, check stock and change quantities
//!
//! Everything except `seed` talks to the API at `FASHION_CUBE_API_URL` and
//! falls back to `FASHION_CUBE_LOCAL_STORE` when it is unreachable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fashion_cube_storefront::catalog::generator::DEFAULT_SEED_SIZE;

mod commands;

use commands::cart::CartChange;
use commands::{Bridges, CliError};

/// Rows shown by listing commands unless `--limit` says otherwise.
const DEFAULT_LIMIT: usize = 20;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(author, version, about = "Fashion Cube CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a data file with a generated catalog
    Seed {
        /// Storefront data file
        #[arg(short, long, default_value = "data/storefront.json")]
        data_path: PathBuf,

        /// Number of products
        #[arg(short, long, default_value_t = DEFAULT_SEED_SIZE)]
        count: usize,

        /// Seed for a reproducible catalog
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the account session
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage the cart of the logged-in user
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Category or department (`All` for everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Only titles containing this text
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Maximum rows to show
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Search titles, descriptions and categories
    Search {
        query: String,

        /// Maximum rows to show
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Show one product
    Show { id: String },
    /// List departments
    Departments,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Log in and remember the session
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the session
    Logout,
    /// Show the session
    Whoami,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Show the cart and check it against current stock
    Summary,
    /// Add one unit of a product
    Add { product_id: String },
    /// Increase a line by one
    Increase { product_id: String },
    /// Decrease a line by one, removing it at zero
    Decrease { product_id: String },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Seed {
            data_path,
            count,
            seed,
        } => {
            let _ = dotenvy::dotenv();
            commands::seed::catalog(&data_path, count, seed)?;
        }
        Commands::Catalog { action } => {
            let bridges = Bridges::from_env()?;
            match action {
                CatalogAction::List {
                    category,
                    subcategory,
                    limit,
                } => commands::catalog::list(&bridges.catalog, category, subcategory, limit).await,
                CatalogAction::Search { query, limit } => {
                    commands::catalog::search(&bridges.catalog, &query, limit).await;
                }
                CatalogAction::Show { id } => commands::catalog::show(&bridges.catalog, &id).await?,
                CatalogAction::Departments => {
                    commands::catalog::departments(&bridges.catalog).await;
                }
            }
        }
        Commands::Account { action } => {
            let bridges = Bridges::from_env()?;
            match action {
                AccountAction::Register {
                    name,
                    email,
                    password,
                    confirm,
                } => {
                    commands::account::register(&bridges.auth, &name, &email, password, confirm)
                        .await?;
                }
                AccountAction::Login { email, password } => {
                    commands::account::login(&bridges.auth, &email, password).await?;
                }
                AccountAction::Logout => commands::account::logout(&bridges.auth)?,
                AccountAction::Whoami => commands::account::whoami(&bridges.auth)?,
            }
        }
        Commands::Cart { action } => {
            let bridges = Bridges::from_env()?;
            match action {
                CartAction::Show => commands::cart::show(&bridges).await?,
                CartAction::Summary => commands::cart::stock_summary(&bridges).await?,
                CartAction::Add { product_id } => {
                    commands::cart::change(&bridges, &product_id, CartChange::Add).await?;
                }
                CartAction::Increase { product_id } => {
                    commands::cart::change(&bridges, &product_id, CartChange::Increase).await?;
                }
                CartAction::Decrease { product_id } => {
                    commands::cart::change(&bridges, &product_id, CartChange::Decrease).await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_defaults() {
        let cli = Cli::try_parse_from(["fc-cli", "seed"]).unwrap();
        let Commands::Seed {
            data_path,
            count,
            seed,
        } = cli.command
        else {
            panic!("expected seed");
        };
        assert_eq!(data_path, PathBuf::from("data/storefront.json"));
        assert_eq!(count, DEFAULT_SEED_SIZE);
        assert_eq!(seed, None);
    }

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::try_parse_from(["fc-cli", "cart", "add", "12"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Add { ref product_id }
            } if product_id == "12"
        ));
    }

    #[test]
    fn test_parse_cart_summary() {
        let cli = Cli::try_parse_from(["fc-cli", "cart", "summary"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Summary
            }
        ));
    }
}
