//! FoodieFinds CLI - drive the client core against a live backend.
//!
//! # Usage
//!
//! ```bash
//! # Browse reviews
//! ff-cli reviews list
//! ff-cli reviews list --search pizza
//! ff-cli reviews featured
//! ff-cli reviews show 6740f2a91b3c
//!
//! # Member actions (sign in with -e / -p)
//! ff-cli reviews mine -e me@example.com -p Hunter2x
//! ff-cli reviews post -e me@example.com -p Hunter2x \
//!     --food "Margherita Pizza" --image https://img.example/p.jpg \
//!     --restaurant "Tony's" --location "Brooklyn, NY" \
//!     --rating 5 --text "Perfect char on the crust."
//! ff-cli favorites list -e me@example.com -p Hunter2x
//!
//! # Account management
//! ff-cli account register -e new@example.com -p Abc123 -n "New Member"
//! ```
//!
//! # Environment Variables
//!
//! - `FOODIEFINDS_API_URL` - Base URL of the review/favorite REST API
//! - `FOODIEFINDS_IDENTITY_URL` - Base URL of the identity provider
//! - `FOODIEFINDS_IDENTITY_API_KEY` - Identity provider API key

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "FoodieFinds CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Credentials for member-only commands.
#[derive(Args)]
struct Credentials {
    /// Member email address
    #[arg(short, long)]
    email: String,

    /// Member password
    #[arg(short, long)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Manage the member account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List all reviews, optionally filtered by food name
    List {
        /// Case-insensitive food-name search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the top-rated subset
    Featured,
    /// Show one review
    Show {
        /// Review id
        id: String,
    },
    /// List the signed-in member's reviews
    Mine {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Publish a new review
    Post {
        #[command(flatten)]
        credentials: Credentials,

        /// Dish name
        #[arg(long)]
        food: String,

        /// Dish photo URL
        #[arg(long)]
        image: String,

        /// Restaurant name
        #[arg(long)]
        restaurant: String,

        /// Restaurant location
        #[arg(long)]
        location: String,

        /// Star rating (1-5)
        #[arg(long)]
        rating: u8,

        /// Review text
        #[arg(long)]
        text: String,
    },
    /// Delete one of the member's reviews
    Delete {
        #[command(flatten)]
        credentials: Credentials,

        /// Review id
        id: String,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// List the signed-in member's favorites
    List {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Save a review to the member's favorites
    Add {
        #[command(flatten)]
        credentials: Credentials,

        /// Review id
        id: String,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new member account
    Register {
        #[command(flatten)]
        credentials: Credentials,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Avatar URL
        #[arg(long)]
        photo: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Reviews { action } => match action {
            ReviewAction::List { search } => commands::reviews::list(search.as_deref()).await?,
            ReviewAction::Featured => commands::reviews::featured().await?,
            ReviewAction::Show { id } => commands::reviews::show(&id).await?,
            ReviewAction::Mine { credentials } => {
                commands::reviews::mine(&credentials.email, &credentials.password).await?;
            }
            ReviewAction::Post {
                credentials,
                food,
                image,
                restaurant,
                location,
                rating,
                text,
            } => {
                commands::reviews::post(
                    &credentials.email,
                    &credentials.password,
                    commands::reviews::PostArgs {
                        food,
                        image,
                        restaurant,
                        location,
                        rating,
                        text,
                    },
                )
                .await?;
            }
            ReviewAction::Delete { credentials, id } => {
                commands::reviews::delete(&credentials.email, &credentials.password, &id).await?;
            }
        },
        Commands::Favorites { action } => match action {
            FavoriteAction::List { credentials } => {
                commands::favorites::list(&credentials.email, &credentials.password).await?;
            }
            FavoriteAction::Add { credentials, id } => {
                commands::favorites::add(&credentials.email, &credentials.password, &id).await?;
            }
        },
        Commands::Account { action } => match action {
            AccountAction::Register {
                credentials,
                name,
                photo,
            } => {
                commands::account::register(
                    &credentials.email,
                    &credentials.password,
                    &name,
                    photo.as_deref(),
                )
                .await?;
            }
        },
    }
    Ok(())
}
