//! CLI administration tool for split-shortener.
//!
//! Creates and inspects slugs and checks the database without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a slug that sends 10 visitors to A, then 5 to B, then A forever
//! cargo run --bin admin -- slug create https://a.example --primary-count 10 \
//!     --secondary https://b.example --secondary-count 5
//!
//! # Show a slug and its remaining counters
//! cargo run --bin admin -- slug show 100680ad
//!
//! # Print the slug a URL would get, without storing anything
//! cargo run --bin admin -- hash https://a.example
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SLUG_LENGTH` (optional): `7` or `8`, must match the server
//! - `DUPLICATE_POLICY` (optional): `reject` or `replace`, must match the server

use split_shortener::application::services::{CreateSlug, DuplicatePolicy, SlugRegistry};
use split_shortener::domain::entities::SlugRecord;
use split_shortener::infrastructure::cache::NullCache;
use split_shortener::infrastructure::persistence::PgSlugRepository;
use split_shortener::utils::slug_generator::{SlugGenerator, SlugLength};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing split-shortener.
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
    /// Manage slugs
    Slug {
        #[command(subcommand)]
        action: SlugAction,
    },

    /// Print the slug a URL maps to, without touching the database
    Hash {
        /// URL to hash
        url: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Slug management subcommands.
#[derive(Subcommand)]
enum SlugAction {
    /// Create a slug
    Create {
        /// Primary destination URL
        primary: String,

        /// Serves sent to the primary URL first
        #[arg(long, default_value_t = 0)]
        primary_count: i64,

        /// Secondary destination URL
        #[arg(long)]
        secondary: Option<String>,

        /// Serves sent to the secondary URL next
        #[arg(long, default_value_t = 0)]
        secondary_count: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a slug without spending its counters
    Show {
        /// Slug to look up
        slug: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let generator = SlugGenerator::new(env_parse("SLUG_LENGTH")?.unwrap_or(SlugLength::Eight));

    if let Commands::Hash { url } = &cli.command {
        println!("{}", generator.generate(url.trim()).bright_yellow().bold());
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Slug { action } => handle_slug_action(action, &pool, generator).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
        Commands::Hash { .. } => Ok(()),
    };

    pool.close().await;
    result
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => Ok(Some(v.parse().with_context(|| format!("Invalid {}", key))?)),
        Err(_) => Ok(None),
    }
}

/// Dispatches slug management commands.
async fn handle_slug_action(
    action: SlugAction,
    pool: &PgPool,
    generator: SlugGenerator,
) -> Result<()> {
    let policy: DuplicatePolicy = env_parse("DUPLICATE_POLICY")?.unwrap_or_default();
    let registry = SlugRegistry::new(
        Arc::new(PgSlugRepository::new(Arc::new(pool.clone()))),
        Arc::new(NullCache::new()),
        generator,
        policy,
    );

    match action {
        SlugAction::Create {
            primary,
            primary_count,
            secondary,
            secondary_count,
            yes,
        } => {
            let request = CreateSlug {
                primary_url: primary,
                secondary_url: secondary,
                primary_remaining: primary_count,
                secondary_remaining: secondary_count,
            };
            create_slug(&registry, request, yes).await?;
        }
        SlugAction::Show { slug } => {
            let record = registry
                .get(&slug)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load slug: {}", e))?;
            print_record(&record);
        }
    }

    Ok(())
}

/// Creates a slug after showing what will be stored.
///
/// Under the `replace` policy an existing record with the same slug is
/// overwritten and its counters reset, so the prompt defaults to No.
async fn create_slug(registry: &SlugRegistry, request: CreateSlug, skip_confirm: bool) -> Result<()> {
    println!("{}", "Create slug".bright_blue().bold());
    println!();

    let slug = registry.generator().generate(request.primary_url.trim());

    println!("  Slug:      {}", slug.bright_yellow().bold());
    println!("  Primary:   {} x{}", request.primary_url.cyan(), request.primary_remaining);
    if let Some(ref secondary) = request.secondary_url {
        println!("  Secondary: {} x{}", secondary.cyan(), request.secondary_remaining);
    }
    println!("  Policy:    {}", registry.duplicate_policy().to_string().bright_black());
    println!();

    if !skip_confirm {
        let replacing = registry.duplicate_policy() == DuplicatePolicy::Replace;
        let confirmed = Confirm::new()
            .with_prompt("Create this slug?")
            .default(!replacing)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let record = registry
        .create(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create slug: {}", e))?;

    println!();
    println!("{}", "Slug created successfully!".green().bold());
    println!();
    println!("  {} /r/{}", "Redirect path:".bright_white(), record.slug.bright_yellow());
    println!();

    Ok(())
}

/// Prints a record and which state its counters are in.
fn print_record(record: &SlugRecord) {
    let state = if record.primary_remaining > 0 {
        "SERVING PRIMARY".green()
    } else if !record.is_exhausted() {
        "SERVING SECONDARY".yellow()
    } else {
        "EXHAUSTED".bright_black()
    };

    println!("{}", format!("Slug {}", record.slug).bright_blue().bold());
    println!();
    println!(
        "  Primary:   {} ({} left)",
        record.primary_url.cyan(),
        record.primary_remaining
    );
    match record.secondary_url {
        Some(ref secondary) => println!(
            "  Secondary: {} ({} left)",
            secondary.cyan(),
            record.secondary_remaining
        ),
        None => println!("  Secondary: {}", "-".bright_black()),
    }
    println!("  State:     {}", state);
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Displays slug counts by state.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slugs")
        .fetch_one(pool)
        .await?;

    let exhausted: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM slugs WHERE primary_remaining = 0 \
         AND (secondary_remaining = 0 OR secondary_url IS NULL)",
    )
    .fetch_one(pool)
    .await?;

    let pending_serves: Option<i64> = sqlx::query_scalar(
        "SELECT SUM(primary_remaining)::BIGINT + SUM(secondary_remaining)::BIGINT FROM slugs",
    )
    .fetch_one(pool)
    .await?;

    println!("  Slugs:          {}", total.to_string().bright_green().bold());
    println!(
        "  Exhausted:      {}",
        exhausted.to_string().bright_green().bold()
    );
    println!(
        "  Pending serves: {}",
        pending_serves.unwrap_or(0).to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
