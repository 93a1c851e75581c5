use account_age::{
    age_estimator::estimate_profile, build_registry, response_formatter::render, AppConfig,
    FetchError, RawProfile,
};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "age-lookup",
    version = "0.1.0",
    about = "Estimate social media account creation dates"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate from profile signals without calling any provider
    Offline {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, default_value = "")]
        display_name: String,

        #[arg(short, long, default_value = "0")]
        followers: u64,
    },

    /// Look up accounts through a configured provider
    Fetch {
        /// Provider slug: twitter, instagram or tiktok
        #[arg(short, long)]
        provider: String,

        /// Number of concurrent lookups
        #[arg(short, long, default_value = "2")]
        concurrency: usize,

        /// Continue on error
        #[arg(long)]
        skip_errors: bool,

        usernames: Vec<String>,
    },
}

fn setup_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,age_lookup=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn offline(username: String, display_name: String, followers: u64) -> Result<()> {
    let profile = RawProfile {
        username,
        display_name,
        follower_count: followers,
        ..RawProfile::default()
    };
    let now = Utc::now();
    let estimate = estimate_profile(&profile, now);
    println!(
        "{}",
        serde_json::to_string_pretty(&render(&profile, &estimate, now))?
    );
    Ok(())
}

async fn fetch(
    provider: String,
    concurrency: usize,
    skip_errors: bool,
    usernames: Vec<String>,
) -> Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;
    let registry = build_registry(&config).context("Failed to build provider clients")?;
    let Some(provider) = registry.get(provider.as_str()).cloned() else {
        bail!(
            "Provider {} is not configured (available: {})",
            provider,
            config.configured_providers().join(", ")
        );
    };

    info!(
        "Looking up {} accounts on {} with concurrency {}",
        usernames.len(),
        provider.name(),
        concurrency
    );

    let pb = ProgressBar::new(usernames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut results = stream::iter(usernames)
        .map(|username| {
            let provider = provider.clone();
            async move {
                let result = account_age::username_validator::validate_username(&username)
                    .map(str::to_string);
                let result = match result {
                    Ok(name) => provider.fetch_profile(&name).await,
                    Err(e) => Err(e),
                };
                (username, result)
            }
        })
        .buffer_unordered(concurrency.max(1));

    let mut failures = 0usize;
    while let Some((username, result)) = results.next().await {
        pb.inc(1);
        match result {
            Ok(profile) => {
                let now = Utc::now();
                let estimate = estimate_profile(&profile, now);
                pb.println(serde_json::to_string(&render(&profile, &estimate, now))?);
            }
            Err(e) => {
                failures += 1;
                warn!("{}: {}", username, e);
                pb.println(error_line(&username, &e).to_string());
                if !skip_errors {
                    pb.abandon_with_message("stopped on error");
                    bail!("Lookup for {} failed: {}", username, e);
                }
            }
        }
    }

    pb.finish_with_message(format!("done, {failures} failed"));
    Ok(())
}

fn error_line(username: &str, e: &FetchError) -> serde_json::Value {
    json!({
        "username": username,
        "error": e.message(),
        "details": e.details(),
        "status": e.status_code().as_u16(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    match args.command {
        Command::Offline {
            username,
            display_name,
            followers,
        } => offline(username, display_name, followers),
        Command::Fetch {
            provider,
            concurrency,
            skip_errors,
            usernames,
        } => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;
            fetch(provider, concurrency, skip_errors, usernames).await
        }
    }
}
