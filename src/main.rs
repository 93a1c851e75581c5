use account_age::{
    age_handler::{router, AppState},
    bot_verification::TurnstileVerifier,
    build_registry, AppConfig,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    // Load environment variables
    dotenv::dotenv().ok();

    // Check if we should enable tokio-console
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        console_subscriber::init();
        info!("tokio-console enabled on port 6669");
    } else {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,account_age=debug"));
        fmt().with_env_filter(env_filter).with_target(true).init();
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let providers = build_registry(&config).context("Failed to build provider clients")?;
    let mut state = AppState::new(providers);

    if let Some(secret) = &config.turnstile_secret {
        let verifier =
            TurnstileVerifier::new(secret.clone()).context("Failed to build CAPTCHA client")?;
        state = state.with_bot_verifier(Arc::new(verifier));
        info!("CAPTCHA verification enabled");
    } else {
        warn!("TURNSTILE_SECRET_KEY not set, CAPTCHA verification disabled");
    }

    let endpoints = state.endpoints();
    let app = router(state);

    println!("\nAccount age estimator starting");
    println!("HTTP: http://{}", config.bind_addr);
    println!("\nEndpoints:");
    println!("- GET /health");
    for endpoint in &endpoints {
        println!("- GET|POST {endpoint}");
    }
    println!("\nConfiguration:");
    println!("- Providers: {}", config.configured_providers().join(", "));
    println!(
        "- Provider spacing: {}ms",
        config.provider_min_interval.as_millis()
    );
    println!("- Provider timeout: {}s", config.provider_timeout.as_secs());

    // Handle shutdown signal
    let cancellation_token = CancellationToken::new();
    let shutdown_token = cancellation_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, stopping server..."),
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
        shutdown_token.cancel();
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancellation_token.cancelled().await })
        .await?;

    info!("Clean shutdown complete");

    Ok(())
}
