use anyhow::Context;
use clap::Parser;
use doc_image_hook::server::shutdown_signal;
use doc_image_hook::utils::{logger, validation::Validate};
use doc_image_hook::{build_router, AppState, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("🚀 Starting doc-image-hook");
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if cli.check {
        println!("✅ Configuration is valid");
        return Ok(());
    }

    let inserter = config
        .build_inserter()
        .context("failed to build document store clients")?;
    let state = AppState::new(inserter, config.inbound_token());
    if state.inbound_token.is_none() {
        tracing::warn!("⚠️ No inbound token configured; webhook routes are unauthenticated");
    }

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("👂 Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
