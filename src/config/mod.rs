pub mod toml_config;

pub use toml_config::ServiceConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "doc-image-hook")]
#[command(about = "Webhook that fetches an image and appends it to a document")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "hook.toml")]
    pub config: String,

    /// Override server.bind from the config file
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file and applies command line overrides.
    pub fn load(&self) -> crate::utils::error::Result<ServiceConfig> {
        let mut config = ServiceConfig::from_file(&self.config)?;
        if let Some(bind) = &self.bind {
            tracing::info!("🔧 Bind address overridden to: {}", bind);
            config.server.bind = bind.clone();
        }
        Ok(config)
    }
}
