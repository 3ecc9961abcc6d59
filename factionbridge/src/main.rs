//! # factionbridge-probe
//!
//! Reports which known faction plugin the bridge would bind on this server.
//!
//! The probe reads the bridge configuration, scans the configured plugins
//! folder and matches every known provider against it without constructing
//! any adapter. The diagnostic report is printed to stdout as JSON; logs go
//! to stderr.
//!
//! ## Running
//!
//! ```bash
//! # Use $XDG_CONFIG_HOME/factionbridge/config.toml
//! cargo run --bin factionbridge-probe
//!
//! # Explicit config file, with debug logging
//! RUST_LOG=debug cargo run --bin factionbridge-probe -- ./config.toml
//! ```

use anyhow::{Context, Result};
use factionbridge::catalog::KNOWN_PROVIDERS;
use factionbridge::config::BridgeConfig;
use factionbridge::resolver::Resolver;
use factionbridge_plugins::ScannedDirectory;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config_arg = std::env::args().nth(1);

    let (config, config_error) = match &config_arg {
        Some(path) => (BridgeConfig::load(path)?, None),
        None => match BridgeConfig::load_default() {
            Ok(cfg) => (cfg, None),
            Err(e) => (BridgeConfig::default(), Some(e)),
        },
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("Starting factionbridge-probe v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!("Failed to load configuration: {:#}", e);
        info!("Using default configuration");
    }

    let plugins_dir = config.plugins_dir()?;
    let directory = ScannedDirectory::scan(&plugins_dir)
        .with_context(|| format!("Failed to scan plugins directory: {}", plugins_dir.display()))?;

    let identities: Vec<_> = KNOWN_PROVIDERS.iter().map(|known| known.identity()).collect();
    let identification = Resolver::identify(
        &identities,
        &directory,
        config.bridge.forced_provider.as_deref(),
    );
    info!("{}", identification.report.summary());

    let json = identification
        .report
        .to_json_pretty()
        .context("Failed to serialise diagnostic report")?;
    println!("{}", json);

    Ok(())
}
