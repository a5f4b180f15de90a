//! Lustre CLI - browse a jewelry catalog and manage a local cart.
//!
//! Commands:
//! - `lustre browse` - Filter, sort and page through the catalog
//! - `lustre facets` - Show filter options for the catalog
//! - `lustre cart` - Manage the cart
//! - `lustre wishlist` - Manage the wishlist
//! - `lustre insights` - Print assistant context from catalog and orders
//! - `lustre config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use commands::{BrowseArgs, CartArgs, ConfigArgs, FacetsArgs, InsightsArgs, WishlistArgs};

/// Lustre CLI - Browse a jewelry storefront catalog from the terminal
#[derive(Parser)]
#[command(name = "lustre")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and page through the catalog
    Browse(BrowseArgs),

    /// Show material, category and price filters
    Facets(FacetsArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Print the assistant context for the store
    Insights(InsightsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the log sink before anything else runs.
///
/// `--verbose` and `RUST_LOG` are final. Otherwise the filter starts at
/// `warn` and the returned handle swaps in `[logging] level` once the config
/// is loaded.
fn init_tracing(verbose: bool) -> Option<FilterHandle> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, fixed) = startup_filter(verbose, rust_log.as_deref());
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    (!fixed).then_some(handle)
}

/// The filter in force before the config is read, and whether it is final.
fn startup_filter(verbose: bool, rust_log: Option<&str>) -> (EnvFilter, bool) {
    if verbose {
        return (EnvFilter::new("debug"), true);
    }
    match rust_log.filter(|v| !v.trim().is_empty()).map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, true),
        _ => (EnvFilter::new("warn"), false),
    }
}

fn apply_config_level(handle: &FilterHandle, level: &str) {
    let filter = match EnvFilter::try_new(level) {
        Ok(filter) => filter,
        Err(e) => {
            tracing::warn!(level, error = %e, "invalid logging.level; keeping warn");
            return;
        }
    };
    if let Err(e) = handle.reload(filter) {
        tracing::warn!(error = %e, "could not apply logging.level");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter_handle = init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    if let Some(handle) = &filter_handle {
        apply_config_level(handle, &ctx.config.logging.level);
    }

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx),
        Commands::Facets(args) => commands::facets::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx),
        Commands::Insights(args) => commands::insights::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_filter() {
        let (filter, fixed) = startup_filter(true, Some("info"));
        assert!(fixed);
        assert_eq!(filter.to_string(), "debug");

        let (filter, fixed) = startup_filter(false, Some("lustre_commerce=trace"));
        assert!(fixed);
        assert_eq!(filter.to_string(), "lustre_commerce=trace");

        assert!(!startup_filter(false, None).1);
        assert!(!startup_filter(false, Some("")).1);
        assert!(!startup_filter(false, Some("lustre=loud")).1);
    }

    #[test]
    fn test_config_level_replaces_startup_filter() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("warn"));
        let _subscriber = tracing_subscriber::registry().with(layer);

        apply_config_level(&handle, "lustre=loud");
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "warn");

        apply_config_level(&handle, "debug");
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "debug");
    }
}
