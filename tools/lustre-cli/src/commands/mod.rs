//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod config;
pub mod facets;
pub mod insights;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Minimum price, in whole units.
    #[arg(long)]
    pub min: Option<i64>,

    /// Maximum price, in whole units.
    #[arg(long)]
    pub max: Option<i64>,

    /// Material to include (repeatable).
    #[arg(short, long = "material")]
    pub materials: Vec<String>,

    /// Style to include (repeatable).
    #[arg(short, long = "style")]
    pub styles: Vec<String>,

    /// Sort order: featured, price-low-high, price-high-low, newest, best-selling.
    #[arg(long, default_value = "featured")]
    pub sort: String,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page (default: catalog.page_size from config).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart lines and the subtotal.
    List,
    /// Add a product from the catalog.
    Add {
        /// Product ID.
        id: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Selected size.
        #[arg(long)]
        size: Option<String>,

        /// Selected colour or metal.
        #[arg(long)]
        color: Option<String>,

        /// Catalog JSON file (default: catalog.path from config).
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Change a line's quantity (0 removes it).
    Update {
        /// Product ID.
        id: String,

        /// New quantity.
        quantity: u32,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        id: String,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlisted products.
    List,
    /// Add a product if absent, remove it if present.
    Toggle {
        /// Product ID.
        id: String,

        /// Catalog JSON file (default: catalog.path from config).
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Empty the wishlist.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the insights command.
#[derive(Args)]
pub struct InsightsArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Orders JSON file. Required unless `--storefront` is given.
    #[arg(long)]
    pub orders: Option<String>,

    /// Print the storefront assistant context instead.
    #[arg(long)]
    pub storefront: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
