//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use lustre_cache::{Cache, FileStore};
use lustre_commerce::cart::{CartStore, WishlistStore};
use lustre_commerce::catalog::{parse_catalog, Product};
use lustre_commerce::orders::{parse_orders, Order};
use lustre_commerce::search::{FilterState, PriceRange};
use lustre_commerce::Currency;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    let config = path
                        .to_str()
                        .map(CliConfig::load)
                        .transpose()?
                        .unwrap_or_default();
                    (config, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "config loaded"),
            None => tracing::debug!("no config file found; using defaults"),
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Filter state the catalog starts from and resets to.
    pub fn default_filters(&self) -> Result<FilterState> {
        let range = PriceRange::up_to(self.config.catalog.max_price, self.currency()?);
        Ok(FilterState::with_price_range(range))
    }

    /// Load the catalog from `path`, or from `catalog.path` in config.
    pub fn load_catalog(&self, path: Option<&str>) -> Result<Vec<Product>> {
        let Some(path) = path.or(self.config.catalog.path.as_deref()) else {
            bail!("No catalog given. Pass --catalog or set catalog.path in lustre.toml.");
        };
        let path = self.resolve_path(path);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let products = parse_catalog(&json, self.currency()?)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        self.output
            .debug(&format!("Loaded {} products from {}", products.len(), path.display()));
        Ok(products)
    }

    pub fn load_orders(&self, path: &str) -> Result<Vec<Order>> {
        let path = self.resolve_path(path);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read orders: {}", path.display()))?;
        parse_orders(&json).with_context(|| format!("Failed to parse orders: {}", path.display()))
    }

    /// Storage file for the cart and wishlist.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    pub fn open_cache(&self) -> Result<Arc<Cache<FileStore>>> {
        let path = self.storage_path();
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;
        Ok(Arc::new(Cache::new(store)))
    }

    pub fn cart(&self) -> Result<CartStore<FileStore>> {
        Ok(CartStore::with_currency(self.open_cache()?, self.currency()?))
    }

    pub fn wishlist(&self) -> Result<WishlistStore<FileStore>> {
        Ok(WishlistStore::new(self.open_cache()?))
    }
}

/// Find the nearest config file from `start` upward.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lustre.toml"), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_file(&nested), Some(dir.path().join("lustre.toml")));
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lustre.json"), "{}").unwrap();
        std::fs::write(dir.path().join("lustre.toml"), "").unwrap();

        assert_eq!(find_config_file(dir.path()), Some(dir.path().join("lustre.toml")));
    }
}
