//! CLI configuration.

use anyhow::{Context, Result};
use lustre_commerce::Currency;
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["lustre.toml", ".lustre.toml", "lustre.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Local cart and wishlist storage.
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Assistant context settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; `path` decides between JSON and TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// The configured currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown currency: {}", self.catalog.currency))
    }
}

/// Catalog browsing defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON used when `--catalog` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Products per page (default: 12).
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound of the initial price range, in whole units (default: 5000).
    #[serde(default = "default_max_price")]
    pub max_price: i64,

    /// ISO currency code (default: USD).
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_page_size() -> usize {
    lustre_commerce::search::DEFAULT_PAGE_SIZE
}

fn default_max_price() -> i64 {
    lustre_commerce::search::DEFAULT_MAX_PRICE
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: default_page_size(),
            max_price: default_max_price(),
            currency: default_currency(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Path of the JSON file holding the cart and wishlist.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".lustre/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: warn).
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    /// Products ranked in the admin context (default: 5).
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_top_products() -> usize {
    lustre_assistant::metrics::DEFAULT_TOP_PRODUCTS
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            top_products: default_top_products(),
        }
    }
}

/// Generate a default lustre.toml config file.
pub fn generate_default_config() -> String {
    r#"# Lustre storefront CLI configuration

[catalog]
# path = "data/products.json"
page_size = 12
max_price = 5000
currency = "USD"

[storage]
path = ".lustre/storage.json"

[logging]
level = "warn"

[assistant]
top_products = 5
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CliConfig::parse("lustre.toml", "").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.max_price, 5000);
        assert_eq!(config.storage.path, ".lustre/storage.json");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse("lustre.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::parse(
            "lustre.toml",
            "[catalog]\npage_size = 24\ncurrency = \"eur\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.max_price, 5000);
        assert_eq!(config.currency().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_json_config() {
        let config =
            CliConfig::parse("lustre.json", r#"{"logging": {"level": "debug"}}"#).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = CliConfig::default();
        config.catalog.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lustre.toml");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.catalog.path = Some("products.json".to_string());
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }
}
