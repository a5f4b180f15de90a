//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use lustre_commerce::Currency;
use tracing_subscriber::EnvFilter;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    if let Some(ref path) = catalog.path {
        ctx.output.kv("path", path);
    }
    ctx.output.kv("page_size", &catalog.page_size.to_string());
    ctx.output.kv("max_price", &catalog.max_price.to_string());
    ctx.output.kv("currency", &catalog.currency);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);

    ctx.output.info("");
    ctx.output.info("[assistant]");
    ctx.output
        .kv("top_products", &ctx.config.assistant.top_products.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx
        .config_path
        .clone()
        .or_else(|| find_config_file(&ctx.cwd))
    else {
        bail!("No config file found. Run `lustre config init` to create one.");
    };
    let path = path_str(&config_path)?;

    let mut config = CliConfig::load(path)?;
    set_config_value(&mut config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("lustre.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Errors and warnings for a loaded config.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.catalog.page_size == 0 {
        errors.push("catalog.page_size must be at least 1".to_string());
    }
    if config.catalog.max_price < 0 {
        errors.push("catalog.max_price must not be negative".to_string());
    }
    if Currency::from_code(&config.catalog.currency).is_none() {
        errors.push(format!(
            "catalog.currency '{}' is not a supported currency",
            config.catalog.currency
        ));
    }
    if config.catalog.path.is_none() {
        warnings.push("catalog.path is unset; commands will need --catalog".to_string());
    }
    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(format!(
            "logging.level '{}' is not a valid filter directive",
            config.logging.level
        ));
    }
    if config.assistant.top_products == 0 {
        warnings.push("assistant.top_products is 0; no products will be ranked".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    let value = match parts.as_slice() {
        ["catalog", "path"] => config
            .catalog
            .path
            .clone()
            .unwrap_or_else(|| "null".to_string()),
        ["catalog", "page_size"] => config.catalog.page_size.to_string(),
        ["catalog", "max_price"] => config.catalog.max_price.to_string(),
        ["catalog", "currency"] => config.catalog.currency.clone(),
        ["storage", "path"] => config.storage.path.clone(),
        ["logging", "level"] => config.logging.level.clone(),
        ["assistant", "top_products"] => config.assistant.top_products.to_string(),
        _ => bail!("Unknown config key: {}", key),
    };
    Ok(value)
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => config.catalog.path = Some(value.to_string()),
        ["catalog", "page_size"] => config.catalog.page_size = value.parse()?,
        ["catalog", "max_price"] => config.catalog.max_price = value.parse()?,
        ["catalog", "currency"] => {
            let Some(currency) = Currency::from_code(value) else {
                bail!("Unknown currency: {}", value);
            };
            config.catalog.currency = currency.code().to_string();
        }
        ["storage", "path"] => config.storage.path = value.to_string(),
        ["logging", "level"] => config.logging.level = value.to_string(),
        ["assistant", "top_products"] => config.assistant.top_products = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))
}
