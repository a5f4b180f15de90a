//! Print the context handed to the chat assistants.

use anyhow::{bail, Result};
use chrono::Utc;
use lustre_assistant::{render_admin_context, render_storefront_context, BusinessMetrics, MetricsOptions};

use super::InsightsArgs;
use crate::context::Context;

/// Run the insights command.
pub fn run(args: InsightsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog(args.catalog.as_deref())?;

    if args.storefront {
        let text = render_storefront_context(&products);
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "context": text }));
        } else {
            println!("{}", text);
        }
        return Ok(());
    }

    let Some(orders_path) = args.orders.as_deref() else {
        bail!("No orders given. Pass --orders, or --storefront for the catalog summary.");
    };
    let orders = ctx.load_orders(orders_path)?;
    ctx.output
        .debug(&format!("Loaded {} orders from {}", orders.len(), orders_path));

    let options = MetricsOptions {
        top_products: ctx.config.assistant.top_products,
        currency: ctx.currency()?,
        ..MetricsOptions::default()
    };
    let metrics = BusinessMetrics::aggregate_with(&products, &orders, Utc::now(), &options);

    if ctx.output.is_json() {
        ctx.output.json(&metrics);
    } else {
        println!("{}", render_admin_context(&metrics));
    }
    Ok(())
}
