//! Wishlist commands.

use anyhow::Result;
use dialoguer::Confirm;
use lustre_commerce::cart::LineItem;
use serde_json::json;

use super::cart::find_product;
use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command {
        WishlistCommand::List => list(ctx),
        WishlistCommand::Toggle { id, catalog } => toggle(&id, catalog.as_deref(), ctx),
        WishlistCommand::Clear { yes } => clear(yes, ctx),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let items = ctx.wishlist()?.items()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "items": items, "count": items.len() }));
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info("Your wishlist is empty");
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", items.len()));
    let widths = [10, 28, 10];
    ctx.output.table_row(&["ID", "Name", "Price"], &widths);
    for item in &items {
        let price = item.price.display();
        ctx.output.table_row(
            &[item.id.as_str(), item.name.as_str(), price.as_str()],
            &widths,
        );
    }
    Ok(())
}

fn toggle(id: &str, catalog: Option<&str>, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog(catalog)?;
    let product = find_product(&products, id)?;
    let listed = ctx
        .wishlist()?
        .toggle(LineItem::from_product(product, 1, None, None))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "wishlisted": listed }));
    } else if listed {
        ctx.output
            .success(&format!("Added {} to the wishlist", product.name));
    } else {
        ctx.output
            .success(&format!("Removed {} from the wishlist", product.name));
    }
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every product from the wishlist?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Wishlist left unchanged");
            return Ok(());
        }
    }

    ctx.wishlist()?.clear()?;
    ctx.output.success("Wishlist cleared");
    Ok(())
}
