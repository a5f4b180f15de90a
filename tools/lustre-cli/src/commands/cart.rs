//! Cart management commands.

use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use lustre_commerce::cart::{LineItem, LineKey};
use lustre_commerce::catalog::Product;
use lustre_commerce::ProductId;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::List => list(ctx),
        CartCommand::Add {
            id,
            quantity,
            size,
            color,
            catalog,
        } => add(&id, quantity, size.as_deref(), color.as_deref(), catalog.as_deref(), ctx),
        CartCommand::Update {
            id,
            quantity,
            size,
            color,
        } => update(&line_key(&id, size, color), quantity, ctx),
        CartCommand::Remove { id, size, color } => remove(&line_key(&id, size, color), ctx),
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

fn line_key(id: &str, size: Option<String>, color: Option<String>) -> LineKey {
    LineKey::new(id).with_selection(size.as_deref(), color.as_deref())
}

/// Find a product by id in the catalog.
pub(crate) fn find_product<'a>(products: &'a [Product], id: &str) -> Result<&'a Product> {
    let id = ProductId::new(id);
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow!("Product not found in catalog: {}", id))
}

fn selection_label(item: &LineItem) -> String {
    let parts: Vec<&str> = [item.selected_size.as_deref(), item.selected_color.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    parts.join(" / ")
}

fn list(ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    let items = cart.items()?;
    let subtotal = cart.subtotal()?;
    let count = cart.item_count()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": items,
            "itemCount": count,
            "subtotal": subtotal.to_decimal(),
        }));
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", count));
    let widths = [10, 28, 14, 5, 10];
    ctx.output
        .table_row(&["ID", "Name", "Options", "Qty", "Price"], &widths);
    for item in &items {
        let options = selection_label(item);
        let quantity = item.quantity.to_string();
        let price = item.price.display();
        ctx.output.table_row(
            &[
                item.id.as_str(),
                item.name.as_str(),
                options.as_str(),
                quantity.as_str(),
                price.as_str(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Subtotal", &subtotal.display());

    Ok(())
}

fn add(
    id: &str,
    quantity: u32,
    size: Option<&str>,
    color: Option<&str>,
    catalog: Option<&str>,
    ctx: &Context,
) -> Result<()> {
    let products = ctx.load_catalog(catalog)?;
    let product = find_product(&products, id)?;
    let item = LineItem::from_product(product, quantity, size, color);
    let price = item.price;

    let line_quantity = ctx.cart()?.add_item(item)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "quantity": line_quantity }));
        return Ok(());
    }
    ctx.output.success(&format!(
        "Added {} x {} at {} ({} in cart)",
        quantity,
        product.name,
        price.display(),
        line_quantity
    ));
    Ok(())
}

fn update(key: &LineKey, quantity: u32, ctx: &Context) -> Result<()> {
    if ctx.cart()?.update_quantity(key, quantity)? {
        ctx.output
            .success(&format!("Set {} quantity to {}", key.id, quantity));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", key.id));
    }
    Ok(())
}

fn remove(key: &LineKey, ctx: &Context) -> Result<()> {
    if ctx.cart()?.remove_item(key)? {
        ctx.output.success(&format!("Removed {}", key.id));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", key.id));
    }
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    ctx.cart()?.clear()?;
    ctx.output.success("Cart cleared");
    Ok(())
}
