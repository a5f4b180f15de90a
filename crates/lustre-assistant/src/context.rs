//! Plain-text context blocks handed to the completion service.

use lustre_commerce::catalog::Product;

use crate::metrics::BusinessMetrics;

/// Products listed by name in the storefront context.
const STOREFRONT_LISTED_PRODUCTS: usize = 10;

/// Render metrics as the admin assistant's context block.
pub fn render_admin_context(metrics: &BusinessMetrics) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Business snapshot as of {}\n",
        metrics.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    let orders = &metrics.orders;
    out.push_str("\nOrders:\n");
    out.push_str(&format!("- Total orders: {}\n", orders.count));
    out.push_str(&format!("- Revenue (excluding cancelled): {}\n", orders.revenue));
    out.push_str(&format!("- Average order value: {}\n", orders.average_order_value));
    if !orders.by_status.is_empty() {
        let statuses: Vec<String> = orders
            .by_status
            .iter()
            .map(|(status, n)| format!("{} {}", status.display_name(), n))
            .collect();
        out.push_str(&format!("- By status: {}\n", statuses.join(", ")));
    }

    let recent = &metrics.recent;
    out.push_str(&format!(
        "- Last {} days: {} orders, {} revenue\n",
        recent.days, recent.orders, recent.revenue
    ));

    out.push_str("\nTop products by units sold:\n");
    if metrics.top_products.is_empty() {
        out.push_str("- No sales yet\n");
    }
    for (rank, sales) in metrics.top_products.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({} units, {})\n",
            rank + 1,
            sales.name,
            sales.units,
            sales.revenue
        ));
    }

    let catalog = &metrics.catalog;
    out.push_str("\nCatalog:\n");
    out.push_str(&format!("- Products: {}\n", catalog.product_count));
    if !catalog.by_category.is_empty() {
        let categories: Vec<String> = catalog
            .by_category
            .iter()
            .map(|(name, n)| format!("{name} {n}"))
            .collect();
        out.push_str(&format!("- By category: {}\n", categories.join(", ")));
    }
    out.push_str(&format!("- New arrivals: {}\n", catalog.new_arrivals));
    out.push_str(&format!("- Discounted: {}\n", catalog.discounted));
    match catalog.average_rating {
        Some(rating) => out.push_str(&format!("- Average rating: {rating:.1} / 5\n")),
        None => out.push_str("- Average rating: no ratings\n"),
    }

    out.push_str("\nCustomers:\n");
    out.push_str(&format!("- Distinct customers: {}\n", metrics.customers.distinct));
    out.push_str(&format!("- Repeat customers: {}\n", metrics.customers.repeat));

    out
}

/// Render a short catalog summary for the customer-facing assistant.
pub fn render_storefront_context(products: &[Product]) -> String {
    if products.is_empty() {
        return "The catalog is currently empty.\n".to_string();
    }

    let mut out = format!("The store lists {} products.\n", products.len());

    let prices = products.iter().map(Product::display_price);
    if let (Some(min), Some(max)) = (
        prices.clone().min_by_key(|p| p.amount_cents),
        prices.max_by_key(|p| p.amount_cents),
    ) {
        out.push_str(&format!("Prices range from {min} to {max}.\n"));
    }

    let new_arrivals: Vec<&str> = products
        .iter()
        .filter(|p| p.is_new)
        .map(|p| p.name.as_str())
        .collect();
    if !new_arrivals.is_empty() {
        out.push_str(&format!("New arrivals: {}.\n", new_arrivals.join(", ")));
    }

    out.push_str("Products:\n");
    for product in products.iter().take(STOREFRONT_LISTED_PRODUCTS) {
        let mut line = format!("- {}", product.name);
        if !product.category.is_empty() {
            line.push_str(&format!(" ({})", product.category));
        }
        line.push_str(&format!(": {}", product.display_price()));
        if let Some(material) = product.material() {
            line.push_str(&format!(", {material}"));
        }
        out.push_str(&line);
        out.push('\n');
    }
    if products.len() > STOREFRONT_LISTED_PRODUCTS {
        out.push_str(&format!(
            "...and {} more.\n",
            products.len() - STOREFRONT_LISTED_PRODUCTS
        ));
    }

    out
}
