//! Browse the catalog with filters, sorting and pagination.

use anyhow::Result;
use lustre_commerce::catalog::Product;
use lustre_commerce::search::{CatalogView, FilterState, ProductPage, SortOption};
use lustre_commerce::Money;
use serde::Serialize;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::PRODUCT_WIDTHS;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing<'a> {
    state: &'a FilterState,
    #[serde(flatten)]
    page: &'a ProductPage<&'a Product>,
}

/// Run the browse command.
pub fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog(args.catalog.as_deref())?;
    let sort: SortOption = args.sort.parse()?;
    let page_size = args.page_size.unwrap_or(ctx.config.catalog.page_size);
    let currency = ctx.currency()?;

    let mut view = CatalogView::with_defaults(products, ctx.default_filters()?, page_size);

    if args.min.is_some() || args.max.is_some() {
        let current = view.state().price_range;
        let min = args
            .min
            .map(|units| Money::from_units(units, currency))
            .unwrap_or(current.min());
        let max = args
            .max
            .map(|units| Money::from_units(units, currency))
            .unwrap_or(current.max());
        view.set_price_range(min, max);
    }
    for material in &args.materials {
        if !view.state().selected_materials.contains(material) {
            view.toggle_material(material);
        }
    }
    for style in &args.styles {
        if !view.state().selected_styles.contains(style) {
            view.toggle_style(style);
        }
    }
    view.set_sort(sort);
    view.set_page(args.page);

    let page = view.page();
    let pagination = page.pagination;

    if ctx.output.is_json() {
        ctx.output.json(&Listing {
            state: view.state(),
            page: &page,
        });
        return Ok(());
    }

    if view.visible_len() == 0 {
        ctx.output.warn("No products found");
        if view.is_filtered() {
            ctx.output.info("Try widening the price range or clearing filters.");
        }
        return Ok(());
    }

    ctx.output.header(&format!(
        "Showing {}-{} of {} products ({})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        sort.display_name()
    ));

    if page.is_empty() {
        ctx.output.warn(&format!(
            "Page {} is past the last page ({})",
            pagination.page, pagination.total_pages
        ));
        return Ok(());
    }

    ctx.output.table_row(
        &["ID", "Name", "Price", "Material", ""],
        &PRODUCT_WIDTHS,
    );
    for product in &page.items {
        ctx.output.product_row(product);
    }

    if pagination.total_pages > 1 {
        let pages: Vec<String> = pagination
            .page_numbers(7)
            .into_iter()
            .map(|n| {
                if n == pagination.page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.info("");
        ctx.output.info(&format!("Pages: {}", pages.join(" ")));
    }

    Ok(())
}
