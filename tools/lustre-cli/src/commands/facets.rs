//! Show the filter sidebar for a catalog.

use anyhow::Result;
use lustre_commerce::search::{CatalogFacets, Facet, SortOption};

use super::FacetsArgs;
use crate::context::Context;

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog(args.catalog.as_deref())?;
    let facets = CatalogFacets::from_products(&products, &ctx.default_filters()?);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header(&format!("Filters for {} products", products.len()));

    if let (Some(min), Some(max)) = (facets.min_price, facets.max_price) {
        ctx.output.info("");
        ctx.output.info("Price");
        ctx.output.kv("range", &format!("{} - {}", min, max));
    }

    print_facet(&facets.materials, ctx);
    print_facet(&facets.categories, ctx);

    ctx.output.info("");
    ctx.output.info("Sort by");
    for option in SortOption::ALL {
        ctx.output
            .list_item(&format!("{} ({})", option.display_name(), option.as_str()));
    }

    Ok(())
}

fn print_facet(facet: &Facet, ctx: &Context) {
    ctx.output.info("");
    ctx.output.info(&facet.name);
    if facet.values.is_empty() {
        ctx.output.list_item("none");
        return;
    }
    for value in &facet.values {
        ctx.output
            .list_item(&format!("{} ({})", value.value, value.count));
    }
}
