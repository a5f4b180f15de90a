//! Business metrics aggregated for the admin assistant.
//!
//! Aggregation runs in independent stages over the order and product lists:
//! order totals, the recent window, product ranking, the catalog summary and
//! customers. Each stage is a plain function so it can be tested alone.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use lustre_commerce::catalog::Product;
use lustre_commerce::orders::{Order, OrderStatus};
use lustre_commerce::{Currency, Money, ProductId};
use serde::Serialize;

/// Default number of ranked products.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Default length of the recent window, in days.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// Aggregation knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsOptions {
    pub top_products: usize,
    pub recent_days: i64,
    /// Currency every amount is reported in.
    pub currency: Currency,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            top_products: DEFAULT_TOP_PRODUCTS,
            recent_days: DEFAULT_RECENT_DAYS,
            currency: Currency::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub count: usize,
    pub by_status: BTreeMap<OrderStatus, usize>,
    /// Sum over orders that are not cancelled.
    pub revenue: Money,
    pub average_order_value: Money,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentWindow {
    pub days: i64,
    pub orders: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub units: u64,
    pub revenue: Money,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub product_count: usize,
    pub by_category: BTreeMap<String, usize>,
    pub new_arrivals: usize,
    pub discounted: usize,
    /// Mean over rated products. `None` when nothing is rated.
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Distinct emails, compared case-insensitively.
    pub distinct: usize,
    /// Customers with more than one order.
    pub repeat: usize,
}

/// Everything the admin assistant is told about the business.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    pub generated_at: DateTime<Utc>,
    pub currency: Currency,
    pub orders: OrderTotals,
    pub recent: RecentWindow,
    pub top_products: Vec<ProductSales>,
    pub catalog: CatalogSummary,
    pub customers: CustomerSummary,
}

impl BusinessMetrics {
    /// Aggregate with default options.
    pub fn aggregate(products: &[Product], orders: &[Order], now: DateTime<Utc>) -> Self {
        Self::aggregate_with(products, orders, now, &MetricsOptions::default())
    }

    pub fn aggregate_with(
        products: &[Product],
        orders: &[Order],
        now: DateTime<Utc>,
        options: &MetricsOptions,
    ) -> Self {
        let currency = options.currency;
        let metrics = Self {
            generated_at: now,
            currency,
            orders: order_totals(orders, currency),
            recent: recent_window(orders, now, options.recent_days, currency),
            top_products: top_products(products, orders, options.top_products, currency),
            catalog: catalog_summary(products),
            customers: customer_summary(orders),
        };
        tracing::debug!(
            orders = metrics.orders.count,
            products = metrics.catalog.product_count,
            "business metrics aggregated"
        );
        metrics
    }
}

fn revenue_cents<'a>(orders: impl Iterator<Item = &'a Order>) -> i64 {
    orders
        .filter(|o| o.status.is_revenue())
        .fold(0i64, |acc, o| acc.saturating_add(o.effective_total().amount_cents))
}

pub fn order_totals(orders: &[Order], currency: Currency) -> OrderTotals {
    let mut by_status = BTreeMap::new();
    for order in orders {
        *by_status.entry(order.status).or_insert(0) += 1;
    }

    let revenue = revenue_cents(orders.iter());
    let counted = orders.iter().filter(|o| o.status.is_revenue()).count();
    let average = if counted == 0 {
        0
    } else {
        revenue / counted as i64
    };

    OrderTotals {
        count: orders.len(),
        by_status,
        revenue: Money::new(revenue, currency),
        average_order_value: Money::new(average, currency),
    }
}

/// Orders placed within `days` before `now`.
pub fn recent_window(
    orders: &[Order],
    now: DateTime<Utc>,
    days: i64,
    currency: Currency,
) -> RecentWindow {
    // A window reaching past the earliest representable time covers every order.
    let since = Duration::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent: Vec<&Order> = orders
        .iter()
        .filter(|o| o.created_at >= since && o.created_at <= now)
        .collect();

    RecentWindow {
        days,
        orders: recent.len(),
        revenue: Money::new(revenue_cents(recent.into_iter()), currency),
    }
}

/// Best sellers by units, ties by revenue, then name.
///
/// Names come from the catalog when the product is still listed, otherwise
/// from the order line.
pub fn top_products(
    products: &[Product],
    orders: &[Order],
    limit: usize,
    currency: Currency,
) -> Vec<ProductSales> {
    let mut sales: HashMap<&ProductId, ProductSales> = HashMap::new();

    for item in orders
        .iter()
        .filter(|o| o.status.is_revenue())
        .flat_map(|o| o.items.iter())
    {
        let entry = sales.entry(&item.product_id).or_insert_with(|| ProductSales {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            units: 0,
            revenue: Money::zero(currency),
        });
        entry.units = entry.units.saturating_add(u64::from(item.quantity));
        entry.revenue.amount_cents = entry
            .revenue
            .amount_cents
            .saturating_add(item.line_total().amount_cents);
    }

    let mut ranked: Vec<ProductSales> = sales
        .into_values()
        .map(|mut s| {
            if let Some(product) = products.iter().find(|p| p.id == s.product_id) {
                s.name = product.name.clone();
            }
            s
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.units
            .cmp(&a.units)
            .then_with(|| b.revenue.amount_cents.cmp(&a.revenue.amount_cents))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

pub fn catalog_summary(products: &[Product]) -> CatalogSummary {
    let mut by_category = BTreeMap::new();
    for product in products {
        let category = if product.category.is_empty() {
            "Uncategorized".to_string()
        } else {
            product.category.clone()
        };
        *by_category.entry(category).or_insert(0) += 1;
    }

    let rated: Vec<f64> = products
        .iter()
        .filter(|p| p.rating > 0)
        .map(|p| f64::from(p.rating))
        .collect();
    let average_rating = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    CatalogSummary {
        product_count: products.len(),
        by_category,
        new_arrivals: products.iter().filter(|p| p.is_new).count(),
        discounted: products.iter().filter(|p| p.has_discount()).count(),
        average_rating,
    }
}

pub fn customer_summary(orders: &[Order]) -> CustomerSummary {
    let mut per_customer: HashMap<String, usize> = HashMap::new();
    for order in orders {
        let email = order.customer.email.trim().to_lowercase();
        if !email.is_empty() {
            *per_customer.entry(email).or_insert(0) += 1;
        }
    }

    CustomerSummary {
        distinct: per_customer.len(),
        repeat: per_customer.values().filter(|&&n| n > 1).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lustre_commerce::orders::parse_orders;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    fn usd(units: i64) -> Money {
        Money::from_units(units, Currency::USD)
    }

    fn products() -> Vec<Product> {
        let mut ring = Product::new(1u64, "Solitaire Ring", usd(300));
        ring.category = "Rings".to_string();
        ring.rating = 5;
        ring.is_new = true;
        let mut studs = Product::new(2u64, "Stud Earrings", usd(80));
        studs.category = "Earrings".to_string();
        studs.rating = 4;
        studs.discount = 10;
        let band = Product::new(3u64, "Plain Band", usd(120));
        vec![ring, studs, band]
    }

    fn orders() -> Vec<Order> {
        parse_orders(
            r#"[
            {"id": "o1", "customer": {"name": "Ana", "email": "Ana@Example.com"},
             "items": [{"productId": 1, "name": "Ring", "price": 300, "quantity": 1},
                       {"productId": 2, "name": "Studs", "price": 80, "quantity": 2}],
             "total": 460, "status": "delivered", "createdAt": "2026-10-01T09:00:00Z"},
            {"id": "o2", "customer": {"name": "Ana", "email": "ana@example.com "},
             "items": [{"productId": 2, "name": "Studs", "price": 80, "quantity": 1}],
             "total": 80, "status": "shipped", "createdAt": "2026-08-01T09:00:00Z"},
            {"id": "o3", "customer": {"name": "Bo", "email": "bo@example.com"},
             "items": [{"productId": 3, "name": "Band", "price": 120, "quantity": 5}],
             "total": 600, "status": "cancelled", "createdAt": "2026-10-10T09:00:00Z"},
            {"id": "o4", "customer": {"name": "Cy", "email": "cy@example.com"},
             "items": [{"productId": 9, "name": "Retired Cuff", "price": 150, "quantity": 1}],
             "total": 150, "status": "pending", "createdAt": "2026-10-12T09:00:00Z"}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_order_totals_exclude_cancelled_revenue() {
        let totals = order_totals(&orders(), Currency::USD);
        assert_eq!(totals.count, 4);
        assert_eq!(totals.by_status[&OrderStatus::Cancelled], 1);
        assert_eq!(totals.revenue, usd(690));
        assert_eq!(totals.average_order_value, usd(230));
    }

    #[test]
    fn test_recent_window() {
        let recent = recent_window(&orders(), now(), 30, Currency::USD);
        assert_eq!(recent.orders, 3);
        assert_eq!(recent.revenue, usd(610));
    }

    #[test]
    fn test_unbounded_recent_window_covers_all_orders() {
        let all_revenue = order_totals(&orders(), Currency::USD).revenue;
        for days in [i64::MAX, 1_000_000_000] {
            let recent = recent_window(&orders(), now(), days, Currency::USD);
            assert_eq!(recent.orders, 4);
            assert_eq!(recent.revenue, all_revenue);
        }
        assert_eq!(recent_window(&orders(), now(), -1, Currency::USD).orders, 0);
    }

    #[test]
    fn test_top_products_ranking() {
        let top = top_products(&products(), &orders(), 5, Currency::USD);
        let names: Vec<&str> = top.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Stud Earrings", "Solitaire Ring", "Retired Cuff"]);
        assert_eq!(top[0].units, 3);
        assert_eq!(top[0].revenue, usd(240));
    }

    #[test]
    fn test_top_products_limit() {
        assert_eq!(top_products(&products(), &orders(), 1, Currency::USD).len(), 1);
    }

    #[test]
    fn test_catalog_summary() {
        let summary = catalog_summary(&products());
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.by_category["Uncategorized"], 1);
        assert_eq!(summary.new_arrivals, 1);
        assert_eq!(summary.discounted, 1);
        assert_eq!(summary.average_rating, Some(4.5));
    }

    #[test]
    fn test_customers_case_insensitive() {
        let customers = customer_summary(&orders());
        assert_eq!(customers.distinct, 3);
        assert_eq!(customers.repeat, 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let metrics = BusinessMetrics::aggregate(&[], &[], now());
        assert_eq!(metrics.orders.count, 0);
        assert!(metrics.orders.average_order_value.is_zero());
        assert!(metrics.top_products.is_empty());
        assert_eq!(metrics.catalog.average_rating, None);
    }
}
