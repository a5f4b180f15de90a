//! Order records, as read by the admin dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::{self, Money};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    Shipped,
    Delivered,
    #[serde(alias = "canceled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the order counts toward revenue.
    pub fn is_revenue(&self) -> bool {
        *self != OrderStatus::Cancelled
    }
}

/// Who placed an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// One product line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(alias = "product", alias = "id")]
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Unit price at time of purchase.
    #[serde(with = "money::decimal", default)]
    pub price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl OrderItem {
    /// `price * quantity`, saturating.
    pub fn line_total(&self) -> Money {
        Money::new(
            self.price
                .amount_cents
                .saturating_mul(i64::from(self.quantity)),
            self.price.currency,
        )
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Charged total. Zero when the record only lists items.
    #[serde(with = "money::decimal", default)]
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The charged total, or the sum of line totals if none was recorded.
    pub fn effective_total(&self) -> Money {
        if !self.total.is_zero() {
            return self.total;
        }
        let cents = self
            .items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.line_total().amount_cents));
        Money::new(cents, self.total.currency)
    }

    /// Total units across every line.
    pub fn units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrdersPayload {
    Envelope {
        #[serde(default = "default_success")]
        success: bool,
        #[serde(default)]
        orders: Vec<Order>,
    },
    List(Vec<Order>),
}

fn default_success() -> bool {
    true
}

/// Parse orders JSON, either `{ success, orders }` or a bare array.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, CommerceError> {
    let orders = match serde_json::from_str::<OrdersPayload>(json)? {
        OrdersPayload::Envelope { success: false, .. } => {
            tracing::warn!("order listing reported failure; no orders loaded");
            Vec::new()
        }
        OrdersPayload::Envelope { orders, .. } => orders,
        OrdersPayload::List(list) => list,
    };
    tracing::debug!(count = orders.len(), "orders loaded");
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    const ORDERS: &str = r#"[
        {
            "_id": "o1",
            "customer": {"name": "Ana", "email": "ana@example.com"},
            "items": [
                {"productId": 1, "name": "Ring", "price": 300, "quantity": 2}
            ],
            "total": 600,
            "status": "delivered",
            "createdAt": "2026-09-30T10:00:00Z"
        },
        {
            "id": "o2",
            "items": [{"product": "2", "name": "Studs", "price": 40.5}],
            "status": "canceled",
            "createdAt": "2026-10-01T08:30:00Z"
        }
    ]"#;

    #[test]
    fn test_parse_orders() {
        let orders = parse_orders(ORDERS).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "o1");
        assert_eq!(orders[0].status, OrderStatus::Delivered);
        assert_eq!(orders[0].units(), 2);
        assert_eq!(orders[1].status, OrderStatus::Cancelled);
        assert_eq!(orders[1].items[0].quantity, 1);
        assert_eq!(orders[1].customer, Customer::default());
    }

    #[test]
    fn test_effective_total_falls_back_to_lines() {
        let orders = parse_orders(ORDERS).unwrap();
        assert_eq!(orders[0].effective_total(), Money::from_units(600, Currency::USD));
        assert_eq!(orders[1].effective_total().amount_cents, 4050);
    }

    #[test]
    fn test_envelope() {
        let json = format!(r#"{{"success": true, "orders": {ORDERS}}}"#);
        assert_eq!(parse_orders(&json).unwrap().len(), 2);
        assert!(parse_orders(r#"{"success": false}"#).unwrap().is_empty());
    }

    #[test]
    fn test_status_names() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!(!OrderStatus::Cancelled.is_revenue());
        assert!(OrderStatus::Shipped.is_revenue());
    }
}
