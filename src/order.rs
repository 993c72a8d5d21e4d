//! Kitchen Order
//!
//! The order shape exchanged with the backend, both over REST and in pushed events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle of an order. The normal path is `Pending → Preparing → Served → Paid`.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Active orders are still being worked on by the kitchen.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Preparing)
    }

    /// Label shown to kitchen staff.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Served => "Ready",
            OrderStatus::Paid => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// The transition the kitchen can trigger from this status, if any.
    pub fn next_kitchen_step(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Served),
            _ => None,
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    /// Usually whole, but the backend stores whatever number it was sent.
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Unit price
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub modifications: Vec<String>,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed item"
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Staff note
    #[serde(default)]
    pub note: Option<String>,
    /// Instructions given by the customer when ordering
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl Order {
    pub fn table_label(&self) -> &str {
        self.table.as_deref().unwrap_or("Takeaway")
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Whole minutes elapsed since the order was placed, as seen by the local clock.
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes()
    }

    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        match self.age_minutes(now) {
            m if m < 1 => "Just now".to_string(),
            1 => "1 min ago".to_string(),
            m => format!("{} min ago", m),
        }
    }

    /// Short form of the identifier for narrow columns.
    pub fn short_id(&self) -> &str {
        let len = self.id.len();
        if len > 6 && self.id.is_char_boundary(len - 6) {
            &self.id[len - 6..]
        } else {
            &self.id
        }
    }
}

impl Display for LineItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x {}", self.quantity, self.display_name())
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Order {} ({}), {} item(s), {}",
            self.id,
            self.table_label(),
            self.items.len(),
            self.status.label()
        )
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use chrono::Duration;

    #[test]
    fn decodes_backend_payload_with_defaults() {
        let json = r#"{
            "_id": "665f1c2a9b1e8a0012345678",
            "restaurant": "665f00000000000000000001",
            "items": [
                {"name": "Paneer Tikka", "quantity": 2, "price": 180, "modifications": ["no onion"]},
                {"name": "Lassi"}
            ],
            "status": "preparing",
            "createdAt": "2024-05-01T11:40:00.000Z",
            "waiter": {"name": "Asha"}
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.id, "665f1c2a9b1e8a0012345678");
        assert_eq!(order.table_label(), "Takeaway");
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.items[1].quantity, 1.0);
        assert_eq!(order.items[1].line_total(), 0.0);
        assert_eq!(order.items[0].modifications, vec!["no onion".to_string()]);
        assert_eq!(order.total(), 360.0);
        assert_eq!(order.short_id(), "345678");
    }

    #[test]
    fn tolerates_unnamed_items_and_fractional_quantities() {
        let json = r#"[
            {"_id": "a", "items": [{"name": "Dosa", "quantity": 1}], "status": "pending",
             "createdAt": "2024-05-01T11:40:00Z"},
            {"_id": "b", "items": [{"quantity": 1.5, "price": 100}], "status": "pending",
             "createdAt": "2024-05-01T11:41:00Z"}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].items[0].display_name(), "Unnamed item");
        assert_eq!(orders[1].items[0].quantity, 1.5);
        assert_eq!(orders[1].total(), 150.0);
        assert_eq!(orders[0].items[0].to_string(), "1x Dosa");
    }

    #[test]
    fn rejects_unknown_status() {
        let json = r#"{"_id": "a", "status": "burnt", "createdAt": "2024-05-01T11:40:00Z"}"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }

    #[test]
    fn status_labels_and_steps() {
        assert_eq!(OrderStatus::Served.label(), "Ready");
        assert_eq!(OrderStatus::Paid.label(), "Completed");
        assert_eq!(
            OrderStatus::Pending.next_kitchen_step(),
            Some(OrderStatus::Preparing)
        );
        assert_eq!(
            OrderStatus::Preparing.next_kitchen_step(),
            Some(OrderStatus::Served)
        );
        assert_eq!(OrderStatus::Served.next_kitchen_step(), None);
        assert_eq!("SERVED".parse::<OrderStatus>(), Ok(OrderStatus::Served));
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn age_labels() {
        let o = order("a", OrderStatus::Pending);
        assert_eq!(o.age_label(t0() + Duration::seconds(59)), "Just now");
        assert_eq!(o.age_label(t0() + Duration::seconds(90)), "1 min ago");
        assert_eq!(o.age_label(t0() + Duration::minutes(12)), "12 min ago");
    }
}
