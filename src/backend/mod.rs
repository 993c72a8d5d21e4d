use crate::backend::error::BackendError;
use crate::order::{Order, OrderStatus};
use serde::Deserialize;

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Restaurant link on a user, either populated by the backend or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RestaurantLink {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
}

impl RestaurantLink {
    pub fn id(&self) -> &str {
        match self {
            RestaurantLink::Populated { id, .. } => id,
            RestaurantLink::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RestaurantLink::Populated { name, .. } => name.as_deref(),
            RestaurantLink::Id(_) => None,
        }
    }
}

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub restaurant: Option<RestaurantLink>,
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Get the user the bearer token belongs to.
    async fn get_current_user(&self) -> Result<UserProfile, BackendError>;

    /// Get every current order of the user's restaurant.
    async fn get_orders(&self) -> Result<Vec<Order>, BackendError>;

    /// Moves an order to a new status and returns the stored order.
    async fn set_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, BackendError>;
}
