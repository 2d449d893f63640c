use crate::model::{OrderId, OrderStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A purchase placed by a [`User`](crate::model::User).
///
/// Items live in their own store under an [`OrderItemKey`](crate::model::OrderItemKey) and the
/// optional payment is stored under the order's id; an order only records who placed it, when,
/// and where it stands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: Option<OrderId>,
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client_id: UserId,
}

impl Order {
    pub fn new(moment: DateTime<Utc>, status: OrderStatus, client_id: UserId) -> Self {
        Self {
            id: None,
            moment,
            status,
            client_id,
        }
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
