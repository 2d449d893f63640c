use crate::model::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Settlement of an order.
///
/// A payment has no id of its own: it is stored under the id of the order it pays for, so at
/// most one payment exists per order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub order_id: OrderId,
    pub moment: DateTime<Utc>,
}

impl Payment {
    pub fn new(order_id: OrderId, moment: DateTime<Utc>) -> Self {
        Self { order_id, moment }
    }
}

impl PartialEq for Payment {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl Eq for Payment {}

impl Hash for Payment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}
