use crate::model::UserId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A registered customer.
///
/// Orders point back at their client through [`Order::client_id`](crate::model::Order::client_id);
/// a user does not hold its orders. Equality and hashing use only the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Creates a transient user. The store assigns the id on first save.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
