use crate::model::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// An item of the catalogue.
///
/// A product belongs to any number of categories. The link is held here as a set of
/// [`CategoryId`]s; categories do not know their products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub categories: BTreeSet<CategoryId>,
}

impl Product {
    /// Creates a transient product with no categories.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        img_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            img_url: img_url.into(),
            categories: BTreeSet::new(),
        }
    }

    /// Adds `category` to the product, builder style.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn belongs_to(&self, category: CategoryId) -> bool {
        self.categories.contains(&category)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
