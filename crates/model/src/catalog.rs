use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::DuplicateIdError;

/// One product record of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier within the catalog.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Brand that makes the product.
    pub brand: String,
    /// Category the product is filed under, e.g. `skincare`.
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// Image URL.
    pub image: String,
}

/// The wire form of a catalog document: `{"products": [...]}`.
///
/// Use [`Catalog::new`] to turn it into a validated [`Catalog`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Products in display order.
    pub products: Vec<CatalogItem>,
}

/// An immutable product catalog whose ids are known to be unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<CatalogItem>,
}

impl Catalog {
    /// Creates a catalog, rejecting duplicate ids.
    pub fn new(products: Vec<CatalogItem>) -> Result<Self, DuplicateIdError> {
        let mut seen = HashSet::with_capacity(products.len());
        for item in &products {
            if !seen.insert(item.id) {
                return Err(DuplicateIdError(item.id));
            }
        }
        Ok(Self { products })
    }

    /// Returns all products in catalog order.
    #[inline]
    pub fn products(&self) -> &[CatalogItem] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: u64) -> Option<&CatalogItem> {
        self.products.iter().find(|item| item.id == id)
    }

    /// Returns the distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.products {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = DuplicateIdError;

    #[inline]
    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(doc.products)
    }
}
