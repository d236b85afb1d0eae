//! Products Data

use crate::domain::products::records::{CategoryUuid, ProductUuid};

/// New Product Data
///
/// The owning store is derived from the calling user, never supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub stock: u64,
    pub description: String,
    pub photo_urls: Vec<String>,
}

impl NewProduct {
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Product Update Data
///
/// Replaces every mutable field, including the photo list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub reseller_price: u64,
    pub consumer_price: u64,
    pub stock: u64,
    pub description: String,
    pub photo_urls: Vec<String>,
}

impl ProductUpdate {
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Lowercase the name and join its words with hyphens.
pub(crate) fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Kopi Susu Gula Aren"), "kopi-susu-gula-aren");
    }

    #[test]
    fn slugify_collapses_repeated_whitespace() {
        assert_eq!(slugify("  Teh   Manis "), "teh-manis");
    }

    #[test]
    fn slugify_empty_name_is_empty() {
        assert_eq!(slugify("   "), "");
    }
}
