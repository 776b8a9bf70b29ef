//! Catalog types: products and departments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{DepartmentId, ProductId};
use super::price::Price;

/// A catalog product as served by the API (and generated locally as a fallback).
///
/// Field names on the wire follow the existing API (`_id`, `discounted_price`,
/// `imagePath`). Products are treated as immutable snapshots once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Price>,
    /// Display glyph; the catalog has no photography.
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "imagePath", default)]
    pub image_path: String,
    /// Secondary image, shown on hover.
    #[serde(default)]
    pub image_2: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub quantity: u32,
    /// Comma-separated size list, e.g. `S,M,L,XL`.
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl Product {
    /// The price a cart line is charged at.
    ///
    /// The discounted price wins when present and non-zero.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        match self.discounted_price {
            Some(discounted) if !discounted.is_zero() => discounted,
            _ => self.price,
        }
    }

    /// Available sizes, split from the comma-separated `size` field.
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.size
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Department name, derived from the category when the record has none.
    #[must_use]
    pub fn department_name(&self) -> &str {
        match &self.department {
            Some(department) => department.as_str(),
            None => department_for_category(&self.category),
        }
    }

    /// Case-insensitive match on category or department name.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
            || self.department_name().eq_ignore_ascii_case(category)
    }

    /// Case-insensitive substring match on the title.
    #[must_use]
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive substring match across title, description, category
    /// and department.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.department_name(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Map a lowercase catalog category to its department name.
#[must_use]
pub fn department_for_category(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "men" => "Men",
        "women" => "Women",
        "shoes" => "Shoes",
        _ => "Accessories",
    }
}

/// A top-level storefront department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: DepartmentId,
    #[serde(rename = "departmentName")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated category names.
    #[serde(default)]
    pub categories: String,
}

impl Department {
    /// The department's categories as a list.
    pub fn category_list(&self) -> impl Iterator<Item = &str> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
