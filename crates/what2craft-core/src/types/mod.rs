//! # Core Type Definitions
//!
//! This module contains the value types shared by every stage of the engine:
//! - The normalized `Item` and its `Recipe`
//! - The `Catalog` (every item of the target edition, keyed by id)
//! - The `CraftingClosure` (the externally visible result)
//! - Error types (`CatalogError`)
//!
//! ## Determinism Guarantees
//!
//! All collections are `BTreeMap`/`BTreeSet`, and `Item` orders by `id`
//! first, so a closure always iterates in id order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

// =============================================================================
// ITEM
// =============================================================================

/// Ingredient id to required quantity.
pub type Recipe = BTreeMap<String, u32>;

/// One game item as relevant to crafting.
///
/// Unknown prices are `None`, never zero: "price unknown" and "price is zero"
/// are different facts. Likewise a missing `recipe` means "not craftable",
/// which is distinct from an empty recipe.
///
/// Serialized field names are `id`, `name`, `buyPrice`, `sellPrice`,
/// `recipe`; absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable unique identifier within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First vendor buy price, if the record has one.
    pub buy_price: Option<u32>,
    /// Sell price, if the record has one.
    pub sell_price: Option<u32>,
    /// Ingredients needed to craft this item.
    pub recipe: Option<Recipe>,
}

impl Item {
    /// Create an item with no prices and no recipe.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            buy_price: None,
            sell_price: None,
            recipe: None,
        }
    }

    /// Stand-in for an ingredient id that has no catalog entry.
    ///
    /// The name is the id; prices and recipe are absent.
    #[must_use]
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id)
    }

    #[must_use]
    pub fn with_buy_price(mut self, price: u32) -> Self {
        self.buy_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_sell_price(mut self, price: u32) -> Self {
        self.sell_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    /// True when the item has a recipe of its own.
    #[must_use]
    pub fn is_craftable(&self) -> bool {
        self.recipe.is_some()
    }

    /// Ingredient ids of this item's recipe, in id order. Empty when not craftable.
    pub fn ingredient_ids(&self) -> impl Iterator<Item = &str> {
        self.recipe.iter().flat_map(|recipe| recipe.keys().map(String::as_str))
    }
}

// =============================================================================
// CATALOG & CLOSURE
// =============================================================================

/// Every item of the target edition, keyed by id, craftable or not.
pub type Catalog = BTreeMap<String, Item>;

/// Craftable items plus every ingredient they reference, ordered by id.
pub type CraftingClosure = BTreeSet<Item>;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that abort a catalog load.
///
/// Any of these fails the whole load; no partial catalog is ever produced.
/// Payloads are plain strings so the error can be cached and handed to
/// every caller waiting on the same computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The source could not be enumerated or a record could not be read.
    #[error("I/O error at {origin}: {detail}")]
    Io { origin: String, detail: String },

    /// A record is not well-formed structured data.
    #[error("Parse error in {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// A record of the target edition lacks a required field.
    #[error("Record {origin} is missing required field '{field}'")]
    MissingField { origin: String, field: &'static str },
}

impl CatalogError {
    pub(crate) fn io(origin: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            origin: origin.into(),
            detail: err.to_string(),
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            detail: err.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
