//! # Item Records
//!
//! Typed view of one on-disk item record. A record carries data for many
//! game editions side by side under `games`:
//!
//! ```text
//! {
//!   "id": "B", "name": "Axe",
//!   "games": {
//!     "nh": { "buyPrices": [{"value": 500}], "sellPrice": {"value": 125},
//!             "recipe": {"A": 5} },
//!     "pc": { ... }
//!   }
//! }
//! ```
//!
//! Only the target edition's sub-tree is ever decoded into [`EditionRecord`];
//! the others stay opaque so their shape cannot fail a load.

use crate::{CatalogError, Item, Recipe};
use serde::Deserialize;
use serde_json::Value;

/// Top level of a record. `id` and `name` are optional here because records
/// of other editions are dropped before they are checked.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub games: Option<Value>,
}

/// One edition's sub-tree of a record.
///
/// Fields stay untyped: a price or recipe of an unexpected shape means
/// "absent", never a failed load.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionRecord {
    /// `[{"value": n}, ...]`
    #[serde(default)]
    pub buy_prices: Option<Value>,
    /// `{"value": n}`
    #[serde(default)]
    pub sell_price: Option<Value>,
    /// `{"<ingredient id>": n, ...}`
    #[serde(default)]
    pub recipe: Option<Value>,
}

/// Any JSON number as a `u32`: fractions truncate, out-of-range values
/// saturate. Non-numbers give `None`.
fn number_value(node: &Value) -> Option<u32> {
    match node.as_u64() {
        Some(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        None => node.as_f64().map(|n| n as u32),
    }
}

impl RawRecord {
    /// Parse a record document.
    pub fn from_slice(origin: &str, bytes: &[u8]) -> Result<Self, CatalogError> {
        serde_json::from_slice(bytes).map_err(|e| CatalogError::parse(origin, &e))
    }

    /// The non-null sub-tree for `edition`, if this record has one.
    #[must_use]
    pub fn edition(&self, edition: &str) -> Option<&Value> {
        self.games
            .as_ref()
            .and_then(|games| games.get(edition))
            .filter(|tree| !tree.is_null())
    }

    /// Project this record into an [`Item`] for `edition`.
    ///
    /// Returns `Ok(None)` when the record has no data for the edition.
    pub fn into_item(self, origin: &str, edition: &str) -> Result<Option<Item>, CatalogError> {
        let Some(tree) = self.edition(edition) else {
            return Ok(None);
        };
        // Only objects can carry fields; any other sub-tree has none.
        let data: EditionRecord = match tree {
            Value::Object(_) => serde_json::from_value(tree.clone())
                .map_err(|e| CatalogError::parse(origin, &e))?,
            _ => EditionRecord::default(),
        };

        let id = self.id.ok_or_else(|| CatalogError::MissingField {
            origin: origin.to_string(),
            field: "id",
        })?;
        let name = self.name.ok_or_else(|| CatalogError::MissingField {
            origin: origin.to_string(),
            field: "name",
        })?;

        Ok(Some(Item {
            buy_price: data.buy_price(&id),
            sell_price: data.sell_price(),
            recipe: data.recipe(),
            id,
            name,
        }))
    }
}

impl EditionRecord {
    /// First vendor price. More than one entry is unusual in the source data
    /// and is reported, but the first entry always wins.
    fn buy_price(&self, id: &str) -> Option<u32> {
        let prices = self.buy_prices.as_ref()?;
        if let Value::Array(entries) = prices
            && entries.len() > 1
        {
            tracing::warn!(
                item = id,
                count = entries.len(),
                "item with multiple buy prices, using the first"
            );
        }
        prices.get(0)?.get("value").and_then(number_value)
    }

    fn sell_price(&self) -> Option<u32> {
        self.sell_price.as_ref()?.get("value").and_then(number_value)
    }

    /// Object-shaped recipes become a [`Recipe`]; anything else means
    /// "not craftable". A quantity that is not a number counts as 0.
    fn recipe(&self) -> Option<Recipe> {
        let Some(Value::Object(fields)) = &self.recipe else {
            return None;
        };
        Some(
            fields
                .iter()
                .map(|(ingredient, quantity)| {
                    (ingredient.clone(), number_value(quantity).unwrap_or(0))
                })
                .collect(),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
