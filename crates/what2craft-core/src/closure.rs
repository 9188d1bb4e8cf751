//! # Recipe Closure Builder
//!
//! Derives the crafting closure from a catalog: every item with a recipe,
//! plus every ingredient those recipes name. Ingredients missing from the
//! catalog are replaced by placeholder items and reported, never treated
//! as failures.
//!
//! Pure function of its input; no I/O.

use crate::{Catalog, CraftingClosure, Item};
use std::collections::BTreeSet;

/// Closure plus the ingredient ids that had to be synthesized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureReport {
    /// The crafting closure.
    pub closure: CraftingClosure,
    /// Ingredient ids with no catalog entry, in id order.
    pub placeholders: BTreeSet<String>,
}

/// Build the crafting closure of `catalog`.
pub fn build_closure(catalog: &Catalog) -> CraftingClosure {
    build_closure_report(catalog).closure
}

/// Build the crafting closure of `catalog`, keeping track of placeholders.
pub fn build_closure_report(catalog: &Catalog) -> ClosureReport {
    let mut report = ClosureReport::default();

    for item in catalog.values().filter(|item| item.is_craftable()) {
        report.closure.insert(item.clone());

        for ingredient in item.ingredient_ids() {
            match catalog.get(ingredient) {
                Some(known) => {
                    report.closure.insert(known.clone());
                }
                None => {
                    if report.placeholders.insert(ingredient.to_string()) {
                        tracing::warn!(
                            ingredient,
                            used_by = %item.id,
                            "missing recipe ingredient, using placeholder"
                        );
                    }
                    report.closure.insert(Item::placeholder(ingredient));
                }
            }
        }
    }

    tracing::info!(
        items = report.closure.len(),
        placeholders = report.placeholders.len(),
        "crafting closure built"
    );
    report
}

/// Counts describing a catalog and its closure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Items in the catalog for the target edition.
    pub catalog_items: usize,
    /// Items in the crafting closure.
    pub closure_items: usize,
    /// Closure items that have a recipe.
    pub craftable: usize,
    /// Closure items without a recipe (ingredients only).
    pub ingredients: usize,
    /// Ingredients synthesized because the catalog lacked them.
    pub placeholders: usize,
}

impl CatalogSummary {
    #[must_use]
    pub fn new(catalog: &Catalog, report: &ClosureReport) -> Self {
        let craftable = report.closure.iter().filter(|i| i.is_craftable()).count();
        Self {
            catalog_items: catalog.len(),
            closure_items: report.closure.len(),
            craftable,
            ingredients: report.closure.len() - craftable,
            placeholders: report.placeholders.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
