//! Combination matching: ingredient multiset -> recipe.
//!
//! The resolver keys every combination recipe by its canonical form, the
//! sorted ingredient list, so a lookup is one sort of the (short) provided
//! list plus one map probe. Sorting makes matching order-independent while
//! keeping it quantity-sensitive: `[grain, grain]` and `[grain]` are
//! different keys.
//!
//! When two recipes share a canonical form, the one earlier in catalog order
//! is kept and the later one is recorded as shadowed. This is the same
//! outcome as scanning the catalog front to back and taking the first match.

use std::collections::BTreeMap;

use iconforge_types::{Rejection, RecipeId, ResourceId};

use crate::catalog::{CombinationRecipe, RecipeCatalog};

/// Sort a copy of `ingredients` into canonical order.
fn canonical(ingredients: &[ResourceId]) -> Vec<ResourceId> {
    let mut key = ingredients.to_vec();
    key.sort_unstable();
    key
}

/// Resolves provided ingredients to a combination recipe.
#[derive(Debug, Clone, Default)]
pub struct RecipeResolver {
    /// Canonical ingredient list -> first recipe with that multiset.
    by_ingredients: BTreeMap<Vec<ResourceId>, CombinationRecipe>,
    /// Recipes unreachable because an earlier recipe has the same multiset.
    shadowed: Vec<RecipeId>,
}

impl RecipeResolver {
    /// Index every combination recipe in `catalog`.
    pub fn new(catalog: &RecipeCatalog) -> Self {
        let mut by_ingredients: BTreeMap<Vec<ResourceId>, CombinationRecipe> = BTreeMap::new();
        let mut shadowed = Vec::new();
        for recipe in catalog.combinations() {
            let key = canonical(&recipe.ingredients);
            if let Some(winner) = by_ingredients.get(&key) {
                tracing::warn!(
                    recipe = %recipe.id,
                    shadowed_by = %winner.id,
                    "Combination recipe shadowed by an earlier recipe with the same ingredients"
                );
                shadowed.push(recipe.id.clone());
            } else {
                by_ingredients.insert(key, recipe.clone());
            }
        }
        Self {
            by_ingredients,
            shadowed,
        }
    }

    /// Find the combination recipe whose ingredient multiset equals
    /// `provided`, in any order.
    ///
    /// Returns `None` when nothing matches, including for an empty list.
    pub fn find_match(&self, provided: &[ResourceId]) -> Option<&CombinationRecipe> {
        if provided.is_empty() {
            return None;
        }
        self.by_ingredients.get(canonical(provided).as_slice())
    }

    /// Like [`RecipeResolver::find_match`], but reports a miss as
    /// [`Rejection::NoMatch`].
    ///
    /// # Errors
    ///
    /// [`Rejection::NoMatch`] if nothing matches.
    pub fn resolve(&self, provided: &[ResourceId]) -> Result<&CombinationRecipe, Rejection> {
        self.find_match(provided).ok_or(Rejection::NoMatch)
    }

    /// Return the ids of recipes that can never match.
    pub fn shadowed(&self) -> &[RecipeId] {
        &self.shadowed
    }

    /// Return the number of matchable recipes.
    pub fn len(&self) -> usize {
        self.by_ingredients.len()
    }

    /// Return whether no recipe can match.
    pub fn is_empty(&self) -> bool {
        self.by_ingredients.is_empty()
    }
}
