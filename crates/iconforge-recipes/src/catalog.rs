//! Immutable tables of combination and production recipes.
//!
//! A [`RecipeCatalog`] is assembled once at startup through a
//! [`CatalogBuilder`] (or parsed from YAML) and never changes afterwards.
//! Building validates the table:
//!
//! - recipe ids are unique across both kinds,
//! - every recipe has at least one ingredient,
//! - production durations lie in
//!   [`MIN_BASE_DURATION_SECS`]`..=`[`MAX_BASE_DURATION_SECS`].
//!
//! Catalog order is preserved. It matters to the resolver: when two
//! combination recipes share an ingredient multiset, the earlier one wins.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use iconforge_types::{ProductionCategory, RecipeId, ResourceId, ResourceStack};

use crate::error::CatalogError;

/// Shortest allowed production base duration, in seconds.
pub const MIN_BASE_DURATION_SECS: f64 = 10.0;

/// Longest allowed production base duration, in seconds.
pub const MAX_BASE_DURATION_SECS: f64 = 30.0;

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// A rule mapping an exact ingredient multiset to one result resource.
///
/// Matching ignores ingredient order but not multiplicity: listing `grain`
/// twice requires two grain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CombinationRecipe {
    /// Unique recipe id.
    pub id: RecipeId,
    /// Ingredient multiset (repeats allowed).
    pub ingredients: Vec<ResourceId>,
    /// The resource produced.
    pub result: ResourceId,
    /// Whether the recipe starts out discovered.
    #[serde(default)]
    pub discovered: bool,
}

impl CombinationRecipe {
    /// Return the ingredients as stacks, one per distinct resource.
    pub fn cost(&self) -> Vec<ResourceStack> {
        count_ingredients(&self.ingredients)
            .into_iter()
            .map(|(resource_id, quantity)| ResourceStack {
                resource_id,
                quantity,
            })
            .collect()
    }
}

/// A timed conversion of ingredients into a result resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductionRecipe {
    /// Unique recipe id.
    pub id: RecipeId,
    /// Ingredient multiset consumed per batch.
    pub ingredients: Vec<ResourceId>,
    /// The resource produced, one unit per batch.
    pub result: ResourceId,
    /// Seconds one batch takes.
    pub base_duration_secs: f64,
    /// Whether this grows a crop or manufactures a good.
    pub category: ProductionCategory,
    /// Whether the recipe starts out discovered.
    #[serde(default)]
    pub discovered: bool,
}

impl ProductionRecipe {
    /// Return the ingredients consumed by `multiplier` batches, one stack
    /// per distinct resource.
    ///
    /// Returns `None` if a quantity overflows.
    pub fn cost(&self, multiplier: u32) -> Option<Vec<ResourceStack>> {
        count_ingredients(&self.ingredients)
            .into_iter()
            .map(|(resource_id, per_batch)| {
                per_batch
                    .checked_mul(u64::from(multiplier))
                    .map(|quantity| ResourceStack {
                        resource_id,
                        quantity,
                    })
            })
            .collect()
    }

    /// Return the output of `multiplier` batches.
    pub fn output(&self, multiplier: u32) -> ResourceStack {
        ResourceStack {
            resource_id: self.result.clone(),
            quantity: u64::from(multiplier),
        }
    }

    /// Return the duration of `multiplier` batches: `base × multiplier`.
    pub fn total_duration_secs(&self, multiplier: u32) -> f64 {
        self.base_duration_secs * f64::from(multiplier)
    }
}

/// Count each distinct ingredient, keeping the result ordered by id.
fn count_ingredients(ingredients: &[ResourceId]) -> BTreeMap<ResourceId, u64> {
    let mut counts: BTreeMap<ResourceId, u64> = BTreeMap::new();
    for ingredient in ingredients {
        let entry = counts.entry(ingredient.clone()).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    counts
}

// ---------------------------------------------------------------------------
// RecipeCatalog
// ---------------------------------------------------------------------------

/// The validated, immutable recipe tables.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    /// Combination recipes in catalog order.
    combinations: Vec<CombinationRecipe>,
    /// Production recipes in catalog order.
    productions: Vec<ProductionRecipe>,
    /// Combination id -> index into `combinations`.
    combination_index: HashMap<RecipeId, usize>,
    /// Production id -> index into `productions`.
    production_index: HashMap<RecipeId, usize>,
}

impl RecipeCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Parse and validate a catalog from YAML.
    ///
    /// ```yaml
    /// combinations:
    ///   - id: combo_flour
    ///     ingredients: [grain, hardware]
    ///     result: nutrition
    /// productions:
    ///   - id: wheat_production
    ///     ingredients: [seed_wheat]
    ///     result: wheat
    ///     base_duration_secs: 15
    ///     category: Plant
    ///     discovered: true
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for malformed input and the other
    /// [`CatalogError`] variants for tables that fail validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        let mut builder = Self::builder();
        for recipe in file.combinations {
            builder.push_combination(recipe);
        }
        for recipe in file.productions {
            builder.push_production(recipe);
        }
        builder.build()
    }

    /// Look up a combination recipe by id.
    pub fn combination(&self, id: &str) -> Option<&CombinationRecipe> {
        self.combination_index
            .get(id)
            .and_then(|&idx| self.combinations.get(idx))
    }

    /// Look up a production recipe by id.
    pub fn production(&self, id: &str) -> Option<&ProductionRecipe> {
        self.production_index
            .get(id)
            .and_then(|&idx| self.productions.get(idx))
    }

    /// Check whether any recipe has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.combination_index.contains_key(id) || self.production_index.contains_key(id)
    }

    /// Return all combination recipes in catalog order.
    pub fn combinations(&self) -> &[CombinationRecipe] {
        &self.combinations
    }

    /// Return all production recipes in catalog order.
    pub fn productions(&self) -> &[ProductionRecipe] {
        &self.productions
    }

    /// Return the ids of every recipe flagged as discovered from the start.
    pub fn initially_discovered(&self) -> impl Iterator<Item = &RecipeId> {
        self.combinations
            .iter()
            .filter(|r| r.discovered)
            .map(|r| &r.id)
            .chain(self.productions.iter().filter(|r| r.discovered).map(|r| &r.id))
    }

    /// Return the total number of recipes of both kinds.
    pub fn len(&self) -> usize {
        self.combinations.len().saturating_add(self.productions.len())
    }

    /// Return whether the catalog holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty() && self.productions.is_empty()
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    combinations: Vec<CombinationRecipe>,
    #[serde(default)]
    productions: Vec<ProductionRecipe>,
}

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Collects recipes in order, then validates them into a [`RecipeCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    combinations: Vec<CombinationRecipe>,
    productions: Vec<ProductionRecipe>,
    /// Which list received the most recent recipe.
    last_was_production: bool,
}

impl CatalogBuilder {
    /// Append a combination recipe.
    #[must_use]
    pub fn combination(mut self, id: &str, ingredients: &[&str], result: &str) -> Self {
        self.push_combination(CombinationRecipe {
            id: RecipeId::new(id),
            ingredients: ingredients.iter().map(|&i| ResourceId::new(i)).collect(),
            result: ResourceId::new(result),
            discovered: false,
        });
        self
    }

    /// Append a production recipe.
    #[must_use]
    pub fn production(
        mut self,
        id: &str,
        ingredients: &[&str],
        result: &str,
        base_duration_secs: f64,
        category: ProductionCategory,
    ) -> Self {
        self.push_production(ProductionRecipe {
            id: RecipeId::new(id),
            ingredients: ingredients.iter().map(|&i| ResourceId::new(i)).collect(),
            result: ResourceId::new(result),
            base_duration_secs,
            category,
            discovered: false,
        });
        self
    }

    /// Mark the most recently appended recipe as discovered from the start.
    #[must_use]
    pub fn discovered(mut self) -> Self {
        if self.last_was_production {
            if let Some(recipe) = self.productions.last_mut() {
                recipe.discovered = true;
            }
        } else if let Some(recipe) = self.combinations.last_mut() {
            recipe.discovered = true;
        }
        self
    }

    /// Append an already-constructed combination recipe.
    pub fn push_combination(&mut self, recipe: CombinationRecipe) {
        self.combinations.push(recipe);
        self.last_was_production = false;
    }

    /// Append an already-constructed production recipe.
    pub fn push_production(&mut self, recipe: ProductionRecipe) {
        self.productions.push(recipe);
        self.last_was_production = true;
    }

    /// Validate the collected recipes and freeze them into a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, checking recipes in the
    /// order they were appended (combinations first).
    pub fn build(self) -> Result<RecipeCatalog, CatalogError> {
        let mut combination_index = HashMap::with_capacity(self.combinations.len());
        let mut production_index = HashMap::with_capacity(self.productions.len());

        for (idx, recipe) in self.combinations.iter().enumerate() {
            if recipe.ingredients.is_empty() {
                return Err(CatalogError::EmptyIngredients(recipe.id.clone()));
            }
            if combination_index.insert(recipe.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
        }

        for (idx, recipe) in self.productions.iter().enumerate() {
            if recipe.ingredients.is_empty() {
                return Err(CatalogError::EmptyIngredients(recipe.id.clone()));
            }
            let seconds = recipe.base_duration_secs;
            if !(MIN_BASE_DURATION_SECS..=MAX_BASE_DURATION_SECS).contains(&seconds) {
                return Err(CatalogError::DurationOutOfRange {
                    id: recipe.id.clone(),
                    seconds,
                    min: MIN_BASE_DURATION_SECS,
                    max: MAX_BASE_DURATION_SECS,
                });
            }
            if combination_index.contains_key(&recipe.id)
                || production_index.insert(recipe.id.clone(), idx).is_some()
            {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
        }

        tracing::debug!(
            combinations = self.combinations.len(),
            productions = self.productions.len(),
            "Recipe catalog built"
        );

        Ok(RecipeCatalog {
            combinations: self.combinations,
            productions: self.productions,
            combination_index,
            production_index,
        })
    }
}
