//! Error types for catalog construction.
//!
//! These are configuration faults (a bad recipe file, a typo in the
//! reference table), not gameplay outcomes. A catalog that fails validation
//! is never handed to the rest of the system.

use iconforge_types::RecipeId;

/// Errors that can occur while building or loading a [`RecipeCatalog`].
///
/// [`RecipeCatalog`]: crate::RecipeCatalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two recipes share an id. Combination and production ids share one
    /// namespace because discovery tracks them together.
    #[error("duplicate recipe id: {0}")]
    DuplicateRecipe(RecipeId),

    /// A recipe lists no ingredients.
    #[error("recipe {0} has no ingredients")]
    EmptyIngredients(RecipeId),

    /// A production recipe's base duration is outside the allowed range.
    #[error("recipe {id} has base duration {seconds}s, expected {min}..={max}s")]
    DurationOutOfRange {
        /// The offending recipe.
        id: RecipeId,
        /// The configured duration.
        seconds: f64,
        /// Smallest allowed duration.
        min: f64,
        /// Largest allowed duration.
        max: f64,
    },

    /// Failed to parse a catalog YAML document.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}
