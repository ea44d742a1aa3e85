//! Recipe catalog and combination resolver for Iconforge.
//!
//! Two kinds of recipe exist:
//!
//! - **Combination** recipes turn an exact ingredient multiset into one
//!   result, instantly, when the player combines icons.
//! - **Production** recipes are timed: ingredients are consumed when a job
//!   starts and the result is credited after `base × multiplier` seconds.
//!
//! # Modules
//!
//! - [`catalog`] -- [`RecipeCatalog`] tables, [`CatalogBuilder`], YAML loading
//! - [`reference`] -- The built-in [`reference_catalog`]
//! - [`resolver`] -- [`RecipeResolver`] multiset matching
//! - [`error`] -- [`CatalogError`]

pub mod catalog;
pub mod error;
pub mod reference;
pub mod resolver;

// Re-export primary types at crate root.
pub use catalog::{
    CatalogBuilder, CombinationRecipe, MAX_BASE_DURATION_SECS, MIN_BASE_DURATION_SECS,
    ProductionRecipe, RecipeCatalog,
};
pub use error::CatalogError;
pub use reference::reference_catalog;
pub use resolver::RecipeResolver;
