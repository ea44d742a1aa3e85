//! Shared type definitions for the Iconforge crafting economy.
//!
//! This crate is the single source of truth for identifiers, value types,
//! the rejection taxonomy, and the change notifications the core emits.
//! Types flow to the UI layer as `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- String newtypes for resource and recipe identifiers
//! - [`enums`] -- Production categories and the [`Rejection`] taxonomy
//! - [`structs`] -- [`ResourceStack`]
//! - [`events`] -- [`GameEvent`] change notifications

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ProductionCategory, Rejection};
pub use events::GameEvent;
pub use ids::{RecipeId, ResourceId};
pub use structs::ResourceStack;
