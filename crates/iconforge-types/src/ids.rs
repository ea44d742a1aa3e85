//! Type-safe string identifiers for resources and recipes.
//!
//! Resources ("icons") and recipes are keyed by stable string ids such as
//! `"seed_wheat"` or `"combo_flour"`. Wrapping them in distinct newtypes
//! prevents a recipe id from being passed where a resource id is expected.
//!
//! Both types implement [`Borrow<str>`](core::borrow::Borrow) so maps keyed
//! by an id can be queried with a plain `&str`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifier of a stackable resource ("icon"), e.g. `seed_wheat`.
    ResourceId
}

define_id! {
    /// Identifier of a combination or production recipe, e.g. `combo_flour`.
    RecipeId
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn id_serializes_as_plain_string() {
        let id = ResourceId::new("seed_wheat");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"seed_wheat\""));
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = RecipeId::from("combo_flour");
        let json = serde_json::to_string(&original).unwrap_or_default();
        let restored: Result<RecipeId, _> = serde_json::from_str(&json);
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ResourceId::new("grain"), 2_u64);
        assert_eq!(map.get("grain").copied(), Some(2));
        assert_eq!(map.get("hardware"), None);
    }

    #[test]
    fn display_matches_inner() {
        let id = ResourceId::new("nutrition");
        assert_eq!(id.to_string(), "nutrition");
        assert_eq!(id.as_str(), "nutrition");
    }
}
