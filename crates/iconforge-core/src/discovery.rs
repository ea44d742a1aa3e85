//! Monotonic unlock sets: discovered recipes and unlocked icons.
//!
//! Both registries only grow. Re-adding a known id is a no-op that reports
//! `false`, so callers can publish a notification exactly once per id.
//! Insertion order is kept for persistence.

use std::collections::BTreeSet;

use iconforge_types::{RecipeId, ResourceId};

/// An insertion-ordered set that never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockSet<T: Ord> {
    order: Vec<T>,
    members: BTreeSet<T>,
}

impl<T: Ord> Default for UnlockSet<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            members: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Clone> UnlockSet<T> {
    /// Insert `id`. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: T) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    /// Return whether `id` is present.
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.members.contains(id)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }

    /// Return the number of members.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Return whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T: Ord + Clone> FromIterator<T> for UnlockSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Recipes the player may use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRegistry {
    recipes: UnlockSet<RecipeId>,
}

impl DiscoveryRegistry {
    /// Create a registry with the bootstrap set already discovered.
    pub fn with_bootstrap<I>(bootstrap: I) -> Self
    where
        I: IntoIterator<Item = RecipeId>,
    {
        Self {
            recipes: bootstrap.into_iter().collect(),
        }
    }

    /// Mark `recipe` discovered. Returns `true` only the first time.
    pub fn discover(&mut self, recipe: RecipeId) -> bool {
        let newly = self.recipes.insert(recipe);
        if newly {
            tracing::debug!(count = self.recipes.len(), "Recipe discovered");
        }
        newly
    }

    /// Return whether `recipe` is discovered.
    pub fn is_discovered(&self, recipe: &str) -> bool {
        self.recipes.contains(recipe)
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &RecipeId> {
        self.recipes.iter()
    }

    /// Return the number of discovered recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Return whether nothing is discovered.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Resources the player has owned at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconRegistry {
    icons: UnlockSet<ResourceId>,
}

impl IconRegistry {
    /// Create a registry with `icons` already unlocked.
    pub fn with_unlocked<I>(icons: I) -> Self
    where
        I: IntoIterator<Item = ResourceId>,
    {
        Self {
            icons: icons.into_iter().collect(),
        }
    }

    /// Unlock `icon`. Returns `true` only the first time.
    pub fn unlock(&mut self, icon: ResourceId) -> bool {
        self.icons.insert(icon)
    }

    /// Return whether `icon` is unlocked.
    pub fn is_unlocked(&self, icon: &str) -> bool {
        self.icons.contains(icon)
    }

    /// Iterate in unlock order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceId> {
        self.icons.iter()
    }

    /// Return the number of unlocked icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Return whether no icon is unlocked.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
