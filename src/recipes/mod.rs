//! Built-in recipes and the registry that looks them up by name.
//!
//! Registry construction never fails and does no I/O.

mod ignition_cmake;
mod ogre;
mod simbody;

use std::collections::BTreeMap;

use crate::core::recipe::Recipe;
use crate::resolver::errors::RecipeError;

pub use ignition_cmake::IgnitionCmake;
pub use ogre::Ogre;
pub use simbody::Simbody;

/// Registry of recipes, keyed by package name.
pub struct RecipeRegistry {
    recipes: BTreeMap<&'static str, Box<dyn Recipe>>,
}

impl RecipeRegistry {
    /// Create a registry with all built-in recipes.
    pub fn new() -> Self {
        let mut registry = RecipeRegistry {
            recipes: BTreeMap::new(),
        };

        registry.register(Box::new(IgnitionCmake));
        registry.register(Box::new(Ogre));
        registry.register(Box::new(Simbody));

        registry
    }

    pub fn register(&mut self, recipe: Box<dyn Recipe>) {
        self.recipes.insert(recipe.name(), recipe);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Recipe> {
        self.recipes.get(name).map(|r| r.as_ref())
    }

    /// Look up a recipe, failing with the list of known names.
    pub fn find(&self, name: &str) -> Result<&dyn Recipe, RecipeError> {
        self.get(name).ok_or_else(|| RecipeError::UnknownRecipe {
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.recipes.keys().copied()
    }

    pub fn all(&self) -> impl Iterator<Item = &dyn Recipe> + '_ {
        self.recipes.values().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
