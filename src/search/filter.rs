//! Predicate filter over the recipe catalog

use crate::types::{Cuisine, DietaryTag, Difficulty, Recipe};

/// Conjunction of optional recipe criteria.
///
/// Unset criteria match everything. An empty query string and an empty tag
/// list count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// Substring of the name, description or any ingredient name
    pub query: Option<String>,
    pub cuisine: Option<Cuisine>,
    pub difficulty: Option<Difficulty>,
    /// Every listed tag must be present on the recipe
    pub dietary_tags: Vec<DietaryTag>,
    /// Ceiling on prep + cook time, inclusive
    pub max_time_min: Option<u32>,
    /// Substring of any ingredient name
    pub ingredient: Option<String>,
}

impl RecipeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = Some(cuisine);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn dietary_tag(mut self, tag: DietaryTag) -> Self {
        self.dietary_tags.push(tag);
        self
    }

    pub fn max_time_min(mut self, minutes: u32) -> Self {
        self.max_time_min = Some(minutes);
        self
    }

    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        active(&self.query).is_none()
            && self.cuisine.is_none()
            && self.difficulty.is_none()
            && self.dietary_tags.is_empty()
            && self.max_time_min.is_none()
            && active(&self.ingredient).is_none()
    }

    /// Check a single recipe against every set criterion
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(query) = active(&self.query) {
            let query = query.to_lowercase();
            let hit = recipe.name.to_lowercase().contains(&query)
                || recipe.description.to_lowercase().contains(&query)
                || recipe.uses_ingredient(&query);
            if !hit {
                return false;
            }
        }

        if let Some(cuisine) = self.cuisine {
            if recipe.cuisine != cuisine {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != difficulty {
                return false;
            }
        }

        if !self.dietary_tags.iter().all(|tag| recipe.has_tag(*tag)) {
            return false;
        }

        if let Some(max) = self.max_time_min {
            if recipe.total_time_min() > max {
                return false;
            }
        }

        if let Some(ingredient) = active(&self.ingredient) {
            if !recipe.uses_ingredient(ingredient) {
                return false;
            }
        }

        true
    }

    /// Ordered subsequence of `recipes` that matches
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
