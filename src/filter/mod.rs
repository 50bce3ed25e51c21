//! Dietary filtering.
//!
//! A [`DietaryFilterSet`] holds four independent toggles. A recipe passes the
//! set when every active toggle's flag is known to be true on the recipe;
//! a flag the record never carried counts as not satisfied.

use crate::model::Recipe;
use serde::{Deserialize, Serialize};

/// One of the four dietary attributes a recipe can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietaryFlag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl DietaryFlag {
    /// All flags, in the order diet tags are emitted.
    pub const ALL: [DietaryFlag; 4] = [
        DietaryFlag::Vegetarian,
        DietaryFlag::Vegan,
        DietaryFlag::GlutenFree,
        DietaryFlag::DairyFree,
    ];

    /// Human readable label, e.g. `"Gluten Free"`.
    pub fn label(self) -> &'static str {
        match self {
            DietaryFlag::Vegetarian => "Vegetarian",
            DietaryFlag::Vegan => "Vegan",
            DietaryFlag::GlutenFree => "Gluten Free",
            DietaryFlag::DairyFree => "Dairy Free",
        }
    }

    /// Value understood by the recipe provider's `diet` parameter.
    pub fn diet_tag(self) -> &'static str {
        match self {
            DietaryFlag::Vegetarian => "vegetarian",
            DietaryFlag::Vegan => "vegan",
            DietaryFlag::GlutenFree => "gluten free",
            DietaryFlag::DairyFree => "dairy free",
        }
    }
}

/// The set of dietary toggles chosen for a search. All off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietaryFilterSet {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}

impl DietaryFilterSet {
    /// A set with no active filters.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns this set with `flag` switched on.
    pub fn with(mut self, flag: DietaryFlag) -> Self {
        self.set(flag, true);
        self
    }

    pub fn get(&self, flag: DietaryFlag) -> bool {
        match flag {
            DietaryFlag::Vegetarian => self.vegetarian,
            DietaryFlag::Vegan => self.vegan,
            DietaryFlag::GlutenFree => self.gluten_free,
            DietaryFlag::DairyFree => self.dairy_free,
        }
    }

    pub fn set(&mut self, flag: DietaryFlag, active: bool) {
        match flag {
            DietaryFlag::Vegetarian => self.vegetarian = active,
            DietaryFlag::Vegan => self.vegan = active,
            DietaryFlag::GlutenFree => self.gluten_free = active,
            DietaryFlag::DairyFree => self.dairy_free = active,
        }
    }

    /// Flips a single toggle, leaving the others unchanged.
    pub fn toggle(&mut self, flag: DietaryFlag) {
        let current = self.get(flag);
        self.set(flag, !current);
    }

    /// True if at least one toggle is on.
    pub fn is_active(&self) -> bool {
        DietaryFlag::ALL.iter().any(|flag| self.get(*flag))
    }

    /// The toggles that are on, in canonical order.
    pub fn active_flags(&self) -> Vec<DietaryFlag> {
        DietaryFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag))
            .collect()
    }

    /// Comma-joined diet tags for the active toggles, e.g.
    /// `"gluten free,dairy free"`. Empty when nothing is active.
    pub fn diet_tags(&self) -> String {
        self.active_flags()
            .into_iter()
            .map(DietaryFlag::diet_tag)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Returns true if `recipe` satisfies every active filter in `filters`.
///
/// # Examples
///
/// ```
/// use chefbot::{passes, DietaryFilterSet, DietaryFlag, Recipe};
///
/// let mut recipe = Recipe::new(1, "Lentil Soup");
/// recipe.vegan = Some(true);
///
/// assert!(passes(&recipe, &DietaryFilterSet::none()));
/// assert!(passes(&recipe, &DietaryFilterSet::none().with(DietaryFlag::Vegan)));
/// assert!(!passes(&recipe, &DietaryFilterSet::none().with(DietaryFlag::GlutenFree)));
/// ```
pub fn passes(recipe: &Recipe, filters: &DietaryFilterSet) -> bool {
    DietaryFlag::ALL
        .iter()
        .filter(|flag| filters.get(**flag))
        .all(|flag| recipe.flag(*flag) == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_with(flags: [Option<bool>; 4]) -> Recipe {
        let mut recipe = Recipe::new(42, "Test Dish");
        recipe.vegetarian = flags[0];
        recipe.vegan = flags[1];
        recipe.gluten_free = flags[2];
        recipe.dairy_free = flags[3];
        recipe
    }

    fn all_flag_combinations() -> Vec<Recipe> {
        let values = [None, Some(false), Some(true)];
        let mut recipes = Vec::new();
        for a in values {
            for b in values {
                for c in values {
                    for d in values {
                        recipes.push(recipe_with([a, b, c, d]));
                    }
                }
            }
        }
        recipes
    }

    #[test]
    fn test_no_active_filters_pass_everything() {
        let filters = DietaryFilterSet::none();
        for recipe in all_flag_combinations() {
            assert!(passes(&recipe, &filters));
        }
    }

    #[test]
    fn test_single_filter_requires_exact_true() {
        for flag in DietaryFlag::ALL {
            let filters = DietaryFilterSet::none().with(flag);
            for recipe in all_flag_combinations() {
                assert_eq!(
                    passes(&recipe, &filters),
                    recipe.flag(flag) == Some(true),
                    "flag {:?} on {:?}",
                    flag,
                    recipe
                );
            }
        }
    }

    #[test]
    fn test_multiple_filters_are_conjunctive() {
        let filters = DietaryFilterSet::none()
            .with(DietaryFlag::GlutenFree)
            .with(DietaryFlag::DairyFree);

        assert!(passes(
            &recipe_with([None, None, Some(true), Some(true)]),
            &filters
        ));
        assert!(!passes(
            &recipe_with([Some(true), Some(true), Some(true), Some(false)]),
            &filters
        ));
        assert!(!passes(
            &recipe_with([None, None, None, Some(true)]),
            &filters
        ));
    }

    #[test]
    fn test_diet_tags() {
        assert_eq!(DietaryFilterSet::none().diet_tags(), "");

        let filters = DietaryFilterSet {
            gluten_free: true,
            dairy_free: true,
            ..Default::default()
        };
        assert_eq!(filters.diet_tags(), "gluten free,dairy free");

        let all = DietaryFilterSet {
            vegetarian: true,
            vegan: true,
            gluten_free: true,
            dairy_free: true,
        };
        assert_eq!(all.diet_tags(), "vegetarian,vegan,gluten free,dairy free");
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut filters = DietaryFilterSet::none();
        filters.toggle(DietaryFlag::Vegan);
        assert!(filters.vegan);
        assert!(filters.is_active());
        assert_eq!(filters.active_flags(), vec![DietaryFlag::Vegan]);

        filters.toggle(DietaryFlag::DairyFree);
        filters.toggle(DietaryFlag::Vegan);
        assert!(!filters.vegan);
        assert!(filters.dairy_free);
        assert_eq!(filters.active_flags(), vec![DietaryFlag::DairyFree]);
    }

    #[test]
    fn test_filter_set_serde_uses_camel_case() {
        let filters: DietaryFilterSet =
            serde_json::from_str(r#"{"glutenFree": true}"#).unwrap();
        assert!(filters.gluten_free);
        assert!(!filters.vegan);
    }
}
