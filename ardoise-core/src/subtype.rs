//! Subtype resolution for generic ingredients.

use crate::rules::Registry;

/// Narrow a generic ingredient to its most specific subtype for a dish.
///
/// Subtype rules are tested in declaration order and the first match
/// wins; at most one subtype is attributed per mention. Without a match
/// (or for ingredients that have no subtype rules) the generic label is
/// returned unchanged.
pub fn resolve_subtype<'a>(rules: &'a Registry, ingredient: &'a str, dish_name: &str) -> &'a str {
    let dish = dish_name.to_lowercase();
    for rule in rules.subtype_rules(ingredient) {
        if rule.is_match(&dish) {
            return &rule.label;
        }
    }
    ingredient
}
