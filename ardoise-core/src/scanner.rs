//! Dish-name scanning against the detection catalog.

use std::collections::HashSet;

use crate::rules::Registry;
use crate::types::Detection;
use crate::validator::validate_ingredient;

/// Scan a dish name for ingredients not yet recorded for that dish.
///
/// Walks the detection catalog in declaration order, skipping any rule
/// whose ingredient (lower-cased) is already in `already_present`. A
/// candidate whose pattern matches is still dropped when the validator
/// vetoes it for this dish. Accepted ingredients are added to
/// `already_present` so no later rule can re-add them within the same
/// scan; that mutation is the function's only side effect, and the
/// caller threads the set across passes to keep extraction idempotent.
///
/// A missing or blank dish name yields no detections.
pub fn scan_dish(
    rules: &Registry,
    dish_name: &str,
    already_present: &mut HashSet<String>,
) -> Vec<Detection> {
    if dish_name.trim().is_empty() {
        return Vec::new();
    }

    let dish = dish_name.to_lowercase();
    let mut found = Vec::new();

    for rule in rules.detections() {
        let key = rule.ingredient.to_lowercase();
        if already_present.contains(&key) {
            continue;
        }
        if !rule.is_match(&dish) {
            continue;
        }
        if !validate_ingredient(rules, &rule.ingredient, dish_name) {
            continue;
        }
        already_present.insert(key);
        found.push(Detection {
            ingredient: rule.ingredient.clone(),
            category: rule.category,
        });
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Registry;
    use crate::types::Category;

    fn labels(detections: &[Detection]) -> Vec<&str> {
        detections.iter().map(|d| d.ingredient.as_str()).collect()
    }

    #[test]
    fn test_each_ingredient_emitted_once() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        let found = scan_dish(rules, "Beurre, beurre salé et ciboulette", &mut seen);
        // Catalog order: herbs come before dairy.
        assert_eq!(labels(&found), ["ciboulette", "beurre", "beurre salé"]);
        assert_eq!(found[1].category, Category::ProduitLaitier);
        assert_eq!(found[0].category, Category::Herbe);
    }

    #[test]
    fn test_repeated_token_emits_once() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        let found = scan_dish(rules, "Pain perdu, pain grillé", &mut seen);
        assert_eq!(labels(&found), ["pain"]);
    }

    #[test]
    fn test_already_present_ingredients_are_skipped() {
        let rules = Registry::builtin();
        let mut seen = HashSet::from(["beurre".to_string()]);
        let found = scan_dish(rules, "Beurre, beurre salé et ciboulette", &mut seen);
        assert_eq!(labels(&found), ["ciboulette", "beurre salé"]);
    }

    #[test]
    fn test_second_pass_finds_nothing_new() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        let dish = "Riz au lait, caramel fleur de sel";
        let first = scan_dish(rules, dish, &mut seen);
        assert!(!first.is_empty());
        let second = scan_dish(rules, dish, &mut seen);
        assert!(second.is_empty());
    }

    #[test]
    fn test_vetoed_candidates_are_dropped() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        let found = scan_dish(rules, "Sole meunière au beurre noisette", &mut seen);
        assert!(!labels(&found).contains(&"beurre"));
        assert!(!seen.contains("beurre"));
    }

    #[test]
    fn test_blank_dish_name_yields_nothing() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        assert!(scan_dish(rules, "", &mut seen).is_empty());
        assert!(scan_dish(rules, "   ", &mut seen).is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        let found = scan_dish(rules, "TARTE AU BASILIC", &mut seen);
        assert_eq!(labels(&found), ["basilic"]);
    }

    #[test]
    fn test_word_boundary_patterns_do_not_match_inside_words() {
        let rules = Registry::builtin();
        let mut seen = HashSet::new();
        // "riz" must not fire inside "risotto".
        assert!(scan_dish(rules, "Risotto carnaroli", &mut seen).is_empty());
        // But "pain" fires as a standalone word.
        assert!(scan_dish(rules, "Pain de campagne", &mut seen)
            .iter()
            .any(|d| d.ingredient == "pain"));
    }
}
