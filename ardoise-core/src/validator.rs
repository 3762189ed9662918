//! Mention validation.
//!
//! Decides whether a detected ingredient is a true positive in a given
//! dish name. Many French ingredient tokens collide with unrelated words
//! ("ail" inside "volaille", "noix de Saint-Jacques" the scallop cut),
//! so each ingredient may carry either a list of exclusion patterns or a
//! single positive pattern that is the sole arbiter of validity.

use crate::rules::{Registry, RuleKind};

/// Check whether `ingredient` is a true positive mention in `dish_name`.
///
/// Precedence is strict, signals are never merged:
/// 1. A positive rule, when present, decides alone: the mention is valid
///    iff its pattern matches. Exclusion rules are not consulted.
/// 2. Otherwise any matching exclusion pattern vetoes the mention.
/// 3. An ingredient with no rule of either kind is trusted.
pub fn validate_ingredient(rules: &Registry, ingredient: &str, dish_name: &str) -> bool {
    let dish = dish_name.to_lowercase();
    match rules.rule_kind(ingredient) {
        RuleKind::Positive(pattern) => pattern.is_match(&dish),
        RuleKind::Exclusions(patterns) => !patterns.iter().any(|p| p.is_match(&dish)),
        RuleKind::None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Registry;

    #[test]
    fn test_positive_rule_is_sole_arbiter() {
        let rules = Registry::builtin();
        // "volaille" contains "ail" but fails the positive pattern.
        assert!(!validate_ingredient(rules, "ail", "Volaille fermière"));
        assert!(validate_ingredient(rules, "ail", "Filet de bœuf, ail noir"));
        assert!(validate_ingredient(rules, "ail", "Aïoli de cabillaud"));
        assert!(validate_ingredient(rules, "ail", "Gigot d'agneau à l'ail rose"));
        assert!(!validate_ingredient(rules, "ail", "Cocktail de crevettes"));
        assert!(!validate_ingredient(rules, "ail", "Médaillon de veau"));
    }

    #[test]
    fn test_exclusion_patterns_veto() {
        let rules = Registry::builtin();
        assert!(!validate_ingredient(
            rules,
            "noix",
            "Noix de Saint-Jacques snackées"
        ));
        assert!(validate_ingredient(rules, "noix", "Tarte aux noix"));
        assert!(!validate_ingredient(rules, "noisette", "Beurre noisette"));
        assert!(validate_ingredient(rules, "noisette", "Dacquoise noisette"));
        assert!(!validate_ingredient(rules, "bar", "Rhubarbe pochée"));
        assert!(validate_ingredient(rules, "bar", "Bar de ligne rôti"));
    }

    #[test]
    fn test_unruled_ingredient_is_trusted() {
        let rules = Registry::builtin();
        assert!(validate_ingredient(rules, "tomate", "Tomates anciennes"));
        assert!(validate_ingredient(rules, "tomate", "Velouté glacé"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rules = Registry::builtin();
        assert!(!validate_ingredient(rules, "noix", "NOIX DE SAINT-JACQUES"));
        assert!(validate_ingredient(rules, "ail", "AIL NOIR ET CITRON"));
    }
}
