//! Rule tables and the compiled pattern registry.
//!
//! Rules are data, not code: the whole catalog lives in `data/rules.json`,
//! is embedded at compile time, and compiles once into an immutable
//! [`Registry`]. Engine entry points take `&Registry` explicitly so tests
//! can inject their own tables.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::RuleError;
use crate::types::Category;

/// The raw rule table as authored in `data/rules.json`.
///
/// `detections` and the per-ingredient subtype lists are arrays because
/// their declaration order is load-bearing: the scanner walks detections
/// in order, and the first matching subtype wins.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuleTable {
    #[serde(default)]
    pub detections: Vec<RawDetection>,
    #[serde(default)]
    pub exclusions: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub positives: HashMap<String, String>,
    #[serde(default)]
    pub subtypes: HashMap<String, Vec<RawSubtype>>,
    #[serde(default)]
    pub spelling: HashMap<String, String>,
}

/// One detection entry: ingredient label, search pattern, category.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetection {
    pub ingredient: String,
    pub pattern: String,
    pub category: String,
}

/// One subtype entry under a generic ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubtype {
    pub label: String,
    pub pattern: String,
}

/// A compiled detection rule.
#[derive(Debug)]
pub struct DetectionRule {
    pub ingredient: String,
    pub category: Category,
    pattern: Regex,
}

impl DetectionRule {
    pub fn is_match(&self, dish_name: &str) -> bool {
        self.pattern.is_match(dish_name)
    }
}

/// A compiled subtype rule.
#[derive(Debug)]
pub struct SubtypeRule {
    pub label: String,
    pattern: Regex,
}

impl SubtypeRule {
    pub fn is_match(&self, dish_name: &str) -> bool {
        self.pattern.is_match(dish_name)
    }
}

/// Validation rule attached to an ingredient. At most one per ingredient:
/// a positive rule claims the slot even when exclusion patterns are also
/// declared, so precedence is settled at load time.
#[derive(Debug)]
enum ValidationRule {
    Positive(Regex),
    Exclusions(Vec<Regex>),
}

/// How the validator must treat an ingredient.
#[derive(Debug)]
pub enum RuleKind<'a> {
    /// No rule registered; bare detection is trusted.
    None,
    /// The mention is vetoed if any of these patterns matches.
    Exclusions(&'a [Regex]),
    /// The mention is valid iff this pattern matches.
    Positive(&'a Regex),
}

/// Immutable, process-wide rule configuration.
///
/// All patterns are compiled case-insensitively. Construction fails on the
/// first pattern that does not compile or the first category the engine
/// does not know; a bad rule is never skipped silently.
#[derive(Debug)]
pub struct Registry {
    detections: Vec<DetectionRule>,
    validations: HashMap<String, ValidationRule>,
    subtypes: HashMap<String, Vec<SubtypeRule>>,
    spelling: Vec<(String, String)>,
}

impl Registry {
    pub fn from_table(table: RuleTable) -> Result<Self, RuleError> {
        let mut detections = Vec::with_capacity(table.detections.len());
        for raw in table.detections {
            let category = Category::from_str(&raw.category).ok_or_else(|| {
                RuleError::UnknownCategory {
                    ingredient: raw.ingredient.clone(),
                    category: raw.category.clone(),
                }
            })?;
            let pattern = compile(&raw.ingredient, &raw.pattern)?;
            detections.push(DetectionRule {
                ingredient: raw.ingredient,
                category,
                pattern,
            });
        }

        let mut validations = HashMap::new();
        for (ingredient, pattern) in table.positives {
            let regex = compile(&ingredient, &pattern)?;
            validations.insert(ingredient.to_lowercase(), ValidationRule::Positive(regex));
        }
        for (ingredient, patterns) in table.exclusions {
            let key = ingredient.to_lowercase();
            // A positive rule is the sole arbiter for its ingredient;
            // exclusion patterns declared alongside one stay out of the slot.
            if validations.contains_key(&key) {
                continue;
            }
            let mut compiled = Vec::with_capacity(patterns.len());
            for pattern in &patterns {
                compiled.push(compile(&ingredient, pattern)?);
            }
            validations.insert(key, ValidationRule::Exclusions(compiled));
        }

        let mut subtypes = HashMap::new();
        for (generic, raw_rules) in table.subtypes {
            let mut compiled = Vec::with_capacity(raw_rules.len());
            for raw in raw_rules {
                let pattern = compile(&generic, &raw.pattern)?;
                compiled.push(SubtypeRule {
                    label: raw.label,
                    pattern,
                });
            }
            subtypes.insert(generic.to_lowercase(), compiled);
        }

        let mut spelling: Vec<(String, String)> = table.spelling.into_iter().collect();
        spelling.sort();

        Ok(Registry {
            detections,
            validations,
            subtypes,
            spelling,
        })
    }

    /// The rule table embedded in the binary.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Detection catalog, in declaration order.
    pub fn detections(&self) -> &[DetectionRule] {
        &self.detections
    }

    /// The validation rule kind for an ingredient label (case-insensitive).
    pub fn rule_kind(&self, ingredient: &str) -> RuleKind<'_> {
        match self.validations.get(&ingredient.to_lowercase()) {
            Some(ValidationRule::Positive(regex)) => RuleKind::Positive(regex),
            Some(ValidationRule::Exclusions(regexes)) => RuleKind::Exclusions(regexes),
            None => RuleKind::None,
        }
    }

    /// Subtype rules for a generic ingredient, in declaration order.
    /// Empty for ingredients without subtypes.
    pub fn subtype_rules(&self, ingredient: &str) -> &[SubtypeRule] {
        self.subtypes
            .get(&ingredient.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Generic ingredients that have subtype rules, sorted for
    /// deterministic batch passes.
    pub fn subtype_generics(&self) -> Vec<&str> {
        let mut generics: Vec<&str> = self.subtypes.keys().map(String::as_str).collect();
        generics.sort_unstable();
        generics
    }

    /// Label normalizations (misspelled form, canonical form), sorted.
    pub fn spelling_fixes(&self) -> &[(String, String)] {
        &self.spelling
    }
}

fn compile(ingredient: &str, pattern: &str) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RuleError::InvalidPattern {
            ingredient: ingredient.to_string(),
            source,
        })
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    let json = include_str!("../../data/rules.json");
    let table: RuleTable = serde_json::from_str(json).expect("Failed to parse rules.json");
    Registry::from_table(table).expect("Failed to compile built-in rule table")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: serde_json::Value) -> RuleTable {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_builtin_loads() {
        let registry = Registry::builtin();
        assert!(!registry.detections().is_empty());
        assert!(matches!(registry.rule_kind("ail"), RuleKind::Positive(_)));
        assert!(matches!(
            registry.rule_kind("noix"),
            RuleKind::Exclusions(_)
        ));
        assert!(matches!(registry.rule_kind("tomate"), RuleKind::None));
    }

    #[test]
    fn test_detection_order_is_declaration_order() {
        let registry = Registry::builtin();
        let first = &registry.detections()[0];
        assert_eq!(first.ingredient, "vanille");
        assert_eq!(first.category, Category::Epice);
    }

    #[test]
    fn test_subtype_order_is_declaration_order() {
        let labels: Vec<&str> = Registry::builtin()
            .subtype_rules("chou")
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(labels, ["chou-fleur", "choucroute", "chou de Bruxelles"]);
    }

    #[test]
    fn test_invalid_pattern_fails_load() {
        let result = Registry::from_table(table(serde_json::json!({
            "exclusions": { "noix": ["("] }
        })));
        assert!(matches!(
            result,
            Err(RuleError::InvalidPattern { ref ingredient, .. }) if ingredient == "noix"
        ));
    }

    #[test]
    fn test_unknown_category_fails_load() {
        let result = Registry::from_table(table(serde_json::json!({
            "detections": [
                { "ingredient": "tofu", "pattern": "tofu", "category": "proteine" }
            ]
        })));
        assert!(matches!(
            result,
            Err(RuleError::UnknownCategory { ref category, .. }) if category == "proteine"
        ));
    }

    #[test]
    fn test_positive_rule_claims_the_slot() {
        let registry = Registry::from_table(table(serde_json::json!({
            "positives": { "ail": "\\bail\\b" },
            "exclusions": { "ail": ["volaille"] }
        })))
        .unwrap();
        assert!(matches!(registry.rule_kind("ail"), RuleKind::Positive(_)));
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let registry = Registry::builtin();
        assert!(matches!(registry.rule_kind("Noix"), RuleKind::Exclusions(_)));
        assert!(!registry.subtype_rules("Chou").is_empty());
    }
}
