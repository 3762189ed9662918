//! Audit and cleanup of recorded mentions.
//!
//! The audit runs the validator over every recorded mention and partitions
//! out the false positives. Cleanup deletes them, but only the set computed
//! by the same pass: [`run_cleanup`] loads, audits, and (in apply mode)
//! deletes in one call, so a stale invalid set can never be applied.

use std::collections::HashMap;

use crate::rules::Registry;
use crate::types::{MentionId, RecordedMention};
use crate::validator::validate_ingredient;

/// Maximum example dish names shown per ingredient in the report.
pub const MAX_EXAMPLES: usize = 5;

/// Return the recorded mentions that fail validation against their
/// owning dish's name.
pub fn find_false_positives(
    rules: &Registry,
    mentions: &[RecordedMention],
) -> Vec<RecordedMention> {
    mentions
        .iter()
        .filter(|m| !validate_ingredient(rules, &m.ingredient, &m.dish_name))
        .cloned()
        .collect()
}

/// False positives for one ingredient label.
#[derive(Debug)]
pub struct IngredientGroup {
    pub ingredient: String,
    pub count: usize,
    /// Up to [`MAX_EXAMPLES`] offending dish names.
    pub examples: Vec<String>,
    /// How many further offenders were not included in `examples`.
    pub omitted: usize,
}

/// Audit findings grouped by ingredient, largest group first.
#[derive(Debug)]
pub struct AuditReport {
    pub total: usize,
    pub groups: Vec<IngredientGroup>,
}

impl AuditReport {
    pub fn new(invalid: &[RecordedMention]) -> Self {
        let mut by_ingredient: HashMap<&str, Vec<&RecordedMention>> = HashMap::new();
        for mention in invalid {
            by_ingredient
                .entry(mention.ingredient.as_str())
                .or_default()
                .push(mention);
        }

        let mut groups: Vec<IngredientGroup> = by_ingredient
            .into_iter()
            .map(|(ingredient, mentions)| IngredientGroup {
                ingredient: ingredient.to_string(),
                count: mentions.len(),
                examples: mentions
                    .iter()
                    .take(MAX_EXAMPLES)
                    .map(|m| m.dish_name.clone())
                    .collect(),
                omitted: mentions.len().saturating_sub(MAX_EXAMPLES),
            })
            .collect();
        // Largest group first; label as tie-break keeps the report stable.
        groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.ingredient.cmp(&b.ingredient)));

        AuditReport {
            total: invalid.len(),
            groups,
        }
    }
}

/// Whether a cleanup pass only reports or also commits deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    DryRun,
    Apply,
}

/// Storage operations the cleanup pass needs. Implemented by the
/// database-backed store in the binary and by in-memory fakes in tests.
pub trait MentionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All recorded mentions, joined with their dish names.
    fn load_mentions(&mut self) -> Result<Vec<RecordedMention>, Self::Error>;

    /// Delete the given mentions; returns how many rows went away.
    fn delete_mentions(&mut self, ids: &[MentionId]) -> Result<usize, Self::Error>;
}

/// Outcome of one audit/cleanup pass.
#[derive(Debug)]
pub struct CleanupSummary {
    pub mode: CleanupMode,
    /// How many mentions were checked.
    pub checked: usize,
    /// The false positives found by this pass.
    pub invalid: Vec<RecordedMention>,
    /// Rows actually deleted (always 0 in dry-run mode).
    pub removed: usize,
}

/// Audit the full mention corpus and, in apply mode, delete exactly the
/// false positives found by this call. Storage errors abort the pass;
/// callers wanting all-or-nothing semantics run this inside one storage
/// transaction.
pub fn run_cleanup<S: MentionStore>(
    rules: &Registry,
    store: &mut S,
    mode: CleanupMode,
) -> Result<CleanupSummary, S::Error> {
    let mentions = store.load_mentions()?;
    let invalid = find_false_positives(rules, &mentions);

    let removed = match mode {
        CleanupMode::Apply if !invalid.is_empty() => {
            let ids: Vec<MentionId> = invalid.iter().map(|m| m.id).collect();
            store.delete_mentions(&ids)?
        }
        _ => 0,
    };

    tracing::info!(
        checked = mentions.len(),
        invalid = invalid.len(),
        removed,
        ?mode,
        "audit pass complete"
    );

    Ok(CleanupSummary {
        mode,
        checked: mentions.len(),
        invalid,
        removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Registry;
    use std::convert::Infallible;

    fn mention(id: i32, ingredient: &str, dish_name: &str) -> RecordedMention {
        RecordedMention {
            id,
            dish_id: id * 10,
            ingredient: ingredient.to_string(),
            category: "fruit".to_string(),
            dish_name: dish_name.to_string(),
        }
    }

    struct MemoryStore {
        mentions: Vec<RecordedMention>,
    }

    impl MentionStore for MemoryStore {
        type Error = Infallible;

        fn load_mentions(&mut self) -> Result<Vec<RecordedMention>, Infallible> {
            Ok(self.mentions.clone())
        }

        fn delete_mentions(&mut self, ids: &[MentionId]) -> Result<usize, Infallible> {
            let before = self.mentions.len();
            self.mentions.retain(|m| !ids.contains(&m.id));
            Ok(before - self.mentions.len())
        }
    }

    fn corpus() -> Vec<RecordedMention> {
        vec![
            mention(1, "noix", "Noix de Saint-Jacques snackées"),
            mention(2, "noix", "Tarte aux noix"),
            mention(3, "ail", "Volaille fermière"),
            mention(4, "ail", "Bœuf, ail noir"),
            mention(5, "tomate", "Tomates anciennes"),
        ]
    }

    #[test]
    fn test_partition_matches_validator() {
        let invalid = find_false_positives(Registry::builtin(), &corpus());
        let ids: Vec<i32> = invalid.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_report_groups_sorted_by_count() {
        let invalid = vec![
            mention(1, "bar", "Rhubarbe pochée"),
            mention(2, "noix", "Noix de veau braisée"),
            mention(3, "noix", "Noix de coco rôtie"),
        ];
        let report = AuditReport::new(&invalid);
        assert_eq!(report.total, 3);
        assert_eq!(report.groups[0].ingredient, "noix");
        assert_eq!(report.groups[0].count, 2);
        assert_eq!(report.groups[1].ingredient, "bar");
    }

    #[test]
    fn test_report_caps_examples() {
        let invalid: Vec<RecordedMention> = (0..8)
            .map(|i| mention(i, "noix", &format!("Noix de veau n°{i}")))
            .collect();
        let report = AuditReport::new(&invalid);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].examples.len(), MAX_EXAMPLES);
        assert_eq!(report.groups[0].omitted, 3);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let mut store = MemoryStore { mentions: corpus() };
        let summary =
            run_cleanup(Registry::builtin(), &mut store, CleanupMode::DryRun).unwrap();
        assert_eq!(summary.invalid.len(), 2);
        assert_eq!(summary.removed, 0);
        assert_eq!(store.mentions.len(), 5);
    }

    #[test]
    fn test_apply_removes_exactly_the_invalid_set() {
        let mut store = MemoryStore { mentions: corpus() };
        let summary =
            run_cleanup(Registry::builtin(), &mut store, CleanupMode::Apply).unwrap();
        assert_eq!(summary.checked, 5);
        assert_eq!(summary.removed, 2);
        let remaining: Vec<i32> = store.mentions.iter().map(|m| m.id).collect();
        assert_eq!(remaining, [2, 4, 5]);

        // A second pass over the cleaned corpus finds nothing.
        let again = run_cleanup(Registry::builtin(), &mut store, CleanupMode::Apply).unwrap();
        assert!(again.invalid.is_empty());
        assert_eq!(again.removed, 0);
    }

    #[test]
    fn test_apply_on_clean_corpus_is_a_no_op() {
        let mut store = MemoryStore {
            mentions: vec![mention(1, "tomate", "Tomates anciennes")],
        };
        let summary = run_cleanup(Registry::builtin(), &mut store, CleanupMode::Apply).unwrap();
        assert!(summary.invalid.is_empty());
        assert_eq!(summary.removed, 0);
        assert_eq!(store.mentions.len(), 1);
    }
}
