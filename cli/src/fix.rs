//! The `fix` command: label maintenance on stored mentions.
//!
//! Two passes, both relabeling in place so mention identity survives:
//! spelling normalization (`celeri` becomes `céleri`) and subtype
//! resolution (`chou` becomes `choucroute` when the dish name says so).
//! When the target label already exists for the same dish, the row is
//! merged away instead, keeping per-dish labels unique.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use ardoise_core::{resolve_subtype, Registry};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::store;

pub fn run(rules: &Registry, conn: &mut SqliteConnection) -> Result<()> {
    let (spelling, subtypes) = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            let spelling = fix_spelling(rules, conn)?;
            let subtypes = fix_subtypes(rules, conn)?;
            Ok((spelling, subtypes))
        })
        .context("Fix pass failed")?;

    println!("Normalized {spelling} misspelled labels");
    println!("Resolved {subtypes} generic labels to subtypes");
    Ok(())
}

fn fix_spelling(rules: &Registry, conn: &mut SqliteConnection) -> QueryResult<usize> {
    let mut labels = store::labels_by_dish(conn)?;
    let mut fixed = 0;

    for (from, to) in rules.spelling_fixes() {
        for (mention, _) in store::mentions_labeled(conn, from)? {
            apply_relabel(conn, &mut labels, mention.dish_id, mention.id, to)?;
            fixed += 1;
        }
    }
    Ok(fixed)
}

fn fix_subtypes(rules: &Registry, conn: &mut SqliteConnection) -> QueryResult<usize> {
    let mut labels = store::labels_by_dish(conn)?;
    let mut resolved = 0;

    for generic in rules.subtype_generics() {
        for (mention, dish_name) in store::mentions_labeled(conn, generic)? {
            let subtype = resolve_subtype(rules, generic, &dish_name);
            if subtype == generic {
                continue;
            }
            apply_relabel(conn, &mut labels, mention.dish_id, mention.id, subtype)?;
            resolved += 1;
        }
    }
    Ok(resolved)
}

/// Rename the mention to `label`, or delete it when the dish already
/// carries that label.
fn apply_relabel(
    conn: &mut SqliteConnection,
    labels: &mut HashMap<i32, HashSet<String>>,
    dish_id: i32,
    mention_id: i32,
    label: &str,
) -> QueryResult<()> {
    let seen = labels.entry(dish_id).or_default();
    if seen.contains(&label.to_lowercase()) {
        store::delete_mention(conn, mention_id)?;
        tracing::debug!(mention_id, label, "merged into existing label");
    } else {
        store::relabel_mention(conn, mention_id, label)?;
        seen.insert(label.to_lowercase());
    }
    Ok(())
}
