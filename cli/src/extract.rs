//! The `extract` command: scan every dish name for mentions not yet
//! recorded and insert them.

use std::collections::HashMap;

use anyhow::{Context, Result};
use ardoise_core::{scan_dish, Detection, DishId, Registry};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::models::NewMention;
use crate::store;

pub fn run(rules: &Registry, conn: &mut SqliteConnection) -> Result<()> {
    let found = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            let dishes = store::load_dishes(conn)?;
            let mut labels = store::labels_by_dish(conn)?;

            // Each dish's seen-set is seeded with its stored labels, so a
            // second extraction run inserts nothing.
            let mut found: Vec<(DishId, Detection)> = Vec::new();
            for dish in &dishes {
                let Some(name) = dish.name.as_deref() else {
                    continue;
                };
                let seen = labels.entry(dish.id).or_default();
                for detection in scan_dish(rules, name, seen) {
                    found.push((dish.id, detection));
                }
            }

            let rows: Vec<NewMention> = found
                .iter()
                .map(|(dish_id, detection)| NewMention {
                    dish_id: *dish_id,
                    ingredient: &detection.ingredient,
                    category: detection.category.as_str(),
                })
                .collect();
            store::insert_mentions(conn, &rows)?;

            Ok(found)
        })
        .context("Extraction pass failed")?;

    if found.is_empty() {
        println!("No new mentions found.");
        return Ok(());
    }

    let mut by_category: HashMap<&str, usize> = HashMap::new();
    for (_, detection) in &found {
        *by_category.entry(detection.category.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(&str, usize)> = by_category.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("Inserted {} new mentions:", found.len());
    for (category, count) in counts {
        println!("  {category}: {count}");
    }
    Ok(())
}
