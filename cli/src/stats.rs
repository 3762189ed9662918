//! The `stats` command: corpus summary printout.

use std::collections::HashMap;

use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::schema::mentions;

const TOP_INGREDIENTS: usize = 10;

pub fn run(conn: &mut SqliteConnection) -> Result<()> {
    let rows: Vec<(String, String)> = mentions::table
        .select((mentions::ingredient, mentions::category))
        .load(conn)
        .context("Failed to load mentions")?;

    let mut by_ingredient: HashMap<&str, usize> = HashMap::new();
    let mut by_category: HashMap<&str, usize> = HashMap::new();
    for (ingredient, category) in &rows {
        *by_ingredient.entry(ingredient).or_default() += 1;
        *by_category.entry(category).or_default() += 1;
    }

    println!("Total mentions: {}", rows.len());
    println!("Unique ingredients: {}", by_ingredient.len());

    println!("\nBy category:");
    for (category, count) in sorted_desc(by_category) {
        println!("  {category}: {count}");
    }

    println!("\nTop {TOP_INGREDIENTS} ingredients:");
    for (ingredient, count) in sorted_desc(by_ingredient).into_iter().take(TOP_INGREDIENTS) {
        println!("  {ingredient}: {count}");
    }

    Ok(())
}

fn sorted_desc(counts: HashMap<&str, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    entries
}
