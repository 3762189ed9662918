//! The `export` command: aggregate the mention corpus into the two flat
//! summary documents the dashboard consumes.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Serialize;

use crate::schema::{dishes, mentions, restaurants};

/// One entry per distinct ingredient label, sorted by descending count.
#[derive(Serialize)]
struct IngredientSummary {
    id: String,
    name: String,
    category: String,
    frequency: usize,
    frequency_percent: f64,
    restaurants: usize,
    by_distinction: BTreeMap<String, usize>,
    distinction_percentages: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct DishSummary {
    id: i32,
    name: Option<String>,
    category: Option<String>,
    distinction: Option<String>,
    city: Option<String>,
}

pub fn run(conn: &mut SqliteConnection, out: &Path) -> Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    let ingredients = ingredient_summaries(conn).context("Failed to aggregate ingredients")?;
    let path = out.join("ingredients.json");
    fs::write(&path, serde_json::to_string_pretty(&ingredients)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} ingredients to {}", ingredients.len(), path.display());

    let dish_rows = dish_summaries(conn).context("Failed to load dishes")?;
    let path = out.join("dishes.json");
    fs::write(&path, serde_json::to_string_pretty(&dish_rows)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} dishes to {}", dish_rows.len(), path.display());

    Ok(())
}

fn ingredient_summaries(conn: &mut SqliteConnection) -> Result<Vec<IngredientSummary>> {
    let rows: Vec<(String, String, i32, Option<String>)> = mentions::table
        .inner_join(dishes::table.inner_join(restaurants::table))
        .select((
            mentions::ingredient,
            mentions::category,
            restaurants::id,
            restaurants::distinction,
        ))
        .load(conn)?;
    let total_dishes: i64 = dishes::table.count().get_result(conn)?;

    struct Tally {
        category: String,
        frequency: usize,
        restaurants: HashSet<i32>,
        by_distinction: BTreeMap<String, usize>,
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    for (ingredient, category, restaurant_id, distinction) in rows {
        let tally = tallies.entry(ingredient).or_insert_with(|| Tally {
            category,
            frequency: 0,
            restaurants: HashSet::new(),
            by_distinction: BTreeMap::new(),
        });
        tally.frequency += 1;
        tally.restaurants.insert(restaurant_id);
        if let Some(distinction) = distinction {
            *tally.by_distinction.entry(distinction).or_default() += 1;
        }
    }

    let mut summaries: Vec<IngredientSummary> = tallies
        .into_iter()
        .map(|(name, tally)| IngredientSummary {
            id: name.replace(' ', "-"),
            frequency_percent: percent(tally.frequency, total_dishes as usize),
            distinction_percentages: tally
                .by_distinction
                .iter()
                .map(|(distinction, count)| {
                    (distinction.clone(), percent(*count, tally.frequency))
                })
                .collect(),
            name,
            category: tally.category,
            frequency: tally.frequency,
            restaurants: tally.restaurants.len(),
            by_distinction: tally.by_distinction,
        })
        .collect();
    summaries.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.name.cmp(&b.name)));
    Ok(summaries)
}

fn dish_summaries(conn: &mut SqliteConnection) -> Result<Vec<DishSummary>> {
    let rows: Vec<(i32, Option<String>, Option<String>, Option<String>, Option<String>)> =
        dishes::table
            .inner_join(restaurants::table)
            .order(dishes::id.asc())
            .select((
                dishes::id,
                dishes::name,
                dishes::category,
                restaurants::distinction,
                restaurants::city,
            ))
            .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, name, category, distinction, city)| DishSummary {
            id,
            name,
            category,
            distinction,
            city,
        })
        .collect())
}

/// Share of `part` in `whole` as a percentage, rounded to two decimals.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}
