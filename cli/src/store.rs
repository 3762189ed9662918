//! Diesel-backed access to the corpus database.
//!
//! Reads come back in id order so batch passes are reproducible. Dishes
//! without a name surface as an empty string, which the engine treats
//! like any other dish name.

use std::collections::{HashMap, HashSet};

use ardoise_core::{MentionId, MentionStore, RecordedMention};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::models::{Dish, Mention, NewMention};
use crate::schema::{dishes, mentions};

pub fn load_dishes(conn: &mut SqliteConnection) -> QueryResult<Vec<Dish>> {
    dishes::table
        .order(dishes::id.asc())
        .select(Dish::as_select())
        .load(conn)
}

/// All recorded mentions joined with the name of their owning dish.
pub fn load_recorded_mentions(conn: &mut SqliteConnection) -> QueryResult<Vec<RecordedMention>> {
    let rows: Vec<(i32, i32, String, String, Option<String>)> = mentions::table
        .inner_join(dishes::table)
        .order(mentions::id.asc())
        .select((
            mentions::id,
            mentions::dish_id,
            mentions::ingredient,
            mentions::category,
            dishes::name,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, dish_id, ingredient, category, dish_name)| RecordedMention {
            id,
            dish_id,
            ingredient,
            category,
            dish_name: dish_name.unwrap_or_default(),
        })
        .collect())
}

/// Lower-cased ingredient labels already recorded, keyed by dish id.
pub fn labels_by_dish(conn: &mut SqliteConnection) -> QueryResult<HashMap<i32, HashSet<String>>> {
    let rows: Vec<(i32, String)> = mentions::table
        .select((mentions::dish_id, mentions::ingredient))
        .load(conn)?;

    let mut by_dish: HashMap<i32, HashSet<String>> = HashMap::new();
    for (dish_id, ingredient) in rows {
        by_dish
            .entry(dish_id)
            .or_default()
            .insert(ingredient.to_lowercase());
    }
    Ok(by_dish)
}

/// Mentions carrying exactly this label, with their dish names.
pub fn mentions_labeled(
    conn: &mut SqliteConnection,
    label: &str,
) -> QueryResult<Vec<(Mention, String)>> {
    let rows: Vec<(Mention, Option<String>)> = mentions::table
        .inner_join(dishes::table)
        .filter(mentions::ingredient.eq(label))
        .order(mentions::id.asc())
        .select((Mention::as_select(), dishes::name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(mention, dish_name)| (mention, dish_name.unwrap_or_default()))
        .collect())
}

pub fn insert_mentions(conn: &mut SqliteConnection, rows: &[NewMention<'_>]) -> QueryResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    diesel::insert_into(mentions::table).values(rows).execute(conn)
}

pub fn relabel_mention(
    conn: &mut SqliteConnection,
    mention_id: MentionId,
    label: &str,
) -> QueryResult<usize> {
    diesel::update(mentions::table.find(mention_id))
        .set(mentions::ingredient.eq(label))
        .execute(conn)
}

pub fn delete_mention(conn: &mut SqliteConnection, mention_id: MentionId) -> QueryResult<usize> {
    diesel::delete(mentions::table.find(mention_id)).execute(conn)
}

/// [`MentionStore`] over a borrowed connection, so the cleanup pass can
/// run inside a transaction owned by the caller.
pub struct DbStore<'a> {
    pub conn: &'a mut SqliteConnection,
}

impl MentionStore for DbStore<'_> {
    type Error = diesel::result::Error;

    fn load_mentions(&mut self) -> Result<Vec<RecordedMention>, Self::Error> {
        load_recorded_mentions(self.conn)
    }

    fn delete_mentions(&mut self, ids: &[MentionId]) -> Result<usize, Self::Error> {
        diesel::delete(mentions::table.filter(mentions::id.eq_any(ids.iter().copied())))
            .execute(self.conn)
    }
}
