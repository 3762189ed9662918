use serde::{Deserialize, Serialize};

/// Row id of a dish in the corpus database.
pub type DishId = i32;

/// Row id of a recorded ingredient mention.
pub type MentionId = i32;

/// Ingredient categories the rule table may produce.
///
/// The set is closed: a rule naming anything else is rejected when the
/// registry is built. Mentions already stored under other category labels
/// pass through the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Epice,
    Herbe,
    ProduitLaitier,
    Cereale,
    Condiment,
    Legume,
    Champignon,
    Fruit,
    Viande,
    Poisson,
}

impl Category {
    /// All known categories.
    pub const ALL: &'static [Category] = &[
        Category::Epice,
        Category::Herbe,
        Category::ProduitLaitier,
        Category::Cereale,
        Category::Condiment,
        Category::Legume,
        Category::Champignon,
        Category::Fruit,
        Category::Viande,
        Category::Poisson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Epice => "epice",
            Category::Herbe => "herbe",
            Category::ProduitLaitier => "produit_laitier",
            Category::Cereale => "cereale",
            Category::Condiment => "condiment",
            Category::Legume => "legume",
            Category::Champignon => "champignon",
            Category::Fruit => "fruit",
            Category::Viande => "viande",
            Category::Poisson => "poisson",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "epice" => Some(Category::Epice),
            "herbe" => Some(Category::Herbe),
            "produit_laitier" => Some(Category::ProduitLaitier),
            "cereale" => Some(Category::Cereale),
            "condiment" => Some(Category::Condiment),
            "legume" => Some(Category::Legume),
            "champignon" => Some(Category::Champignon),
            "fruit" => Some(Category::Fruit),
            "viande" => Some(Category::Viande),
            "poisson" => Some(Category::Poisson),
            _ => None,
        }
    }
}

/// An ingredient found in a dish name by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub ingredient: String,
    pub category: Category,
}

/// A mention as stored in the corpus database, joined with the name of
/// the dish it belongs to. A missing dish name is carried as an empty
/// string; validation treats it like any other name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMention {
    pub id: MentionId,
    pub dish_id: DishId,
    pub ingredient: String,
    pub category: String,
    pub dish_name: String,
}
