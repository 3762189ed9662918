use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid pattern for ingredient '{ingredient}': {source}")]
    InvalidPattern {
        ingredient: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown category '{category}' for ingredient '{ingredient}'")]
    UnknownCategory {
        ingredient: String,
        category: String,
    },
}
