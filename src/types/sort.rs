use handle_errors::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Ordering applied to the visible question list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first, by creation timestamp.
    #[default]
    #[serde(rename = "date")]
    ByDate,
    /// Highest vote count first.
    #[serde(rename = "votes")]
    ByVotes,
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortMode::ByDate),
            "votes" => Ok(SortMode::ByVotes),
            other => Err(Error::InvalidSortMode(other.to_string())),
        }
    }
}

/// Extract the sort mode from the `/sort` query
/// # Example query
/// `/sort?mode=votes`
/// # Example usage
/// ```rust
/// let mut query = HashMap::new();
/// query.insert("mode".to_string(), "votes".to_string());
/// let mode = types::sort::extract_sort_mode(query).unwrap();
/// assert_eq!(mode, SortMode::ByVotes);
/// ```
pub fn extract_sort_mode(params: HashMap<String, String>) -> Result<SortMode, Error> {
    match params.get("mode") {
        Some(mode) => mode.parse::<SortMode>(),
        None => Err(Error::MissingParameters),
    }
}
