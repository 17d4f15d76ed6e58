//! Search request types

use serde::{Deserialize, Deserializer, Serialize};

/// How a search is answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Nearest-neighbor passage retrieval
    #[default]
    Vector,
    /// Retrieval-augmented answer from the language model
    Llm,
}

/// Body of `POST /search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Natural-language query
    #[serde(default)]
    pub query: String,

    /// `vector` (default, also for `null`) or `llm`
    #[serde(default, deserialize_with = "mode_or_default")]
    pub mode: SearchMode,

    /// Number of passages for vector mode (defaults to the configured top_k)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl SearchRequest {
    /// True when the query has no searchable content
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

fn mode_or_default<'de, D>(deserializer: D) -> Result<SearchMode, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SearchMode>::deserialize(deserializer).map(Option::unwrap_or_default)
}
