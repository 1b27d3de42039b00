use std::collections::BTreeMap;

/// Per-word records keyed by the word text. Values are kept as raw JSON so
/// files written by other tools load unchanged.
pub type WordMap = BTreeMap<String, serde_json::Value>;

pub const STATE_FILE: &str = "state.json";
pub const HISTORY_FILE: &str = "history.json";

/// Everything read from the data directory at startup.
#[derive(Clone, Debug, Default)]
pub struct PersistedData {
    pub state: WordMap,
    pub history: WordMap,
}
