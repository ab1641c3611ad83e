//! Test fixtures and factory functions for creating request bodies.

use serde_json::{json, Value};

use espartan_backend::store::STORAGE_KEY;

pub use drill_core::defaults::DEFAULT_DECK_ID;

/// File the store writes inside the data directory.
pub fn store_file_name() -> String {
    format!("{STORAGE_KEY}.json")
}

/// Start request over the default deck.
pub fn start_request(mode: &str, input_method: &str, range: Option<(i64, i64)>) -> Value {
    let mut body = json!({
        "deck_id": DEFAULT_DECK_ID,
        "mode": mode,
        "input_method": input_method,
    });
    if let Some((start, end)) = range {
        body["start"] = json!(start);
        body["end"] = json!(end);
    }
    body
}

pub fn verdict(session_id: &str, verdict: &str) -> Value {
    json!({ "session_id": session_id, "verdict": verdict })
}

pub fn typed(session_id: &str, text: &str) -> Value {
    json!({ "session_id": session_id, "typed": text })
}

pub fn mistake(session_id: &str, query: &str) -> Value {
    json!({ "session_id": session_id, "query": query })
}

pub fn resolve(session_id: &str) -> Value {
    json!({ "session_id": session_id })
}

/// Array-form import payload with `count` words starting at `first_id`.
pub fn word_import(first_id: i64, count: i64) -> String {
    let words: Vec<Value> = (first_id..first_id + count)
        .map(|id| {
            json!({
                "id": id,
                "spelling": format!("extra{id}"),
                "meaning_jp": format!("追加{id}"),
            })
        })
        .collect();
    Value::Array(words).to_string()
}
