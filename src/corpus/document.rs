use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One raw input document.
///
/// Source files store the text as a one-element array (`"text": ["..."]`).
/// That convention stays at the deserialization boundary: here `text` is just
/// an optional string. A bare string is accepted too. Anything else (missing
/// key, `null`, empty array, non-string) deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "first_string")]
    pub text: Option<String>,
    /// Carried through untouched; the cleaner never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Value>,
}

impl DocumentRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            uri: None,
        }
    }

    /// The text, if present and non-empty.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn into_usable_text(self) -> Option<String> {
        self.text.filter(|t| !t.is_empty())
    }
}

fn first_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    })
}
