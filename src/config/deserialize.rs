// ABOUTME: Custom serde deserializers for config values.
// ABOUTME: Lets YAML properties be written either as strings or as bare numbers.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum TextEntry {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl TextEntry {
    fn into_string(self) -> String {
        match self {
            TextEntry::Text(s) => s,
            TextEntry::Integer(n) => n.to_string(),
            TextEntry::Float(n) => n.to_string(),
            TextEntry::Bool(b) => b.to_string(),
        }
    }
}

pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entry: Option<TextEntry> = Option::deserialize(deserializer)?;
    Ok(entry.map(TextEntry::into_string))
}
