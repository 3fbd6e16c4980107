use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts a form field sent either as a JSON string or a JSON number and
/// keeps it as text so coercion happens in one place. `null` reads as absent.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FormValue>::deserialize(deserializer)?;

    Ok(value.map(|value| match value {
        FormValue::Text(text) => text,
        FormValue::Number(number) => number.to_string(),
    }))
}
