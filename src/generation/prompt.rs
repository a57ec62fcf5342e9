//! Prompt templates sent to the generation service.

/// Prompt for translating `text` into `language`.
pub fn translate(text: &str, language: &str) -> String {
    format!("Translate `{text}` to `{language}`")
}

/// Prompt for explaining `text`.
pub fn explain(text: &str) -> String {
    format!("Please explain:\n{text}")
}
