/// Drops a surrounding Markdown code fence (```text ... ```) if the model added one.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let mut inner = trimmed;
    // The opening fence may carry a language tag; skip the whole first line.
    if let Some((_, rest)) = inner.split_once('\n') {
        inner = rest;
    } else {
        inner = inner.trim_start_matches('`');
    }
    if let Some(end) = inner.rfind("```") {
        inner = &inner[..end];
    }
    inner.trim()
}
