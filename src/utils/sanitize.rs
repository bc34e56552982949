use std::collections::HashSet;

/// Remove every HTML tag, keeping the text content. Script and style bodies are dropped.
pub fn strip_markup(raw: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(raw)
        .to_string()
}
