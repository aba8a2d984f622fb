//! Casing-tolerant field name resolution
//!
//! ArangoDB responses mix `lowerCamelCase`, `UpperCamelCase`, and
//! `snake_case` keys depending on the endpoint. Lookups resolve a requested
//! name against the available spellings with a fixed priority: exact match,
//! then lowerCamel, then UpperCamel, then snake_case. Exact spelling wins
//! when variants coexist.
//!
//! The functions here are pure and independent of any container type.

/// Split a field name into lowercase words on underscores, dashes, and
/// camel-case boundaries.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a field name to `lowerCamelCase`
pub fn to_lower_camel(name: &str) -> String {
    let words = split_words(name);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert a field name to `UpperCamelCase`
pub fn to_upper_camel(name: &str) -> String {
    split_words(name).iter().map(|w| capitalize(w)).collect()
}

/// Convert a field name to `snake_case`
pub fn to_snake_case(name: &str) -> String {
    split_words(name).join("_")
}

/// Resolve a requested field name against the spellings that actually exist.
///
/// `exists` is probed with each candidate spelling in priority order; the
/// first existing spelling is returned. Returns `None` when no spelling of
/// the requested name exists.
pub fn resolve_key(requested: &str, mut exists: impl FnMut(&str) -> bool) -> Option<String> {
    let mut candidates = vec![requested.to_string()];
    for variant in [
        to_lower_camel(requested),
        to_upper_camel(requested),
        to_snake_case(requested),
    ] {
        if !candidates.contains(&variant) {
            candidates.push(variant);
        }
    }
    candidates.into_iter().find(|c| exists(c))
}
