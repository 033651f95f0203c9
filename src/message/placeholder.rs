//! Placeholder substitution for message templates
//!
//! Replaces `%name%` patterns with values. Unknown placeholders are left as-is
//! so a typo in a template shows up in the output instead of vanishing.

use crate::error::{MessageError, MessageResult};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%([A-Za-z0-9_]+)%").expect("placeholder pattern is valid"))
}

/// Fill `%name%` placeholders from `values`
///
/// Substitution is a single pass: values are inserted verbatim and never
/// expanded again.
pub fn render(template: &str, values: &HashMap<String, String>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fill placeholders from a flat `key, value, key, value` list
///
/// Keys may be given bare (`player`) or wrapped (`%player%`).
pub fn render_pairs(template: &str, pairs: &[&str]) -> MessageResult<String> {
    Ok(render(template, &placeholder_map(pairs)?))
}

/// Build a placeholder map from a flat `key, value` list
pub fn placeholder_map(pairs: &[&str]) -> MessageResult<HashMap<String, String>> {
    if pairs.len() % 2 != 0 {
        return Err(MessageError::UnpairedPlaceholders(pairs.len()));
    }

    let mut values = HashMap::new();
    for pair in pairs.chunks(2) {
        let key = pair[0].trim_matches('%');
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(MessageError::InvalidPlaceholder(pair[0].to_string()));
        }
        values.insert(key.to_string(), pair[1].to_string());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_placeholder() {
        let mut values = HashMap::new();
        values.insert("player".to_string(), "alice".to_string());

        assert_eq!(render("Gave votes to %player%!", &values), "Gave votes to alice!");
    }

    #[test]
    fn test_multiple_placeholders() {
        let pairs = ["player", "bob", "%amount%", "7"];
        let result = render_pairs("%player% now has %amount% votes", &pairs).unwrap();
        assert_eq!(result, "bob now has 7 votes");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let values = HashMap::new();
        assert_eq!(render("Hello, %undefined%!", &values), "Hello, %undefined%!");
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let result = render_pairs("%a% %b%", &["a", "%b%", "b", "x"]).unwrap();
        assert_eq!(result, "%b% x");
    }

    #[test]
    fn test_percent_signs_without_name() {
        let values = HashMap::new();
        assert_eq!(render("100% sure, 50%% off", &values), "100% sure, 50%% off");
    }

    #[test]
    fn test_unpaired_arguments() {
        let result = render_pairs("%a%", &["a"]);
        assert!(matches!(result, Err(MessageError::UnpairedPlaceholders(1))));
    }

    #[test]
    fn test_invalid_key() {
        let result = render_pairs("%a%", &["a b", "x"]);
        assert!(matches!(result, Err(MessageError::InvalidPlaceholder(_))));

        let result = render_pairs("%a%", &["%%", "x"]);
        assert!(matches!(result, Err(MessageError::InvalidPlaceholder(_))));
    }
}
