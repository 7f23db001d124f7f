//! Email and name extraction from free text.

use regex::Regex;
use std::sync::OnceLock;

/// Find every email address in a blob of text, lowercased.
///
/// Works the same on comma-separated recipient lists and arbitrary prose
/// (e.g. an "addresses included" cell). Fragments that don't look like an
/// address are skipped, never an error.
pub fn emails_in(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE
        .get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
    re.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn domain_of(email: &str) -> &str {
    email.split_once('@').map(|(_, d)| d).unwrap_or("")
}

/// Guess a display name from the local part ("j.smith" -> "J Smith").
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    title_case(&local.replace(['.', '_', '-'], " "))
}

/// Normalize a raw person-name cell. Honorifics are dropped, pipe-separated
/// multi-name cells keep the first usable entry. Returns None when nothing
/// usable remains ("", "Unknown").
pub fn clean_person_name(raw: &str) -> Option<String> {
    static HONORIFIC_RE: OnceLock<Regex> = OnceLock::new();
    let re = HONORIFIC_RE
        .get_or_init(|| Regex::new(r"(?i)\b(Mr|Mrs|Ms|Dr|Prof|Sir|Lord|Lady)\b\.?\s*").unwrap());

    let stripped = re.replace_all(raw.trim(), "");
    let candidate = stripped
        .split('|')
        .map(str::trim)
        .find(|n| !n.is_empty() && *n != "Unknown")?;
    Some(candidate.to_string())
}

pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
