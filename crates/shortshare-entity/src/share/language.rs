//! Language labels offered for code shares.

/// Sentinel label meaning "no language"; stored as `NULL`.
pub const PLAIN_TEXT: &str = "Plain Text";

/// Labels a creator can pick for a code share, in display order.
pub const LANGUAGES: &[&str] = &[
    PLAIN_TEXT,
    "JavaScript",
    "Python",
    "Java",
    "C",
    "C++",
    "C#",
    "TypeScript",
    "Go",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Rust",
    "HTML",
    "CSS",
    "JSON",
    "Shell",
    "SQL",
    "Other",
];

/// Normalize a selected label into its stored form.
///
/// `None`, blank, and the [`PLAIN_TEXT`] sentinel become `None`; any other
/// label is stored lowercased.
pub fn normalize_language(label: Option<&str>) -> Option<String> {
    let label = label?.trim();
    if label.is_empty() || label == PLAIN_TEXT {
        return None;
    }
    Some(label.to_lowercase())
}

/// Syntax-highlighting class for a stored language label.
pub fn code_class(language: Option<&str>) -> String {
    format!("language-{}", language.unwrap_or("plaintext"))
}
