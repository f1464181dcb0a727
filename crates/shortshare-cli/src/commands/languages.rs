//! Language label listing.

use serde::Serialize;
use tabled::Tabled;

use shortshare_entity::share::{LANGUAGES, code_class, normalize_language};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct LanguageRow {
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Stored as")]
    stored: String,
    #[tabled(rename = "Highlight class")]
    class: String,
}

/// Print every selectable label with its stored form.
pub fn execute(format: OutputFormat) {
    let rows: Vec<LanguageRow> = LANGUAGES
        .iter()
        .map(|&label| {
            let stored = normalize_language(Some(label));
            LanguageRow {
                label,
                class: code_class(stored.as_deref()),
                stored: stored.unwrap_or_else(|| "(none)".to_string()),
            }
        })
        .collect();
    output::print_list(&rows, format);
}
