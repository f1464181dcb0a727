//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use shortshare_entity::share::Attachment;
use shortshare_service::share::format_size;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One attachment as listed to the user.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AttachmentRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Type")]
    pub mime_type: String,
    #[tabled(rename = "Download")]
    pub url: String,
}

impl AttachmentRow {
    /// Build a row for `attachment` downloadable at `url`.
    pub fn new(attachment: &Attachment, url: String) -> Self {
        Self {
            name: attachment.name.clone(),
            kind: attachment.kind().to_string(),
            size: format_size(attachment.size_bytes()),
            mime_type: attachment
                .mime_type
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            url,
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single item as pretty JSON
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<16} {value}", format!("{key}:"));
}
