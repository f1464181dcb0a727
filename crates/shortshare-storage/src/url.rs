//! Public URL and key helpers shared by the providers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use shortshare_core::error::AppError;
use shortshare_core::result::AppResult;

/// Characters escaped inside a URL path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Join `key` onto `base_url`, percent-encoding each path segment.
pub fn public_url(base_url: &str, key: &str) -> String {
    let encoded = key
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", base_url.trim_end_matches('/'), encoded)
}

/// Reject keys that are empty, absolute, or escape their share prefix.
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() || key.starts_with('/') || key.contains('\\') {
        return Err(AppError::validation(format!("Invalid storage key: '{key}'")));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(AppError::validation(format!("Invalid storage key: '{key}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_encodes_segments() {
        assert_eq!(
            public_url("https://cdn.example/share-files/", "abc/my report.pdf"),
            "https://cdn.example/share-files/abc/my%20report.pdf"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("0b6e/a.txt").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("abc/../secret").is_err());
        assert!(validate_key("abc//a.txt").is_err());
    }
}
