//! Share links: `<origin>/share/<share_id>`.

use shortshare_core::config::ShareConfig;
use shortshare_core::error::AppError;
use shortshare_core::types::ShareId;

/// Builds and parses share links.
///
/// The link is the only credential a recipient needs.
#[derive(Debug, Clone)]
pub struct LinkService {
    origin: String,
}

impl LinkService {
    /// Link service for `origin`; a trailing slash is ignored.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Link service for the configured public origin.
    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(&config.public_origin)
    }

    /// The origin links are built on.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Link to a share.
    pub fn share_url(&self, share_id: &ShareId) -> String {
        format!("{}/share/{share_id}", self.origin)
    }

    /// Extract the share identifier from a full link or a bare identifier.
    ///
    /// Links from any origin are accepted; query strings and fragments are
    /// ignored.
    pub fn parse(input: &str) -> Result<ShareId, AppError> {
        let input = input.trim();
        let candidate = match input.rsplit_once("/share/") {
            Some((_, tail)) => tail
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .trim_end_matches('/'),
            None => input,
        };
        candidate
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid share link: {input}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        let links = LinkService::new("https://short.example/");
        let id = ShareId::new();
        assert_eq!(links.share_url(&id), format!("https://short.example/share/{id}"));
    }

    #[test]
    fn test_parse_link_and_bare_id() {
        let links = LinkService::new("http://localhost:5173");
        let id = ShareId::new();

        assert_eq!(LinkService::parse(&links.share_url(&id)).unwrap(), id);
        assert_eq!(LinkService::parse(&id.to_string()).unwrap(), id);
        assert_eq!(
            LinkService::parse(&format!("https://other.host/share/{id}/?ref=x#top")).unwrap(),
            id
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LinkService::parse("https://short.example/share/").is_err());
        assert!(LinkService::parse("not-a-share").is_err());
    }
}
