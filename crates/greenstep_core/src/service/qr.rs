//! QR target derivation.
//!
//! # Responsibility
//! - Map a tree id to its canonical deep link.
//! - Build the third-party QR renderer URL that encodes that deep link.
//!
//! # Invariants
//! - Derivation is pure: same config + id always yields the same strings.
//! - The `data` query parameter of `image_url` decodes to `deep_link`.

use crate::config::CatalogConfig;
use url::Url;

const DEEP_LINK_PATH: &str = "/tree/";

/// Deep link plus the QR image URL that renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrTarget {
    /// `<origin>/tree/<id>`.
    pub deep_link: String,
    /// Renderer URL with the deep link URL-encoded as `data`.
    pub image_url: String,
}

impl QrTarget {
    /// Deep link without the scheme, as shown next to the QR image.
    pub fn display_link(&self) -> &str {
        self.deep_link
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(self.deep_link.as_str())
    }
}

/// Builds `<origin>/tree/<id>`.
pub fn deep_link(config: &CatalogConfig, id: &str) -> String {
    format!(
        "{}{DEEP_LINK_PATH}{id}",
        config.app_origin.trim_end_matches('/')
    )
}

/// Derives the deep link and QR image URL for one tree id.
pub fn derive_qr_target(config: &CatalogConfig, id: &str) -> QrTarget {
    let deep_link = deep_link(config, id);
    let params = [
        ("size", config.qr_size.as_str()),
        ("data", deep_link.as_str()),
        ("bgcolor", config.qr_background.as_str()),
        ("color", config.qr_foreground.as_str()),
    ];
    let image_url = match Url::parse_with_params(&config.qr_endpoint, params) {
        Ok(url) => url.to_string(),
        // Unvalidated endpoint: fall back to plain concatenation.
        Err(_) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            format!("{}?{query}", config.qr_endpoint)
        }
    };

    QrTarget {
        deep_link,
        image_url,
    }
}

/// Recovers the tree id from a deep link produced under `config`.
pub fn tree_id_from_deep_link<'a>(config: &CatalogConfig, link: &'a str) -> Option<&'a str> {
    link.strip_prefix(config.app_origin.trim_end_matches('/'))?
        .strip_prefix(DEEP_LINK_PATH)
}

#[cfg(test)]
mod tests {
    use super::{derive_qr_target, tree_id_from_deep_link};
    use crate::config::CatalogConfig;

    #[test]
    fn default_target_matches_renderer_template() {
        let target = derive_qr_target(&CatalogConfig::default(), "tree-001");
        assert_eq!(target.deep_link, "https://greenstep-app.com/tree/tree-001");
        assert_eq!(
            target.image_url,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=https%3A%2F%2Fgreenstep-app.com%2Ftree%2Ftree-001&bgcolor=f0f9f0&color=2d5a2d"
        );
    }

    #[test]
    fn display_link_drops_scheme() {
        let target = derive_qr_target(&CatalogConfig::default(), "tree-004");
        assert_eq!(target.display_link(), "greenstep-app.com/tree/tree-004");
    }

    #[test]
    fn id_is_recovered_from_deep_link() {
        let config = CatalogConfig::default();
        let target = derive_qr_target(&config, "tree-006");
        assert_eq!(
            tree_id_from_deep_link(&config, &target.deep_link),
            Some("tree-006")
        );
        assert_eq!(
            tree_id_from_deep_link(&config, "https://elsewhere.org/tree/x"),
            None
        );
    }
}
