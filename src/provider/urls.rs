//! Provider URL metadata.

use indexmap::IndexMap;

/// Static URLs describing a provider. None of them is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Urls {
    pub documentation: Option<String>,
    pub site: Option<String>,
    pub status: Option<String>,
}

impl Urls {
    pub fn new(
        documentation: impl Into<String>,
        site: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            documentation: Some(documentation.into()),
            site: Some(site.into()),
            status: Some(status.into()),
        }
    }
}

/// Access to a provider's URLs.
pub trait HasUrls {
    fn documentation_url(&self) -> Option<&str>;

    fn site_url(&self) -> Option<&str>;

    fn status_url(&self) -> Option<&str>;

    /// All URLs keyed by kind: `documentation`, `site`, `status`.
    fn urls(&self) -> IndexMap<&'static str, Option<&str>> {
        IndexMap::from([
            ("documentation", self.documentation_url()),
            ("site", self.site_url()),
            ("status", self.status_url()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Urls);

    impl HasUrls for Fixed {
        fn documentation_url(&self) -> Option<&str> {
            self.0.documentation.as_deref()
        }
        fn site_url(&self) -> Option<&str> {
            self.0.site.as_deref()
        }
        fn status_url(&self) -> Option<&str> {
            self.0.status.as_deref()
        }
    }

    #[test]
    fn urls_map_has_every_kind() {
        let fixed = Fixed(Urls {
            site: Some("https://example.org".into()),
            ..Default::default()
        });
        let urls = fixed.urls();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls["site"], Some("https://example.org"));
        assert_eq!(urls["documentation"], None);
        assert_eq!(urls["status"], None);
    }
}
