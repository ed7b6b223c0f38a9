//! Commons search request types and parameter building.

/// Smallest page size the proxy will request upstream.
pub const PER_PAGE_MIN: u32 = 8;

/// Largest page size the proxy will request upstream.
pub const PER_PAGE_MAX: u32 = 48;

/// Page size when the caller does not specify one.
pub const PER_PAGE_DEFAULT: u32 = 24;

/// A validated search query with pagination already resolved.
///
/// `new` applies the caller-facing rules once, so everything downstream can
/// rely on `page >= 1` and `per_page` within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub page: u32,
    pub per_page: u32,
}

impl SearchQuery {
    /// Build a query, flooring `page` to 1 and clamping `per_page` to
    /// [`PER_PAGE_MIN`, `PER_PAGE_MAX`].
    pub fn new(q: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self { q: q.into(), page: page.max(1), per_page: per_page.clamp(PER_PAGE_MIN, PER_PAGE_MAX) }
    }

    /// Validate the query string. Whitespace-only counts as missing.
    pub fn validate(&self) -> Result<(), crate::commons::CommonsError> {
        if self.q.trim().is_empty() {
            return Err(crate::commons::CommonsError::InvalidQuery("query cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Offset into the upstream result set. `page` is floored to 1 at
    /// construction, so this never underflows; the widening multiply keeps
    /// absurdly large page numbers from wrapping.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.per_page)
    }

    /// Full MediaWiki Action API parameter set for this query.
    ///
    /// Uses `generator=search` over the File namespace with image info
    /// (direct URL, mime, dimensions, extended metadata), a thumbnail
    /// rendered at `thumb_size`, a plain-text intro extract, and the page's
    /// canonical URL.
    pub fn params(&self, thumb_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("generator", "search".to_string()),
            ("gsrsearch", self.q.clone()),
            ("gsrnamespace", "6".to_string()),
            ("gsrlimit", self.per_page.to_string()),
            ("gsroffset", self.offset().to_string()),
            ("prop", "imageinfo|pageimages|extracts|info".to_string()),
            ("iiprop", "url|size|mime|extmetadata".to_string()),
            ("iiurlwidth", thumb_size.to_string()),
            ("pithumbsize", thumb_size.to_string()),
            ("inprop", "url".to_string()),
            ("exintro", "1".to_string()),
            ("explaintext", "1".to_string()),
        ]
    }
}
