//! Commons API response types and normalization.
//!
//! The Action API response is loosely typed: file pages carry `imageinfo`,
//! other pages do not, and almost every nested field can be absent. Every
//! field here is optional and the normalizer decides what survives.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Raw response envelope from the Action API.
#[derive(Debug, Deserialize)]
pub struct CommonsApiResponse {
    #[serde(default)]
    pub query: Option<QueryBlock>,
}

/// The `query` block; `pages` is keyed by an opaque page id.
///
/// Deserialized into a `serde_json::Map` (with `preserve_order`) so the
/// upstream's insertion order is kept as-is, never re-sorted.
#[derive(Debug, Deserialize)]
pub struct QueryBlock {
    #[serde(default)]
    pub pages: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One page record from the upstream, with every field optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonsPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub canonicalurl: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<PageThumbnail>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub imageinfo: Option<Vec<ImageInfo>>,
}

/// Thumbnail block from `pageimages`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageThumbnail {
    #[serde(default)]
    pub source: Option<String>,
}

/// One `imageinfo` entry; only the first in the list is ever used.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumburl: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub extmetadata: Option<ExtMetadata>,
}

/// Extended metadata; only the description is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtMetadata {
    #[serde(default, rename = "ImageDescription")]
    pub image_description: Option<MetaValue>,
}

/// `extmetadata` values come wrapped in `{ "value": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// The uniform record shape returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub id: u64,
    pub title: String,
    pub thumbnail: Option<String>,
    #[serde(rename = "contentUrl")]
    pub content_url: Option<String>,
    #[serde(rename = "hostPage")]
    pub host_page: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: String,
}

impl CommonsApiResponse {
    /// Normalize every page record, keeping upstream order and dropping
    /// records that expose neither a thumbnail nor a direct content URL.
    pub fn normalize(self) -> Vec<NormalizedResult> {
        let Some(pages) = self.query.and_then(|q| q.pages) else {
            return Vec::new();
        };

        pages
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<CommonsPage>(value) {
                Ok(page) => normalize_page(page),
                Err(e) => {
                    tracing::warn!("skipping malformed page record {}: {}", key, e);
                    None
                }
            })
            .collect()
    }
}

/// Normalize a single page record.
///
/// Returns `None` when the record has neither a thumbnail nor a content URL;
/// such records are dropped regardless of safe mode.
pub fn normalize_page(page: CommonsPage) -> Option<NormalizedResult> {
    let info = page.imageinfo.as_ref().and_then(|list| list.first());

    let thumbnail = page
        .thumbnail
        .as_ref()
        .and_then(|t| t.source.clone())
        .or_else(|| info.and_then(|i| i.thumburl.clone()));
    let content_url = info.and_then(|i| i.url.clone());

    if thumbnail.is_none() && content_url.is_none() {
        return None;
    }

    let title = page.title.clone().unwrap_or_default();

    let description = info
        .and_then(|i| i.extmetadata.as_ref())
        .and_then(|m| m.image_description.as_ref())
        .and_then(|d| d.value.clone())
        .or_else(|| page.extract.clone())
        .unwrap_or_default();

    let host_page = page.canonicalurl.clone().unwrap_or_else(|| commons_page_url(&title));

    Some(NormalizedResult {
        id: page.pageid.unwrap_or_default(),
        title,
        thumbnail,
        content_url,
        host_page,
        width: info.and_then(|i| i.width),
        height: info.and_then(|i| i.height),
        description: strip_html(&description),
    })
}

/// Remove every `<...>` span and trim surrounding whitespace.
pub fn strip_html(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").trim().to_string()
}

/// Commons wiki URL for a page title, percent-encoded like
/// `encodeURIComponent`.
fn commons_page_url(title: &str) -> String {
    format!("https://commons.wikimedia.org/wiki/{}", utf8_percent_encode(title, COMPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "query": {
            "pages": {
                "317": {
                    "pageid": 317,
                    "title": "File:Lighthouse.jpg",
                    "canonicalurl": "https://commons.wikimedia.org/wiki/File:Lighthouse.jpg",
                    "thumbnail": { "source": "https://upload.wikimedia.org/thumb/Lighthouse.jpg/640px.jpg" },
                    "imageinfo": [
                        {
                            "url": "https://upload.wikimedia.org/Lighthouse.jpg",
                            "thumburl": "https://upload.wikimedia.org/thumb/Lighthouse.jpg/ii.jpg",
                            "width": 4000,
                            "height": 3000,
                            "extmetadata": {
                                "ImageDescription": { "value": "A <b>stone</b> lighthouse at dusk" }
                            }
                        }
                    ]
                },
                "42": {
                    "pageid": 42,
                    "title": "File:No urls.jpg",
                    "extract": "Nothing to show"
                },
                "7": {
                    "pageid": 7,
                    "title": "File:Extract only.png",
                    "extract": "Plain extract text",
                    "imageinfo": [
                        { "url": "https://upload.wikimedia.org/Extract_only.png" }
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn test_normalize_fixture() {
        let raw: CommonsApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = raw.normalize();

        // Page 42 has neither thumbnail nor content URL and is dropped.
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.id, 317);
        assert_eq!(first.title, "File:Lighthouse.jpg");
        assert_eq!(first.thumbnail.as_deref(), Some("https://upload.wikimedia.org/thumb/Lighthouse.jpg/640px.jpg"));
        assert_eq!(first.content_url.as_deref(), Some("https://upload.wikimedia.org/Lighthouse.jpg"));
        assert_eq!(first.host_page, "https://commons.wikimedia.org/wiki/File:Lighthouse.jpg");
        assert_eq!(first.width, Some(4000));
        assert_eq!(first.height, Some(3000));
        assert_eq!(first.description, "A stone lighthouse at dusk");
    }

    #[test]
    fn test_upstream_order_preserved() {
        // Keys deliberately not in numeric order; output must follow the
        // document, not a re-sort.
        let raw: CommonsApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = raw.normalize();
        assert_eq!(results[0].id, 317);
        assert_eq!(results[1].id, 7);
    }

    #[test]
    fn test_description_falls_back_to_extract() {
        let raw: CommonsApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = raw.normalize();
        assert_eq!(results[1].description, "Plain extract text");
    }

    #[test]
    fn test_thumbnail_falls_back_to_imageinfo() {
        let page: CommonsPage = serde_json::from_str(
            r#"{
                "pageid": 1,
                "title": "File:X.jpg",
                "imageinfo": [{ "thumburl": "https://upload.wikimedia.org/thumb/X.jpg" }]
            }"#,
        )
        .unwrap();

        let result = normalize_page(page).unwrap();
        assert_eq!(result.thumbnail.as_deref(), Some("https://upload.wikimedia.org/thumb/X.jpg"));
        assert!(result.content_url.is_none());
    }

    #[test]
    fn test_drops_record_without_any_url() {
        let page: CommonsPage =
            serde_json::from_str(r#"{ "pageid": 1, "title": "File:X.jpg", "extract": "text" }"#).unwrap();
        assert!(normalize_page(page).is_none());
    }

    #[test]
    fn test_host_page_constructed_from_title() {
        let page: CommonsPage = serde_json::from_str(
            r#"{
                "pageid": 1,
                "title": "File:Café on Main St.jpg",
                "imageinfo": [{ "url": "https://upload.wikimedia.org/Cafe.jpg" }]
            }"#,
        )
        .unwrap();

        let result = normalize_page(page).unwrap();
        assert_eq!(
            result.host_page,
            "https://commons.wikimedia.org/wiki/File%3ACaf%C3%A9%20on%20Main%20St.jpg"
        );
    }

    #[test]
    fn test_missing_fields_all_null() {
        let raw: CommonsApiResponse = serde_json::from_str(r#"{ "query": { "pages": {} } }"#).unwrap();
        assert!(raw.normalize().is_empty());

        let raw: CommonsApiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(raw.normalize().is_empty());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("A <b>stone</b> lighthouse"), "A stone lighthouse");
        assert_eq!(strip_html("  <p>padded</p>  "), "padded");
        assert_eq!(strip_html("no markup"), "no markup");
        assert_eq!(strip_html("<div class=\"x\">nested <span>tags</span></div>"), "nested tags");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_serialized_field_names() {
        let result = NormalizedResult {
            id: 1,
            title: "t".into(),
            thumbnail: None,
            content_url: Some("https://upload.wikimedia.org/x.jpg".into()),
            host_page: "https://commons.wikimedia.org/wiki/t".into(),
            width: None,
            height: None,
            description: String::new(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("contentUrl").is_some());
        assert!(json.get("hostPage").is_some());
        assert!(json.get("thumbnail").unwrap().is_null());
    }
}
