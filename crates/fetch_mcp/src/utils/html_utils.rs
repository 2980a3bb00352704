use mime::Mime;

/// How a response body should be treated, decided once per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    HtmlLike,
    Other,
}

impl ContentKind {
    /// Classify a response from its declared Content-Type and a sniff of the
    /// first 100 characters of the body. A missing or empty Content-Type is
    /// treated as a page; servers that omit the header usually serve HTML.
    pub fn classify(content_type: Option<&str>, body: &str) -> Self {
        let head: String = body.chars().take(100).collect();
        if head.contains("<html") {
            return Self::HtmlLike;
        }

        let Some(content_type) = content_type.filter(|ct| !ct.trim().is_empty()) else {
            return Self::HtmlLike;
        };

        match content_type.parse::<Mime>() {
            Ok(mime) if mime.type_() == mime::TEXT && mime.subtype() == mime::HTML => {
                Self::HtmlLike
            }
            Ok(mime) if mime.subtype() == "xhtml" => Self::HtmlLike,
            _ => Self::Other,
        }
    }
}

/// Reduce a response body to the text the tool should return.
///
/// Returns the text and whether the raw body was used. Raw is used when the
/// caller asked for it, when the content is not HTML-like, or when the
/// markdown rewriter produced nothing usable; a failed simplification never
/// fails the fetch.
pub async fn transform(raw: String, kind: ContentKind, raw_requested: bool) -> (String, bool) {
    if raw_requested || kind == ContentKind::Other {
        return (raw, true);
    }

    match extract_content_from_html(&raw).await {
        Some(markdown) => (markdown, false),
        None => (raw, true),
    }
}

/// Convert HTML content to Markdown, or `None` when the rewriter comes back
/// empty (e.g. a page that is all script tags).
async fn extract_content_from_html(html: &str) -> Option<String> {
    let md = html2md::rewrite_html_streaming(html, false).await;
    if md.trim().is_empty() { None } else { Some(md) }
}
