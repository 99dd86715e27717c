//! Markup-aware linkifier: rewrite bare URLs in HTML text content into
//! anchor elements, without altering existing tags or attribute values.
//!
//! The input is lexed into an ordered sequence of [`Segment`]s by a
//! generic `<...>` tag pattern — a stateless scan, not an HTML parser.
//! Tag segments are emitted verbatim and never scanned for URLs, which is
//! what guarantees attribute values (including existing `href`s) are never
//! touched. Malformed/unclosed tags, comments, and CDATA get no special
//! handling, and `<script>`/`<style>` bodies are ordinary text segments —
//! bare URLs inside them are linkified too. Accepted limitation.

use once_cell::sync::Lazy;
use regex::Regex;

/// One complete `<...>` construct.
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A bare URL: `http(s)://` or `www.` followed by URL-safe characters.
/// Case-insensitive so `HTTPS://` schemes are caught.
static RE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\](){}]+|www\.[^\s<>"{}|\\^`\[\](){}]+"#).unwrap()
});

/// Whether a span of HTML is markup or text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A single complete `<...>` construct.
    Tag,
    /// Content between tags; never contains an unescaped `<`.
    Text,
}

/// A contiguous span of an HTML string.
///
/// [`segment_html`] produces an ordered, lossless partition: concatenating
/// every segment's `content` reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub content: &'a str,
}

/// Lex an HTML string into tag and text segments.
///
/// Whitespace-only gaps between tags are kept as text segments so the
/// concatenation invariant holds; the rewriter skips them (a whitespace
/// run cannot contain a URL, so skipping is unobservable).
pub fn segment_html(html: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in RE_TAG.find_iter(html) {
        if m.start() > last {
            segments.push(Segment {
                kind: SegmentKind::Text,
                content: &html[last..m.start()],
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Tag,
            content: m.as_str(),
        });
        last = m.end();
    }

    if last < html.len() {
        segments.push(Segment {
            kind: SegmentKind::Text,
            content: &html[last..],
        });
    }

    segments
}

/// Rewrite every bare URL in HTML text content into an anchor element.
///
/// Tags pass through verbatim; only text segments are scanned. A matched
/// URL starting with `www.` gets an `http://`-prefixed href; otherwise the
/// href is the match verbatim. Href and visible label are HTML-escaped
/// independently.
pub fn linkify_bare_urls(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + 64);

    for segment in segment_html(html) {
        match segment.kind {
            SegmentKind::Tag => out.push_str(segment.content),
            SegmentKind::Text => {
                if segment.content.trim().is_empty() {
                    out.push_str(segment.content);
                } else {
                    out.push_str(&rewrite_urls(segment.content));
                }
            }
        }
    }

    out
}

fn rewrite_urls(text: &str) -> String {
    RE_URL
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let url = &caps[0];
            let href = if url.starts_with("www.") {
                format!("http://{url}")
            } else {
                url.to_string()
            };

            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape_href(&href),
                escape_label(url)
            )
        })
        .into_owned()
}

/// Escape for the href attribute value: `& < > "`.
fn escape_href(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape for the visible label: `& < >`.
fn escape_label(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
