//! Post body normalization.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid url regex"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

/// Strips links, mentions, hashtag markers, and line breaks from a post body.
///
/// Steps run in order: URL-like tokens are removed, newlines become spaces,
/// `@handle` mentions are removed, `#` markers are dropped while the tag text
/// is kept, and finally the result is trimmed with interior whitespace runs
/// collapsed to a single space.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    let single_line = without_urls.replace('\n', " ");
    let without_mentions = MENTION_RE.replace_all(&single_line, "");
    let without_markers = without_mentions.replace('#', "");

    without_markers
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
