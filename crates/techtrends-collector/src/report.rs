//! Plain-text trend report.

use std::fmt::Write;

use techtrends_core::PostRecord;

const POSTS_PER_TOPIC: usize = 3;
const PREVIEW_CHARS: usize = 200;

/// Renders posts grouped by topic.
///
/// Groups appear in order of first appearance in `posts`. Each group lists
/// at most three posts, each truncated to its first 200 characters.
#[must_use]
pub fn format_report(posts: &[PostRecord]) -> String {
    let mut topics: Vec<&str> = Vec::new();
    for post in posts {
        if !topics.contains(&post.topic.as_str()) {
            topics.push(&post.topic);
        }
    }

    let mut report = String::from("🚀 Tech Trends Report\n\n");

    for topic in topics {
        let _ = writeln!(report, "📌 {topic}");

        for post in posts
            .iter()
            .filter(|p| p.topic == topic)
            .take(POSTS_PER_TOPIC)
        {
            let preview: String = post.content.chars().take(PREVIEW_CHARS).collect();
            let _ = writeln!(report, "- {preview}...");
            let _ = writeln!(report, "  Engagement: {}\n", post.engagement);
        }

        report.push('\n');
    }

    report
}
