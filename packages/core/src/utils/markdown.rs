//! Markdown helpers
//!
//! Two directions:
//!
//! - **Export**: render a content tree as markdown. Paragraphs become blocks,
//!   section headings become `#` lines whose depth follows the nesting, and
//!   summaries are left out.
//! - **Plain text**: strip inline markdown from a title so it can be turned
//!   into a URL slug.

use crate::models::{NoHeadingContent, Section, SectionContainer};
use regex::Regex;
use std::sync::LazyLock;

/// Inline markup, in application order
///
/// Images go before links (both use brackets), bold before italic (`**`
/// contains `*`).
static INLINE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"!\[([^\]]*)\]\([^)]+\)", "$1"),
        (r"\[([^\]]+)\]\([^)]+\)", "$1"),
        (r"`([^`]+)`", "$1"),
        (r"\*\*([^*]+)\*\*", "$1"),
        (r"__([^_]+)__", "$1"),
        (r"~~([^~]+)~~", "$1"),
        (r"\*([^*]+)\*", "$1"),
        (r"_([^_]+)_", "$1"),
        (r"<[^>]+>", ""),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Block markers at the start of a line: headings, quotes, list bullets
static LINE_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(#{1,6}\s+|>\s*|\d+\.\s+|[-*+]\s+)").ok());

static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

static NON_ALPHANUMERIC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").ok());

/// Strip markdown formatting, leaving single-spaced plain text
///
/// # Examples
///
/// ```
/// use quire_core::utils::strip_markdown;
///
/// assert_eq!(strip_markdown("## Project **Planning**"), "Project Planning");
/// assert_eq!(strip_markdown("see [the docs](http://example.com)"), "see the docs");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut text = match LINE_PREFIX.as_ref() {
        Some(re) => re.replace_all(content, "").into_owned(),
        None => content.to_string(),
    };
    for (pattern, replacement) in INLINE_PATTERNS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(text.trim(), " ").into_owned(),
        None => text.trim().to_string(),
    }
}

/// Turn a title into a URL slug
///
/// Markdown is stripped, the text lowercased and every run of characters
/// that is not a letter or digit collapsed to a single `-`.
///
/// # Examples
///
/// ```
/// use quire_core::utils::slugify;
///
/// assert_eq!(slugify("My **First** Notes"), "my-first-notes");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = strip_markdown(title).to_lowercase();
    let dashed = match NON_ALPHANUMERIC.as_ref() {
        Some(re) => re.replace_all(&lowered, "-").into_owned(),
        None => lowered,
    };
    dashed.trim_matches('-').to_string()
}

/// Render `section` with its heading at `level`
///
/// Nested sections and the sections of nested containers go one level deeper.
pub fn section_to_markdown(section: &Section, level: usize) -> String {
    let mut markdown = format!("{} {}\n\n", "#".repeat(level), section.heading.content);
    write_nodes(&mut markdown, &section.children, level);
    markdown
}

/// Render the sections of `container` with their headings at `level`
pub fn container_to_markdown(container: &SectionContainer, level: usize) -> String {
    let mut markdown = String::new();
    for section in &container.children {
        markdown.push_str(&section_to_markdown(section, level));
    }
    markdown
}

/// Render a tree root; top-level sections get `#` headings
pub fn content_to_markdown(node: &NoHeadingContent) -> String {
    let mut markdown = String::new();
    write_nodes(&mut markdown, std::slice::from_ref(node), 0);
    markdown
}

/// Append `nodes`, which sit inside something rendered at `level`
fn write_nodes(out: &mut String, nodes: &[NoHeadingContent], level: usize) {
    for node in nodes {
        match node {
            NoHeadingContent::Paragraph(p) => {
                out.push_str(&p.content);
                out.push_str("\n\n");
            }
            NoHeadingContent::Section(s) => out.push_str(&section_to_markdown(s, level + 1)),
            NoHeadingContent::SectionContainer(c) => {
                out.push_str(&container_to_markdown(c, level + 1))
            }
            // Untitled sections add no heading, so their content stays at this depth
            NoHeadingContent::UntitledSection(u) => write_nodes(out, &u.children, level),
        }
    }
}
