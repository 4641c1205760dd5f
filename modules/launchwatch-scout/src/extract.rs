// Heuristic announcement extraction from loosely structured blog markup.
// Best effort: anything that doesn't look like a launch headline is skipped.

use std::sync::LazyLock;

use launchwatch_common::AnnouncementRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::dedupe::dedupe;
use crate::infer::infer_service_name;

/// Max candidate elements inspected per page.
pub const MAX_CANDIDATES: usize = 50;

/// Titles must be strictly longer than this many characters.
const MIN_TITLE_CHARS: usize = 10;

/// Class substrings that mark a container as post-like.
const CONTAINER_CLASS_KEYWORDS: &[&str] = &["post", "article", "news", "update"];

/// A title must contain one of these (lowercased, substring match).
const ANNOUNCEMENT_KEYWORDS: &[&str] = &[
    "aws",
    "amazon",
    "launch",
    "announce",
    "new",
    "service",
    "feature",
    "available",
    "now",
    "general availability",
    "ga",
];

static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article, div").expect("valid selector"));
static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, h4").expect("valid selector"));
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, h2, h3, h4").expect("valid selector"));
static DESC_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, div").expect("valid selector"));

/// Extract announcements from raw HTML.
///
/// Candidates are `<article>` and `<div>` elements with a post-like class; pages
/// without any fall back to `h2`/`h3`/`h4` headings. Accepted records get an
/// inferred service name and the result is deduplicated by title.
pub fn extract_announcements(html: &str, link_base: &Url) -> Vec<AnnouncementRecord> {
    let document = Html::parse_document(html);

    let mut candidates: Vec<ElementRef> = document
        .select(&CONTAINER_SEL)
        .filter(is_post_container)
        .collect();
    if candidates.is_empty() {
        candidates = document.select(&HEADING_SEL).collect();
    }

    let announcements = candidates
        .into_iter()
        .take(MAX_CANDIDATES)
        .filter_map(|candidate| to_announcement(candidate, link_base))
        .collect();

    dedupe(announcements)
}

/// Title filter: long enough and mentions a launch keyword.
pub fn is_announcement_title(title: &str) -> bool {
    if title.chars().count() <= MIN_TITLE_CHARS {
        return false;
    }
    let lower = title.to_lowercase();
    ANNOUNCEMENT_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Resolve an href against the link base. Absolute http(s) links pass through.
pub fn resolve_link(raw: &str, link_base: &Url) -> String {
    if raw.starts_with("http") {
        return raw.to_string();
    }
    link_base
        .join(raw)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| link_base.to_string())
}

fn is_post_container(element: &ElementRef) -> bool {
    element.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        CONTAINER_CLASS_KEYWORDS.iter().any(|k| class.contains(k))
    })
}

fn to_announcement(candidate: ElementRef, link_base: &Url) -> Option<AnnouncementRecord> {
    let title_el = first_descendant(candidate, &TITLE_SEL).unwrap_or(candidate);
    let title = collapsed_text(title_el);
    if !is_announcement_title(&title) {
        return None;
    }

    let href = if title_el.value().name() == "a" {
        title_el.value().attr("href").unwrap_or_default()
    } else {
        ""
    };

    let description = match candidate.value().name() {
        "article" | "div" => first_descendant_where(candidate, &DESC_SEL, |el| {
            el.value()
                .attr("class")
                .is_some_and(|c| c.to_lowercase().contains("desc"))
        })
        .map(collapsed_text)
        .unwrap_or_default(),
        _ => String::new(),
    };

    let service_name = infer_service_name(&title);
    Some(AnnouncementRecord::extracted(
        title,
        service_name,
        description,
        resolve_link(href, link_base),
    ))
}

fn first_descendant<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    first_descendant_where(element, selector, |_| true)
}

/// `ElementRef::select` yields the element itself when it matches; skip it so only
/// true descendants are considered.
fn first_descendant_where<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    element
        .select(selector)
        .filter(|el| el.id() != element.id())
        .find(|el| pred(el))
}

fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
