//! Word count and goal progress over body markup.

/// Tags whose boundaries separate words even when no whitespace is present
/// in the markup (`<p>a</p><p>b</p>` is two words).
const SEPARATING_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "pre", "br",
];

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Visible text of `markup` with tags removed and block boundaries turned into spaces.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                if SEPARATING_TAGS.contains(&tag_name(&after[..close]).as_str()) {
                    out.push(' ');
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn word_count(markup: &str) -> usize {
    strip_tags(markup)
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .split_whitespace()
        .count()
}

/// Percentage of `goal` reached, capped at 100. A zero goal counts as met.
pub fn progress(count: usize, goal: u64) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (count as f64 / goal as f64 * 100.0).min(100.0)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/progress.rs"]
mod tests;
