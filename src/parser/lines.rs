use std::sync::LazyLock;

use regex::Regex;

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*+-]\s+").unwrap());
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{1,3}([^*]+)\*{1,3}|_{2,3}([^_]+)_{2,3}").unwrap());

/// Split page text into the visible, non-empty, trimmed lines the extractor
/// works on. Markdown decoration is removed so plain-text and markdown
/// renderings of the same page produce the same lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect()
}

fn clean_line(raw: &str) -> String {
    let line = IMAGE_RE.replace_all(raw.trim(), "");
    let line = LINK_RE.replace_all(&line, "$1");
    let line = HEADING_RE.replace(line.trim(), "");
    let line = BULLET_RE.replace(&line, "");
    let line = EMPHASIS_RE.replace_all(&line, "${1}${2}");
    line.trim().to_string()
}

/// True when `s` is non-empty and made only of ASCII digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
