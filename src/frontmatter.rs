//! Frontmatter `today:` rewriting
//!
//! The block is treated as opaque lines: only lines starting with `today:`
//! and the `---` delimiters are ever touched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Key prefix of the managed line
pub(crate) const TODAY_KEY: &str = "today:";

/// `---` at the very start, then everything up to the first `\n---`
static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---\n((?s:.*?))\n---").expect("frontmatter regex is valid"));

/// Set `today: "<timestamp>"` in the leading frontmatter block of `content`.
///
/// Without a block, a new one is prepended followed by a blank line. The
/// timestamp is inserted as is; it must not contain `"` or line breaks.
pub(crate) fn update_frontmatter(content: &str, timestamp: &str) -> String {
    let today_line = format!("{TODAY_KEY} \"{timestamp}\"");

    let Some((region, block)) = locate(content) else {
        return format!("---\n{today_line}\n---\n\n{content}");
    };

    let mut lines: Vec<&str> = Vec::new();
    let mut found = false;
    for line in block.split('\n') {
        if !line.starts_with(TODAY_KEY) {
            lines.push(line);
        } else if !found {
            lines.push(&today_line);
            found = true;
        }
    }
    if !found {
        lines.push(&today_line);
    }

    let mut out = String::with_capacity(content.len() + today_line.len() + 1);
    out.push_str(&content[..region.start]);
    out.push_str("---\n");
    out.push_str(&lines.join("\n"));
    out.push_str("\n---");
    out.push_str(&content[region.end..]);
    out
}

/// Byte range of the whole block (delimiters included) and its inner text
fn locate(content: &str) -> Option<(Range<usize>, &str)> {
    let caps = FRONTMATTER.captures(content)?;
    let whole = caps.get(0)?;
    let block = caps.get(1)?;
    Some((whole.range(), block.as_str()))
}
