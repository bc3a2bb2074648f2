//! Text cleanup for admin-submitted content
//!
//! Podcast descriptions arrive from a rich-text widget. Before storage the
//! text is normalized: line endings unified, control characters stripped,
//! and a small whitelist of inline markup tags kept. Everything else is
//! escaped so it renders literally rather than as markup.

/// Tags allowed to pass through description cleanup unescaped
const ALLOWED_TAGS: &[&str] = &[
    "p", "/p", "br", "br/", "b", "/b", "i", "/i", "em", "/em", "strong", "/strong", "ul", "/ul",
    "ol", "/ol", "li", "/li", "a", "/a", "blockquote", "/blockquote",
];

/// Clean an admin-submitted description for storage.
///
/// Returns `None` for input that is empty after trimming.
pub fn clean_description(input: &str) -> Option<String> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut rest = trimmed;

    while let Some(start) = rest.find('<') {
        out.push_str(&escape_text(&rest[..start]));
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                let tag_body = &after[..end];
                match render_tag(tag_body) {
                    Some(tag) => out.push_str(&tag),
                    None => {
                        out.push_str("&lt;");
                        out.push_str(&escape_text(tag_body));
                        out.push_str("&gt;");
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated tag: escape the rest verbatim
                out.push_str("&lt;");
                out.push_str(&escape_text(after));
                rest = "";
            }
        }
    }
    out.push_str(&escape_text(rest));

    // Strip control characters other than newline and tab
    let cleaned: String = out
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    Some(cleaned)
}

/// Rebuild a whitelisted tag from its parsed parts, or `None` to escape it.
///
/// Tags are never passed through verbatim. Anchors are reconstructed from
/// the href alone, so event-handler and other attributes cannot survive
/// cleanup; every other tag is kept only when it carries no attributes.
fn render_tag(tag_body: &str) -> Option<String> {
    let name = tag_body
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }

    if name == "a" {
        let href = anchor_href(tag_body)?;
        // http(s) targets only; javascript: and friends get escaped.
        // A quote or angle bracket inside the value would break out of
        // the rebuilt attribute, so those escape too.
        let lower = href.to_ascii_lowercase();
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            return None;
        }
        if href.contains(['"', '<', '>']) {
            return None;
        }
        return Some(format!("<a href=\"{}\">", href));
    }

    if tag_body.split_whitespace().count() > 1 {
        return None;
    }
    Some(format!("<{}>", name))
}

/// Extract the quoted href value from an anchor tag body
fn anchor_href(tag_body: &str) -> Option<&str> {
    let pos = tag_body.to_ascii_lowercase().find("href")?;
    let rest = tag_body[pos + 4..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let value = &rest[1..];
    let end = value.find(quote)?;
    Some(&value[..end])
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
