//! Free-text sanitizer: script removal, tag stripping and entity escaping.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::{Sanitizer, trim_input};

const SCRIPT_OPEN: &[u8] = b"<script";
const SCRIPT_CLOSE: &[u8] = b"</script";

/// Sanitizer for untrusted free-form text destined for display or storage.
///
/// The output contains no markup tags and no unescaped `& < > " '`, so it can
/// be interpolated into a text node or a quoted attribute as is.
///
/// Processing runs in four steps:
///
/// 1. every `<script>…</script>` element is removed together with its
///    content (case-insensitive, nearest closing tag wins);
/// 2. every remaining `<…>` tag is stripped, keeping the text between tags;
/// 3. `& < > " '` are escaped, leaving existing character references alone;
/// 4. surrounding whitespace is trimmed.
///
/// Sanitizing already-sanitized text is a no-op.
///
/// # Example
///
/// ```
/// use render_guard::{Sanitizer, TextSanitizer};
///
/// let sanitizer = TextSanitizer::new();
/// let html = r#"<p onclick="x()">Tom & Jerry</p><script>alert(1)</script>"#;
/// assert_eq!(sanitizer.sanitize(html), "Tom &amp; Jerry");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextSanitizer;

impl TextSanitizer {
    /// Create a new `TextSanitizer`.
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for TextSanitizer {
    fn sanitize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let without_scripts = remove_script_elements(text);
        let without_tags = strip_tags(&without_scripts);
        trim_input(&escape_html(&without_tags)).to_string()
    }
}

/// Escape `& < > " '` as HTML character references.
///
/// An `&` that already starts a well-formed character reference
/// (`&amp;`, `&#60;`, `&#x3C;`, ...) is kept, so escaping is idempotent.
///
/// ```
/// use render_guard::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// assert_eq!(escape_html("Tom &amp; Jerry"), "Tom &amp; Jerry");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (i, ch) in text.char_indices() {
        match ch {
            '&' if starts_char_reference(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }

    out
}

fn starts_char_reference(text: &str) -> bool {
    static CHAR_REFERENCE: OnceLock<Regex> = OnceLock::new();
    CHAR_REFERENCE
        .get_or_init(|| {
            Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
                .expect("character reference pattern is valid")
        })
        .is_match(text)
}

/// Remove script elements in a single left-to-right pass.
///
/// Input is copied into `out` one char at a time, and an opener is matched
/// against the tail of `out` before the next char is pushed. That catches an
/// element which only forms once an inner one is gone, e.g.
/// `<scr<script></script>ipt>`, without rescanning the text. An opening tag
/// without a matching close drops the rest of the input.
fn remove_script_elements(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if find_script_open(bytes, 0).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut removed = 0;

    loop {
        let next = text[pos..].chars().next();

        if let Some(open) = pending_script_open(&out, next) {
            out.truncate(open);
            removed += 1;
            match find_script_close_end(bytes, pos) {
                Some(end) => {
                    pos = end;
                    continue;
                }
                None => break,
            }
        }

        match next {
            Some(ch) => {
                out.push(ch);
                pos += ch.len_utf8();
            }
            None => break,
        }
    }

    tracing::trace!(removed, "Removed script elements");
    Cow::Owned(out)
}

/// Start of a `<script` opener ending `out`, if `next` closes its tag name.
fn pending_script_open(out: &str, next: Option<char>) -> Option<usize> {
    let start = out.len().checked_sub(SCRIPT_OPEN.len())?;
    if !out.as_bytes()[start..].eq_ignore_ascii_case(SCRIPT_OPEN) {
        return None;
    }
    ends_tag_name(next).then_some(start)
}

fn find_script_open(bytes: &[u8], from: usize) -> Option<usize> {
    find_tag_name(bytes, from, SCRIPT_OPEN)
}

/// Position just past the `>` of the nearest `</script ...>` at or after `from`.
fn find_script_close_end(bytes: &[u8], from: usize) -> Option<usize> {
    let close = find_tag_name(bytes, from, SCRIPT_CLOSE)?;
    let after_name = close + SCRIPT_CLOSE.len();
    bytes[after_name..]
        .iter()
        .position(|&b| b == b'>')
        .map(|pos| after_name + pos + 1)
}

/// Find `name` (case-insensitive) followed by a tag-name boundary.
fn find_tag_name(bytes: &[u8], mut from: usize, name: &[u8]) -> Option<usize> {
    while let Some(pos) = find_ignore_ascii_case(bytes, from, name) {
        if ends_tag_name(bytes.get(pos + name.len()).copied().map(char::from)) {
            return Some(pos);
        }
        from = pos + 1;
    }
    None
}

fn ends_tag_name(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(ch) => ch == '>' || ch == '/' || ch.is_ascii_whitespace(),
    }
}

// Needles are ASCII, so every match index is a char boundary.
fn find_ignore_ascii_case(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|pos| from + pos)
}

/// Drop every `<…>` span, keeping the text around it. A `<` with no later
/// `>` is kept for the escaping step.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
