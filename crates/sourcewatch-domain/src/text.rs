//! Text normalization and quotation matching
//!
//! Both the fetched document and the tracked quotation are folded the same
//! way before comparison, so typography differences between a live page and
//! its archived snapshot do not read as edits.

const DOUBLE_QUOTES: [char; 4] = ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}'];
const SINGLE_QUOTES: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

/// Normalize text for matching
///
/// Lowercases, collapses every run of whitespace to a single space and maps
/// typographic quote glyphs to their ASCII forms. Leading and trailing
/// whitespace is collapsed, not trimmed.
///
/// # Examples
///
/// ```
/// use sourcewatch_domain::normalize;
///
/// assert_eq!(normalize("We  the\n\u{201C}People\u{201D}"), "we the \"people\"");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if DOUBLE_QUOTES.contains(&c) {
            out.push('"');
        } else if SINGLE_QUOTES.contains(&c) {
            out.push('\'');
        } else {
            out.push(c);
        }
    }

    out
}

/// Check whether `content` contains `search_text` after normalization
///
/// An empty search text is trivially contained.
///
/// # Examples
///
/// ```
/// use sourcewatch_domain::contains_text;
///
/// assert!(contains_text("HELLO world", "hello"));
/// assert!(!contains_text("short", "much longer text"));
/// ```
pub fn contains_text(content: &str, search_text: &str) -> bool {
    normalize(content).contains(&normalize(search_text))
}
