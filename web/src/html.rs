//! HTML escaping for hand-built markup.
//!
//! Views are plain `format!` strings. Every value that did not come from a
//! string literal goes through [`escape`] first; the output is safe both as
//! element text and inside double- or single-quoted attribute values.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'`.
///
/// Borrows the input when nothing needs replacing.
///
/// # Example
///
/// ```
/// use hxtodo_web::html::escape;
///
/// assert_eq!(escape("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
/// assert_eq!(escape("plain"), "plain");
/// ```
#[must_use]
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
