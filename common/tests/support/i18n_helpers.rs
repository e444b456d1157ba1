//! Shared localisation helpers for behaviour tests.

use std::borrow::Cow;

const UNICODE_ISOLATION_MARKS: [char; 2] = ['\u{2068}', '\u{2069}'];

/// Remove the Unicode isolation marks Fluent inserts around formatted arguments.
///
/// # Examples
/// ```ignore
/// let cleaned = strip_isolation_marks("\u{2068}fr\u{2069}");
/// assert_eq!(cleaned, "fr");
/// ```
pub fn strip_isolation_marks(text: &str) -> Cow<'_, str> {
    if text
        .chars()
        .any(|character| UNICODE_ISOLATION_MARKS.contains(&character))
    {
        Cow::Owned(
            text.chars()
                .filter(|character| !UNICODE_ISOLATION_MARKS.contains(character))
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}
