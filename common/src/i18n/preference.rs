//! `Accept-Language` parsing.
//!
//! The parser is deliberately permissive: malformed headers produce fewer (or
//! zero) candidates rather than errors. Quality values that cannot be read as
//! a finite number in `[0, 1]` are coerced to `0.0`, so the entry survives but
//! sorts after every well-formed preference.

use std::slice;
use std::vec;

use log::debug;

use super::LanguageTag;

const LOG_TARGET: &str = "lingo::preference";

/// Weight assigned to entries without an explicit quality factor.
pub const DEFAULT_QUALITY: f32 = 1.0;

/// Weight assigned to entries whose quality factor cannot be parsed.
pub const MALFORMED_QUALITY: f32 = 0.0;

/// A language tag paired with the client's quality weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Preference {
    tag: LanguageTag,
    quality: f32,
}

impl Preference {
    /// Pair `tag` with `quality`.
    #[must_use]
    pub fn new(tag: impl Into<LanguageTag>, quality: f32) -> Self {
        Self {
            tag: tag.into(),
            quality,
        }
    }

    /// The preferred tag.
    #[must_use]
    pub fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    /// The quality weight in `[0, 1]`.
    #[must_use]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Consume the preference, yielding the tag.
    #[must_use]
    pub fn into_tag(self) -> LanguageTag {
        self.tag
    }
}

/// Language tags ordered from most to least preferred.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderedCandidates(Vec<LanguageTag>);

impl OrderedCandidates {
    /// Candidates with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over candidates in preference order.
    pub fn iter(&self) -> slice::Iter<'_, LanguageTag> {
        self.0.iter()
    }

    /// Borrow the candidates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[LanguageTag] {
        &self.0
    }
}

impl FromIterator<LanguageTag> for OrderedCandidates {
    fn from_iter<I: IntoIterator<Item = LanguageTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for OrderedCandidates {
    type Item = LanguageTag;
    type IntoIter = vec::IntoIter<LanguageTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedCandidates {
    type Item = &'a LanguageTag;
    type IntoIter = slice::Iter<'a, LanguageTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse an `Accept-Language` value into candidates, most preferred first.
///
/// Equal weights keep their header order.
///
/// ```
/// use lingo_common::i18n::parse;
///
/// let candidates = parse("a;q=0.3, b;q=0.9, c");
/// let tags: Vec<&str> = candidates.iter().map(|tag| tag.as_str()).collect();
/// assert_eq!(tags, ["c", "b", "a"]);
///
/// assert!(parse("").is_empty());
/// ```
#[must_use]
pub fn parse(header_value: &str) -> OrderedCandidates {
    let mut preferences = parse_preferences(header_value);
    // `sort_by` is stable, which is what keeps ties in header order.
    preferences.sort_by(|left, right| right.quality.total_cmp(&left.quality));
    preferences.into_iter().map(Preference::into_tag).collect()
}

/// Parse an `Accept-Language` value into weighted entries in header order.
#[must_use]
pub fn parse_preferences(header_value: &str) -> Vec<Preference> {
    header_value.split(',').filter_map(parse_entry).collect()
}

fn parse_entry(entry: &str) -> Option<Preference> {
    let mut parts = entry.split(';');
    let tag = parts.next().map(str::trim).filter(|tag| !tag.is_empty())?;
    // A bare `q` has an empty value and is therefore malformed.
    let quality = parts
        .map(|parameter| parameter.split_once('=').unwrap_or((parameter, "")))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .map_or(DEFAULT_QUALITY, |(_, value)| parse_quality(tag, value));

    Some(Preference::new(tag, quality))
}

fn parse_quality(tag: &str, raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => value,
        _ => {
            debug!(
                target: LOG_TARGET,
                "treating malformed quality `{raw}` for `{tag}` as {MALFORMED_QUALITY}",
            );
            MALFORMED_QUALITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(candidates: &OrderedCandidates) -> Vec<&str> {
        candidates.iter().map(LanguageTag::as_str).collect()
    }

    #[rstest]
    #[case("a;q=0.3,b;q=0.9,c", &["c", "b", "a"])]
    #[case("a;q=0.5,b;q=0.5", &["a", "b"])]
    #[case("de,en;q=0.5", &["de", "en"])]
    #[case("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5", &["fr-CH", "fr", "en", "de", "*"])]
    #[case("en;q=0.2, cy", &["cy", "en"])]
    fn orders_by_descending_weight(#[case] header: &str, #[case] expected: &[&str]) {
        assert_eq!(tags(&parse(header)), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(",,,")]
    #[case(";q=0.5")]
    #[case(" ; , ;q=1")]
    fn empty_or_tagless_headers_yield_no_candidates(#[case] header: &str) {
        assert!(parse(header).is_empty());
    }

    #[rstest]
    #[case("en;q=abc")]
    #[case("en;q=")]
    #[case("en;q=1.5")]
    #[case("en;q=-0.1")]
    #[case("en;q=NaN")]
    #[case("en;q=inf")]
    #[case("en;q")]
    #[case("en; Q ;level=1")]
    fn malformed_quality_becomes_lowest_weight(#[case] header: &str) {
        let preferences = parse_preferences(header);

        assert_eq!(preferences.len(), 1);
        assert_eq!(preferences.first().map(Preference::quality), Some(0.0));
    }

    #[test]
    fn malformed_entry_sorts_after_valid_entries_but_is_kept() {
        let candidates = parse("xx;q=junk, de;q=0.1, en");

        assert_eq!(candidates.len(), 3);
        assert_eq!(tags(&candidates), ["en", "de", "xx"]);
    }

    #[test]
    fn bare_quality_parameter_ranks_below_weighted_entries() {
        let candidates = parse("en;q, de;q=0.1");

        assert_eq!(
            candidates.as_slice(),
            [LanguageTag::from("de"), LanguageTag::from("en")]
        );
    }

    #[test]
    fn zero_weight_entries_are_kept_and_keep_header_order() {
        let candidates = parse("fr;q=0, de;q=garbage, en;q=0.4");

        assert_eq!(tags(&candidates), ["en", "fr", "de"]);
    }

    #[rstest]
    #[case("en; Q=0.5", 0.5)]
    #[case("en ; q = 0.25 ", 0.25)]
    #[case("en;level=1;q=0.4", 0.4)]
    #[case("en;level=1", 1.0)]
    #[case("en;q=0.3;q=0.9", 0.3)]
    #[case("en;q=1", 1.0)]
    fn reads_quality_parameters(#[case] header: &str, #[case] expected: f32) {
        let preferences = parse_preferences(header);

        assert_eq!(
            preferences.first().map(|preference| preference.tag().as_str()),
            Some("en")
        );
        assert_eq!(
            preferences.first().map(Preference::quality),
            Some(expected)
        );
    }

    #[test]
    fn preserves_case_and_subtags() {
        let candidates = parse("EN-gb, de-AT");

        assert_eq!(tags(&candidates), ["EN-gb", "de-AT"]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let header = "pt-BR;q=0.8, es, en;q=0.8";

        assert_eq!(parse(header), parse(header));
    }
}
