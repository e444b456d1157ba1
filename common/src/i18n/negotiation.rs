//! Locale negotiation.
//!
//! Candidates are scanned in preference order against the union of catalog
//! locales and the whitelist. The first hit wins outright; there is no
//! secondary scoring. Whether the hit came from the whitelist only decides
//! which locale the catalog activates.

use std::fmt;

use log::debug;

use super::{LanguageTag, NegotiatorConfig, OrderedCandidates};

const LOG_TARGET: &str = "lingo::negotiation";

/// How a [`Resolution`] was reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionSource {
    /// A candidate known to the catalog and absent from the whitelist.
    Catalog,
    /// A whitelisted candidate; the catalog stays on the default locale.
    Whitelist,
    /// No candidate matched.
    Fallback,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => formatter.write_str("catalog locale"),
            Self::Whitelist => formatter.write_str("whitelisted locale"),
            Self::Fallback => formatter.write_str("default locale"),
        }
    }
}

/// Outcome of negotiation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    resolved_locale: LanguageTag,
    catalog_locale: LanguageTag,
    source: ResolutionSource,
}

impl Resolution {
    fn fallback(default_locale: &LanguageTag) -> Self {
        Self {
            resolved_locale: default_locale.clone(),
            catalog_locale: default_locale.clone(),
            source: ResolutionSource::Fallback,
        }
    }

    /// Locale exposed to the rest of the request pipeline.
    #[must_use]
    pub fn resolved_locale(&self) -> &LanguageTag {
        &self.resolved_locale
    }

    /// Locale to activate in the catalog.
    #[must_use]
    pub fn catalog_locale(&self) -> &LanguageTag {
        &self.catalog_locale
    }

    /// Provenance of the resolution.
    #[must_use]
    pub const fn source(&self) -> ResolutionSource {
        self.source
    }

    /// Whether no candidate matched.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == ResolutionSource::Fallback
    }

    /// Split into `(resolved_locale, catalog_locale)`.
    #[must_use]
    pub fn into_parts(self) -> (LanguageTag, LanguageTag) {
        (self.resolved_locale, self.catalog_locale)
    }

    /// Emit a debug log summarising the resolution.
    pub fn log_outcome(&self, target: &str) {
        debug!(
            target: target,
            "resolved {} `{}` (catalog `{}`)",
            self.source,
            self.resolved_locale,
            self.catalog_locale,
        );
    }
}

/// Choose a locale for `candidates` under `config`.
///
/// Never fails: with no match both locales are the configured default.
///
/// ```
/// use std::sync::Arc;
/// use lingo_common::i18n::{NegotiatorConfig, StaticCatalog, negotiate, parse};
///
/// let config = NegotiatorConfig::new(Arc::new(StaticCatalog::new(["en"])), "en")?
///     .with_additional_locales(["fr"]);
///
/// let resolution = negotiate(&parse("fr"), &config);
/// assert_eq!(resolution.resolved_locale().as_str(), "fr");
/// assert_eq!(resolution.catalog_locale().as_str(), "en");
/// # Ok::<(), lingo_common::i18n::ConfigError>(())
/// ```
#[must_use]
pub fn negotiate(candidates: &OrderedCandidates, config: &NegotiatorConfig) -> Resolution {
    let supported = config.supported_locales();
    let picked = candidates
        .iter()
        .find(|candidate| supported.contains(*candidate));

    let resolution = match picked {
        None => Resolution::fallback(config.default_locale()),
        Some(locale) if config.is_additional(locale) => Resolution {
            resolved_locale: locale.clone(),
            catalog_locale: config.default_locale().clone(),
            source: ResolutionSource::Whitelist,
        },
        Some(locale) => Resolution {
            resolved_locale: locale.clone(),
            catalog_locale: locale.clone(),
            source: ResolutionSource::Catalog,
        },
    };

    resolution.log_outcome(LOG_TARGET);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{StaticCatalog, parse};
    use rstest::rstest;
    use std::sync::Arc;

    fn config(known: &[&str], additional: &[&str], default_locale: &str) -> NegotiatorConfig {
        NegotiatorConfig::new(
            Arc::new(StaticCatalog::new(known.iter().copied())),
            default_locale,
        )
        .expect("configuration should build")
        .with_additional_locales(additional.iter().copied())
    }

    #[rstest]
    #[case(&["en", "de"], &[], "en", "de,en;q=0.5", "de", "de", ResolutionSource::Catalog)]
    #[case(&["en"], &["fr"], "en", "fr", "fr", "en", ResolutionSource::Whitelist)]
    #[case(&["en"], &[], "en", "xx,yy", "en", "en", ResolutionSource::Fallback)]
    #[case(&["en"], &[], "en", "", "en", "en", ResolutionSource::Fallback)]
    #[case(&[], &[], "en", "en", "en", "en", ResolutionSource::Fallback)]
    #[case(&["en", "de"], &["fr"], "en", "xx, fr;q=0.4, de;q=0.3", "fr", "en", ResolutionSource::Whitelist)]
    #[case(&["en", "de"], &["de"], "en", "de", "de", "en", ResolutionSource::Whitelist)]
    #[case(&["en", "de"], &[], "en", "de-AT", "en", "en", ResolutionSource::Fallback)]
    #[case(&["en", "de"], &[], "en", "DE", "en", "en", ResolutionSource::Fallback)]
    fn negotiates(
        #[case] known: &[&str],
        #[case] additional: &[&str],
        #[case] default_locale: &str,
        #[case] header: &str,
        #[case] resolved: &str,
        #[case] catalog: &str,
        #[case] source: ResolutionSource,
    ) {
        let resolution = negotiate(&parse(header), &config(known, additional, default_locale));

        assert_eq!(resolution.resolved_locale().as_str(), resolved);
        assert_eq!(resolution.catalog_locale().as_str(), catalog);
        assert_eq!(resolution.source(), source);
    }

    #[rstest]
    #[case("fr;q=0.5, de;q=0.5", "fr")]
    #[case("de;q=0.5, fr;q=0.5", "de")]
    fn earlier_candidate_wins_ties_regardless_of_origin(
        #[case] header: &str,
        #[case] expected: &str,
    ) {
        let config = config(&["en", "de"], &["fr"], "en");

        let resolution = negotiate(&parse(header), &config);

        assert_eq!(resolution.resolved_locale().as_str(), expected);
    }

    #[test]
    fn repeated_negotiation_is_identical() {
        let config = config(&["en", "cy"], &["gd"], "en");
        let candidates = parse("gd;q=0.2, cy;q=0.9");

        let first = negotiate(&candidates, &config);
        let second = negotiate(&candidates, &config);

        assert_eq!(first, second);
        assert_eq!(first.resolved_locale().as_str(), "cy");
    }

    #[test]
    fn fallback_reports_its_source() {
        let config = config(&["en"], &[], "en");

        let resolution = negotiate(&OrderedCandidates::empty(), &config);

        assert!(resolution.used_fallback());
        assert_eq!(
            resolution.into_parts(),
            (LanguageTag::from("en"), LanguageTag::from("en"))
        );
    }
}
