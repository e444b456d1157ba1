use std::collections::BTreeSet;
use std::fmt;

use log::{debug, warn};

use super::{FALLBACK_LOCALE, LanguageTag};

/// Environment variable overriding the default locale.
pub const DEFAULT_LOCALE_ENV: &str = "LINGO_DEFAULT_LOCALE";

const LOG_TARGET: &str = "lingo::selection";

/// Source for a selected default locale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DefaultLocaleSource {
    /// Locale supplied explicitly by the caller.
    ExplicitArgument,
    /// Locale sourced from the `LINGO_DEFAULT_LOCALE` environment variable.
    EnvironmentVariable,
    /// Locale taken from the configuration file.
    Configuration,
    /// Fallback locale bundled with Lingo.
    Fallback,
}

impl fmt::Display for DefaultLocaleSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitArgument => formatter.write_str("explicit default locale"),
            Self::EnvironmentVariable => formatter.write_str(DEFAULT_LOCALE_ENV),
            Self::Configuration => formatter.write_str("configured default locale"),
            Self::Fallback => formatter.write_str("fallback locale"),
        }
    }
}

/// Outcome of default-locale selection including its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultLocaleSelection {
    locale: LanguageTag,
    source: DefaultLocaleSource,
    requested: Option<String>,
}

impl DefaultLocaleSelection {
    const fn new(locale: LanguageTag, source: DefaultLocaleSource, requested: Option<String>) -> Self {
        Self {
            locale,
            source,
            requested,
        }
    }

    /// Returns the effective locale source.
    #[must_use]
    pub const fn source(&self) -> DefaultLocaleSource {
        self.source
    }

    /// Returns the locale requested by the winning source, if any.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Returns the selected locale.
    #[must_use]
    pub const fn locale(&self) -> &LanguageTag {
        &self.locale
    }

    /// Whether the bundled fallback was used.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == DefaultLocaleSource::Fallback
    }

    /// Consumes the selection, yielding the locale.
    #[must_use]
    pub fn into_locale(self) -> LanguageTag {
        self.locale
    }

    /// Emit a debug log summarising the selection.
    pub fn log_outcome(&self, target: &str) {
        debug!(
            target: target,
            "selected {} `{}` as the default locale",
            self.source(),
            self.locale(),
        );
    }
}

fn try_select_candidate(
    known: &BTreeSet<LanguageTag>,
    source: DefaultLocaleSource,
    raw: Option<&str>,
) -> Option<DefaultLocaleSelection> {
    let candidate = normalise_locale(raw)?;

    if known.contains(candidate) {
        return Some(DefaultLocaleSelection::new(
            LanguageTag::from(candidate),
            source,
            Some(candidate.to_owned()),
        ));
    }

    warn!(
        target: LOG_TARGET,
        "skipping unknown {source} `{candidate}`; the catalog has no bundle for it",
    );

    None
}

/// Select the default locale from explicit, environment, and configuration
/// overrides.
///
/// Candidates are considered in the following order:
///
/// 1. The explicit locale supplied by the caller.
/// 2. The `LINGO_DEFAULT_LOCALE` environment variable.
/// 3. The configuration file.
/// 4. The bundled fallback when no candidate is known to the catalog.
///
/// ```
/// use std::collections::BTreeSet;
/// use lingo_common::i18n::{DefaultLocaleSource, LanguageTag, select_default_locale};
///
/// let known: BTreeSet<LanguageTag> = ["en-GB", "cy"].into_iter().map(LanguageTag::from).collect();
/// let selection = select_default_locale(&known, None, Some(String::from("cy")), Some("en-GB"));
/// assert_eq!(selection.locale().as_str(), "cy");
/// assert_eq!(selection.source(), DefaultLocaleSource::EnvironmentVariable);
/// ```
#[must_use]
pub fn select_default_locale(
    known: &BTreeSet<LanguageTag>,
    explicit: Option<&str>,
    environment: Option<String>,
    configuration: Option<&str>,
) -> DefaultLocaleSelection {
    let candidates = [
        (DefaultLocaleSource::ExplicitArgument, explicit),
        (DefaultLocaleSource::EnvironmentVariable, environment.as_deref()),
        (DefaultLocaleSource::Configuration, configuration),
    ];

    let selection = candidates
        .into_iter()
        .find_map(|(source, raw)| try_select_candidate(known, source, raw))
        .unwrap_or_else(|| {
            DefaultLocaleSelection::new(
                LanguageTag::from(FALLBACK_LOCALE),
                DefaultLocaleSource::Fallback,
                None,
            )
        });
    selection.log_outcome(LOG_TARGET);
    selection
}

/// Trim whitespace and discard empty locale candidates.
#[must_use]
pub fn normalise_locale(input: Option<&str>) -> Option<&str> {
    input
        .map(str::trim)
        .and_then(|value| if value.is_empty() { None } else { Some(value) })
}
