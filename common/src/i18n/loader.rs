use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use fluent_templates::Loader;
use fluent_templates::fluent_bundle::FluentValue;
use once_cell::sync::Lazy;
use thiserror::Error;

use super::catalog::{ActiveLocale, Catalog};
use super::{FALLBACK_LANGUAGE, LOADER, LanguageIdentifier, LanguageTag};

// Canonical tags of the bundles compiled in from `locales/`.
static BUNDLED_TAGS: Lazy<BTreeSet<LanguageTag>> = Lazy::new(|| {
    LOADER
        .locales()
        .map(|identifier| LanguageTag::new(identifier.to_string()))
        .collect()
});

/// HashMap wrapper used when passing Fluent arguments to lookups.
pub type Arguments<'a> = HashMap<Cow<'a, str>, FluentValue<'a>>;

/// Error raised when localisation data cannot satisfy a caller request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    /// Raised when the requested message slug is missing for the active locale.
    #[error("message `{key}` missing for locale `{locale}`")]
    MissingMessage { key: String, locale: String },
}

/// Catalog backed by the Fluent bundles embedded under `locales/`.
///
/// The known locales are exactly the bundle directory names, so negotiation
/// compares request tags against `cy`, `de` and `en-GB` verbatim.
///
/// ```
/// use lingo_common::i18n::{ActiveLocale, Catalog, FluentCatalog, LanguageTag};
///
/// let catalog = FluentCatalog::new();
/// assert!(catalog.known_locales().contains("cy"));
///
/// let mut slot = ActiveLocale::new();
/// catalog.activate_locale(&mut slot, &LanguageTag::from("cy"));
/// assert_eq!(catalog.localizer(&slot).locale(), "cy");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FluentCatalog;

impl FluentCatalog {
    /// Create a handle onto the embedded bundles.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build a [`Localizer`] for the locale activated in `slot`.
    #[must_use]
    pub fn localizer(&self, slot: &ActiveLocale) -> Localizer {
        Localizer::new(slot.get().map(LanguageTag::as_str))
    }

    /// Whether `locale` has an embedded bundle.
    ///
    /// Unlike negotiation, this canonicalises the tag first, so `EN-gb` finds
    /// the `en-GB` bundle.
    #[must_use]
    pub fn has_bundle(&self, locale: &str) -> bool {
        has_bundle(locale)
    }
}

impl Catalog for FluentCatalog {
    fn known_locales(&self) -> BTreeSet<LanguageTag> {
        BUNDLED_TAGS.clone()
    }

    fn activate_locale(&self, slot: &mut ActiveLocale, locale: &LanguageTag) {
        slot.set(locale.clone());
    }
}

/// Resolve localisation messages for a specific locale.
///
/// Tags without an embedded bundle resolve against `en-GB`; this happens
/// routinely when a whitelisted locale is activated.
#[derive(Clone, Debug)]
pub struct Localizer {
    language: LanguageIdentifier,
    fallback_used: bool,
}

impl Localizer {
    /// Create a localizer for `locale`, falling back to [`super::FALLBACK_LOCALE`].
    ///
    /// ```
    /// use lingo_common::i18n::Localizer;
    ///
    /// let welsh = Localizer::new(Some("cy"));
    /// assert_eq!(welsh.locale(), "cy");
    /// assert!(!welsh.used_fallback());
    ///
    /// let fallback = Localizer::new(Some("zz"));
    /// assert_eq!(fallback.locale(), "en-GB");
    /// assert!(fallback.used_fallback());
    /// ```
    #[must_use]
    pub fn new(locale: Option<&str>) -> Self {
        match locale {
            Some(value) if has_bundle(value) => match LanguageIdentifier::from_str(value) {
                Ok(identifier) => Self {
                    language: identifier,
                    fallback_used: false,
                },
                Err(_) => Self::fallback(),
            },
            _ => Self::fallback(),
        }
    }

    /// Return the resolved locale identifier.
    #[must_use]
    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Return the resolved locale as a string.
    #[must_use]
    pub fn locale(&self) -> String {
        self.language.to_string()
    }

    /// Whether the fallback locale was used.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.fallback_used
    }

    /// Fetch the translated message for `key`.
    pub fn message(&self, key: &str) -> Result<String, I18nError> {
        self.lookup(key, None, None)
    }

    /// Fetch the translated message with Fluent arguments.
    pub fn message_with_args(
        &self,
        key: &str,
        args: &Arguments<'static>,
    ) -> Result<String, I18nError> {
        self.lookup(key, None, Some(args))
    }

    /// Fetch a translated attribute, e.g. `greeting.formal`.
    pub fn attribute(&self, key: &str, attribute: &str) -> Result<String, I18nError> {
        self.lookup(key, Some(attribute), None)
    }

    fn lookup(
        &self,
        key: &str,
        attribute: Option<&str>,
        args: Option<&Arguments<'static>>,
    ) -> Result<String, I18nError> {
        let lookup_key = attribute.map_or_else(|| key.to_owned(), |attr| format!("{key}.{attr}"));

        let maybe_value = match args {
            Some(arguments) => {
                LOADER.try_lookup_with_args(&self.language, lookup_key.as_str(), arguments)
            }
            None => LOADER.try_lookup(&self.language, lookup_key.as_str()),
        };

        maybe_value.ok_or_else(|| I18nError::MissingMessage {
            key: lookup_key,
            locale: self.language.to_string(),
        })
    }

    fn fallback() -> Self {
        Self {
            language: FALLBACK_LANGUAGE.clone(),
            fallback_used: true,
        }
    }
}

fn has_bundle(locale: &str) -> bool {
    locale
        .parse::<LanguageIdentifier>()
        .is_ok_and(|identifier| BUNDLED_TAGS.contains(identifier.to_string().as_str()))
}
