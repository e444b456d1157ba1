//! Immutable negotiator configuration.
//!
//! A [`NegotiatorConfig`] is assembled once at start-up and shared read-only
//! by every request. [`NegotiatorConfig::new`] requires the catalog and a
//! non-blank default locale up front; [`NegotiatorConfigBuilder`] covers call
//! sites that gather settings piecemeal and reports missing pieces when built.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use super::{Catalog, LanguageTag};

const LOG_TARGET: &str = "lingo::config";

/// Error raised when a negotiator configuration is incomplete.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No catalog was supplied.
    #[error("negotiator configuration requires a catalog")]
    MissingCatalog,
    /// No default locale was supplied.
    #[error("negotiator configuration requires a default locale")]
    MissingDefaultLocale,
    /// The default locale was empty or whitespace.
    #[error("default locale must not be blank")]
    BlankDefaultLocale,
}

/// Settings consulted by [`super::negotiate`].
#[derive(Clone)]
pub struct NegotiatorConfig {
    catalog: Arc<dyn Catalog>,
    default_locale: LanguageTag,
    additional_locales: BTreeSet<LanguageTag>,
}

impl NegotiatorConfig {
    /// Create a configuration with an empty whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlankDefaultLocale`] when `default_locale` is
    /// empty or whitespace.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lingo_common::i18n::{NegotiatorConfig, StaticCatalog};
    ///
    /// let config = NegotiatorConfig::new(Arc::new(StaticCatalog::new(["en"])), "en")?
    ///     .with_additional_locales(["fr"]);
    /// assert_eq!(config.default_locale().as_str(), "en");
    /// assert!(config.additional_locales().contains("fr"));
    /// # Ok::<(), lingo_common::i18n::ConfigError>(())
    /// ```
    pub fn new(
        catalog: Arc<dyn Catalog>,
        default_locale: impl Into<LanguageTag>,
    ) -> Result<Self, ConfigError> {
        let default_locale = default_locale.into();
        if default_locale.is_blank() {
            return Err(ConfigError::BlankDefaultLocale);
        }

        let config = Self {
            catalog,
            default_locale,
            additional_locales: BTreeSet::new(),
        };
        config.warn_if_default_unknown();
        Ok(config)
    }

    /// Start a builder that validates required fields on [`NegotiatorConfigBuilder::build`].
    #[must_use]
    pub fn builder() -> NegotiatorConfigBuilder {
        NegotiatorConfigBuilder::default()
    }

    /// Add `locales` to the whitelist, skipping blank tags.
    #[must_use]
    pub fn with_additional_locales<I, T>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LanguageTag>,
    {
        self.additional_locales.extend(
            locales
                .into_iter()
                .map(Into::into)
                .filter(|tag| !tag.is_blank()),
        );
        self
    }

    /// The catalog handle.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Locale used when no candidate matches, and the catalog locale for
    /// whitelisted matches.
    #[must_use]
    pub fn default_locale(&self) -> &LanguageTag {
        &self.default_locale
    }

    /// Locales accepted for routing without catalog content.
    #[must_use]
    pub fn additional_locales(&self) -> &BTreeSet<LanguageTag> {
        &self.additional_locales
    }

    /// Whether `locale` is in the whitelist.
    #[must_use]
    pub fn is_additional(&self, locale: &LanguageTag) -> bool {
        self.additional_locales.contains(locale)
    }

    /// Union of catalog locales and the whitelist.
    #[must_use]
    pub fn supported_locales(&self) -> BTreeSet<LanguageTag> {
        let mut supported = self.catalog.known_locales();
        supported.extend(self.additional_locales.iter().cloned());
        supported
    }

    fn warn_if_default_unknown(&self) {
        if !self.catalog.known_locales().contains(&self.default_locale) {
            warn!(
                target: LOG_TARGET,
                "default locale `{}` is not known to the catalog",
                self.default_locale,
            );
        }
    }
}

impl fmt::Debug for NegotiatorConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NegotiatorConfig")
            .field("known_locales", &self.catalog.known_locales())
            .field("default_locale", &self.default_locale)
            .field("additional_locales", &self.additional_locales)
            .finish()
    }
}

/// Incremental construction of a [`NegotiatorConfig`].
#[derive(Clone, Default)]
pub struct NegotiatorConfigBuilder {
    catalog: Option<Arc<dyn Catalog>>,
    default_locale: Option<LanguageTag>,
    additional_locales: Vec<LanguageTag>,
}

impl NegotiatorConfigBuilder {
    /// Set the catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the default locale.
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<LanguageTag>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Whitelist one locale.
    #[must_use]
    pub fn additional_locale(mut self, locale: impl Into<LanguageTag>) -> Self {
        self.additional_locales.push(locale.into());
        self
    }

    /// Whitelist several locales.
    #[must_use]
    pub fn additional_locales<I, T>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LanguageTag>,
    {
        self.additional_locales
            .extend(locales.into_iter().map(Into::into));
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the catalog or default locale is missing,
    /// or when the default locale is blank.
    pub fn build(self) -> Result<NegotiatorConfig, ConfigError> {
        let catalog = self.catalog.ok_or(ConfigError::MissingCatalog)?;
        let default_locale = self
            .default_locale
            .ok_or(ConfigError::MissingDefaultLocale)?;

        Ok(NegotiatorConfig::new(catalog, default_locale)?
            .with_additional_locales(self.additional_locales))
    }
}
