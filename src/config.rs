//! File-backed resolver configuration.
//!
//! Deployments keep negotiation settings in a small TOML file:
//!
//! ```toml
//! default_locale = "en-GB"
//! additional_locales = ["fr", "pt-BR"]
//! ```
//!
//! `ResolverConfig` captures those settings; [`ResolverConfig::into_negotiator_config`]
//! turns them into the immutable [`NegotiatorConfig`] shared by every request.
//! The default locale is chosen with the usual precedence (explicit argument,
//! `LINGO_DEFAULT_LOCALE`, this file, bundled fallback) and must be known to
//! the catalog.

use std::fs;
use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use lingo_common::i18n::{
    Catalog, ConfigError, NegotiatorConfig, normalise_locale, select_default_locale,
};
use serde::Deserialize;
use thiserror::Error;

/// Error raised when the configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// Path that failed to parse.
        path: Utf8PathBuf,
        /// Underlying TOML failure.
        source: toml::de::Error,
    },
}

/// Negotiation settings read from `lingo.toml`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Locale used when no preference matches.
    ///
    /// The resolver trims whitespace and ignores blank values, so
    /// `default_locale = ""` falls back cleanly to the bundled default.
    pub default_locale: Option<String>,
    /// Locales accepted for routing even though the catalog has no
    /// translations for them.
    pub additional_locales: Vec<String>,
}

impl ResolverConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error when the text is malformed or carries unknown
    /// fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingo::ResolverConfig;
    ///
    /// let config = ResolverConfig::from_toml_str("additional_locales = [\"fr\"]\n")?;
    /// assert_eq!(config.additional_locales, ["fr"]);
    /// assert!(config.default_locale().is_none());
    /// # Ok::<(), toml::de::Error>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Loads the configuration stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::Io`] when the file cannot be read and
    /// [`ConfigLoadError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigLoadError> {
        Self::load_with(path, |candidate| fs::read_to_string(candidate))
    }

    /// Loads configuration using the supplied reader.
    ///
    /// This helper exists so tests can simulate file contents and read
    /// failures without touching the file system.
    ///
    /// # Errors
    ///
    /// Propagates reader failures as [`ConfigLoadError::Io`] and TOML failures
    /// as [`ConfigLoadError::Parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use lingo::ResolverConfig;
    ///
    /// let config = ResolverConfig::load_with(Utf8Path::new("lingo.toml"), |_| {
    ///     Ok(String::from("default_locale = \"cy\"\n"))
    /// })?;
    /// assert_eq!(config.default_locale(), Some("cy"));
    /// # Ok::<(), lingo::ConfigLoadError>(())
    /// ```
    pub fn load_with<F>(path: &Utf8Path, reader: F) -> Result<Self, ConfigLoadError>
    where
        F: FnOnce(&Utf8Path) -> io::Result<String>,
    {
        let source = reader(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|source| ConfigLoadError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Returns the configured default locale, if present.
    ///
    /// Whitespace-only values are treated as absent.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        normalise_locale(self.default_locale.as_deref())
    }

    /// Build the negotiator configuration for `catalog`.
    ///
    /// `explicit` and `environment` take precedence over the file's default
    /// locale; candidates the catalog does not know are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the assembled configuration is invalid.
    pub fn into_negotiator_config(
        self,
        catalog: Arc<dyn Catalog>,
        explicit: Option<&str>,
        environment: Option<String>,
    ) -> Result<NegotiatorConfig, ConfigError> {
        let selection = select_default_locale(
            &catalog.known_locales(),
            explicit,
            environment,
            self.default_locale(),
        );

        NegotiatorConfig::builder()
            .catalog(catalog)
            .default_locale(selection.into_locale())
            .additional_locales(self.additional_locales)
            .build()
    }
}
