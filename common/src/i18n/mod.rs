//! Locale negotiation for inbound requests.
//!
//! [`parse`] turns an `Accept-Language` value into [`OrderedCandidates`];
//! [`negotiate`] matches them against the catalog and the whitelist held in a
//! [`NegotiatorConfig`], yielding a [`Resolution`]. [`LocaleResolver`] runs
//! both and records the outcome on a per-request [`RequestContext`].
//!
//! The Fluent resources under `locales/` are embedded at compile time and
//! exposed through [`FluentCatalog`], one implementation of the [`Catalog`]
//! capability. [`select_default_locale`] picks the process default from
//! explicit, environment and configuration overrides at start-up.

use fluent_templates::static_loader;
use unic_langid::langid;

/// Re-export the Fluent value type for constructing message arguments.
pub use fluent_templates::fluent_bundle::FluentValue;
pub(crate) use fluent_templates::loader::LanguageIdentifier;

const FALLBACK_LITERAL: &str = "en-GB";

static_loader! {
    pub(crate) static LOADER = {
        locales: "../locales",
        fallback_language: "en-GB",
        // Retain Fluent's default Unicode isolating marks for bidi safety.
    };
}

/// The fallback locale bundled with every Lingo build.
pub const FALLBACK_LOCALE: &str = FALLBACK_LITERAL;
pub(crate) const FALLBACK_LANGUAGE: LanguageIdentifier = langid!("en-GB");

mod catalog;
mod config;
mod context;
mod loader;
mod negotiation;
mod preference;
mod selection;
mod tag;
pub mod testing;

pub use catalog::{ActiveLocale, Catalog, StaticCatalog};
pub use config::{ConfigError, NegotiatorConfig, NegotiatorConfigBuilder};
pub use context::{
    ACCEPT_LANGUAGE, LOCALE_ATTRIBUTE, LocaleResolver, RequestContext, accept_language,
    resolved_tag,
};
pub use loader::{Arguments, FluentCatalog, I18nError, Localizer};
pub use negotiation::{Resolution, ResolutionSource, negotiate};
pub use preference::{
    DEFAULT_QUALITY, MALFORMED_QUALITY, OrderedCandidates, Preference, parse, parse_preferences,
};
pub use selection::{
    DEFAULT_LOCALE_ENV, DefaultLocaleSelection, DefaultLocaleSource, normalise_locale,
    select_default_locale,
};
pub use tag::LanguageTag;
