//! Shared locale infrastructure for Lingo: `Accept-Language` parsing, locale
//! negotiation against a catalog and whitelist, and the request-scoped
//! pipeline that records the outcome.

pub mod i18n;
pub mod test_support;

pub use i18n::{
    ActiveLocale, Catalog, ConfigError, DefaultLocaleSelection, DefaultLocaleSource,
    FALLBACK_LOCALE, FluentCatalog, I18nError, LanguageTag, LocaleResolver, Localizer,
    NegotiatorConfig, OrderedCandidates, Preference, RequestContext, Resolution,
    ResolutionSource, StaticCatalog, negotiate, parse, select_default_locale,
};
