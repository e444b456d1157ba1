//! Request-scoped locale pipeline.
//!
//! [`LocaleResolver`] ties the parser and negotiator to the two side effects
//! a request needs: activating the catalog locale and recording the resolved
//! locale where downstream handlers can read it. Both land in the
//! [`RequestContext`] owned by the request.

use std::collections::HashMap;

use super::{
    ActiveLocale, LanguageTag, NegotiatorConfig, OrderedCandidates, Resolution, negotiate, parse,
};

/// Conventional header carrying language preferences.
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";

/// Attribute under which the resolved locale is recorded.
pub const LOCALE_ATTRIBUTE: &str = "locale";

/// Per-request state written by the resolver.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestContext {
    active: ActiveLocale,
    attributes: HashMap<String, String>,
}

impl RequestContext {
    /// Empty context for a new request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// The resolved locale recorded under [`LOCALE_ATTRIBUTE`].
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.attribute(LOCALE_ATTRIBUTE)
    }

    /// The catalog's active locale slot.
    #[must_use]
    pub fn active_locale(&self) -> &ActiveLocale {
        &self.active
    }

    /// Mutable access to the active locale slot.
    pub fn active_locale_mut(&mut self) -> &mut ActiveLocale {
        &mut self.active
    }
}

/// Resolves and records a locale for each request.
///
/// ```
/// use std::sync::Arc;
/// use lingo_common::i18n::{LocaleResolver, NegotiatorConfig, RequestContext, StaticCatalog};
///
/// let config = NegotiatorConfig::new(Arc::new(StaticCatalog::new(["en"])), "en")?
///     .with_additional_locales(["fr"]);
/// let resolver = LocaleResolver::new(config);
///
/// let mut context = RequestContext::new();
/// resolver.resolve(Some("fr"), &mut context);
/// assert_eq!(context.locale(), Some("fr"));
/// assert_eq!(context.active_locale().get().map(|tag| tag.as_str()), Some("en"));
/// # Ok::<(), lingo_common::i18n::ConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LocaleResolver {
    config: NegotiatorConfig,
}

impl LocaleResolver {
    /// Wrap a validated configuration.
    #[must_use]
    pub const fn new(config: NegotiatorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &NegotiatorConfig {
        &self.config
    }

    /// Negotiate without touching any request state.
    #[must_use]
    pub fn negotiate(&self, header_value: Option<&str>) -> Resolution {
        let candidates = header_value.map_or_else(OrderedCandidates::empty, parse);
        negotiate(&candidates, &self.config)
    }

    /// Negotiate for `header_value`, activate the catalog locale and record
    /// the resolved locale on `context`.
    ///
    /// A missing header behaves like an empty one.
    pub fn resolve(&self, header_value: Option<&str>, context: &mut RequestContext) -> Resolution {
        let resolution = self.negotiate(header_value);
        self.apply(&resolution, context);
        resolution
    }

    /// Like [`Self::resolve`], reading the first `Accept-Language` entry from
    /// `headers`. Header names compare case-insensitively.
    pub fn resolve_headers<'a, I>(&self, headers: I, context: &mut RequestContext) -> Resolution
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.resolve(accept_language(headers), context)
    }

    fn apply(&self, resolution: &Resolution, context: &mut RequestContext) {
        self.config
            .catalog()
            .activate_locale(context.active_locale_mut(), resolution.catalog_locale());
        context.set_attribute(
            LOCALE_ATTRIBUTE,
            resolution.resolved_locale().as_str(),
        );
    }
}

/// Pick the first `Accept-Language` value out of `(name, value)` pairs.
#[must_use]
pub fn accept_language<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(ACCEPT_LANGUAGE))
        .map(|(_, value)| value)
}

/// Resolved locale recorded on `context`, as a tag.
#[must_use]
pub fn resolved_tag(context: &RequestContext) -> Option<LanguageTag> {
    context.locale().map(LanguageTag::from)
}
