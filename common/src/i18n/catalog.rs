//! Catalog capability consumed by the negotiator.
//!
//! A catalog reports which locales it has translations for and activates a
//! locale for one request. Activation writes into an [`ActiveLocale`] slot
//! owned by the request, never into shared state, so concurrent requests
//! cannot observe each other's choice.

use std::collections::BTreeSet;

use super::LanguageTag;

/// Translation backend as seen by locale negotiation.
pub trait Catalog: Send + Sync {
    /// Locales the catalog has content for.
    fn known_locales(&self) -> BTreeSet<LanguageTag>;

    /// Make `locale` the active translation locale for the request owning
    /// `slot`.
    ///
    /// Activation is idempotent and accepts tags outside
    /// [`Self::known_locales`].
    fn activate_locale(&self, slot: &mut ActiveLocale, locale: &LanguageTag);
}

/// Request-scoped slot holding the catalog's active locale.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActiveLocale(Option<LanguageTag>);

impl ActiveLocale {
    /// Slot with no locale activated.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Store `locale` as the active locale, replacing any previous value.
    pub fn set(&mut self, locale: LanguageTag) {
        self.0 = Some(locale);
    }

    /// The activated locale, if any.
    #[must_use]
    pub fn get(&self) -> Option<&LanguageTag> {
        self.0.as_ref()
    }

    /// Clear the slot.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Catalog backed by a fixed, in-memory set of locales.
///
/// ```
/// use lingo_common::i18n::{ActiveLocale, Catalog, LanguageTag, StaticCatalog};
///
/// let catalog = StaticCatalog::new(["en", "de"]);
/// assert!(catalog.known_locales().contains("de"));
///
/// let mut slot = ActiveLocale::new();
/// catalog.activate_locale(&mut slot, &LanguageTag::from("de"));
/// assert_eq!(slot.get().map(LanguageTag::as_str), Some("de"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticCatalog {
    locales: BTreeSet<LanguageTag>,
}

impl StaticCatalog {
    /// Build a catalog knowing `locales`.
    #[must_use]
    pub fn new<I, T>(locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LanguageTag>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
        }
    }
}

impl Catalog for StaticCatalog {
    fn known_locales(&self) -> BTreeSet<LanguageTag> {
        self.locales.clone()
    }

    fn activate_locale(&self, slot: &mut ActiveLocale, locale: &LanguageTag) {
        slot.set(locale.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_idempotent() {
        let catalog = StaticCatalog::new(["en"]);
        let locale = LanguageTag::from("en");
        let mut once = ActiveLocale::new();
        let mut twice = ActiveLocale::new();

        catalog.activate_locale(&mut once, &locale);
        catalog.activate_locale(&mut twice, &locale);
        catalog.activate_locale(&mut twice, &locale);

        assert_eq!(once, twice);
    }

    #[test]
    fn activation_accepts_unknown_locales() {
        let catalog = StaticCatalog::new(["en"]);
        let mut slot = ActiveLocale::new();

        catalog.activate_locale(&mut slot, &LanguageTag::from("tlh"));

        assert_eq!(slot.get().map(LanguageTag::as_str), Some("tlh"));
    }

    #[test]
    fn slots_are_independent() {
        let catalog = StaticCatalog::new(["en", "cy"]);
        let mut first = ActiveLocale::new();
        let mut second = ActiveLocale::new();

        catalog.activate_locale(&mut first, &LanguageTag::from("cy"));

        assert!(second.get().is_none());
        catalog.activate_locale(&mut second, &LanguageTag::from("en"));
        assert_eq!(first.get().map(LanguageTag::as_str), Some("cy"));

        first.clear();
        assert!(first.get().is_none());
    }
}
