//! Test doubles for code that depends on a [`Catalog`].

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use super::{ActiveLocale, Catalog, LanguageTag};

/// Catalog that records every activation for later assertions.
///
/// Shared across negotiation tests to check which locale the pipeline hands
/// to the translation backend.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    locales: BTreeSet<LanguageTag>,
    activations: Mutex<Vec<LanguageTag>>,
}

impl RecordingCatalog {
    /// Construct a recording catalog knowing `locales`.
    #[must_use]
    pub fn new<I, T>(locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LanguageTag>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            activations: Mutex::new(Vec::new()),
        }
    }

    /// Locales activated so far, oldest first.
    #[must_use]
    pub fn activations(&self) -> Vec<LanguageTag> {
        self.activations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Catalog for RecordingCatalog {
    fn known_locales(&self) -> BTreeSet<LanguageTag> {
        self.locales.clone()
    }

    fn activate_locale(&self, slot: &mut ActiveLocale, locale: &LanguageTag) {
        self.activations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locale.clone());
        slot.set(locale.clone());
    }
}
