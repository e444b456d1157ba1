//! Lingo resolves one locale per request from its `Accept-Language` header.
//!
//! The negotiation core lives in [`lingo_common::i18n`]; this crate adds the
//! file-backed [`ResolverConfig`] and wires a ready-to-use resolver over the
//! bundled Fluent catalog.

pub mod config;

use std::env;
use std::sync::Arc;

use lingo_common::i18n::{ConfigError, DEFAULT_LOCALE_ENV, FluentCatalog, LocaleResolver};
use log::info;

pub use config::{ConfigLoadError, ResolverConfig};
pub use lingo_common::i18n;

/// Build a resolver over the bundled Fluent catalog.
///
/// The default locale is taken from `explicit`, then `LINGO_DEFAULT_LOCALE`,
/// then `config`, then the bundled `en-GB`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the assembled configuration is invalid.
///
/// # Examples
///
/// ```
/// use lingo::{ResolverConfig, fluent_resolver};
/// use lingo::i18n::RequestContext;
///
/// let config = ResolverConfig {
///     default_locale: Some(String::from("en-GB")),
///     additional_locales: vec![String::from("fr")],
/// };
/// let resolver = fluent_resolver(config, Some("en-GB"))?;
///
/// let mut context = RequestContext::new();
/// resolver.resolve(Some("fr, cy;q=0.5"), &mut context);
/// assert_eq!(context.locale(), Some("fr"));
/// # Ok::<(), lingo::i18n::ConfigError>(())
/// ```
pub fn fluent_resolver(
    config: ResolverConfig,
    explicit: Option<&str>,
) -> Result<LocaleResolver, ConfigError> {
    let environment = env::var_os(DEFAULT_LOCALE_ENV).and_then(|value| value.into_string().ok());
    let negotiator =
        config.into_negotiator_config(Arc::new(FluentCatalog::new()), explicit, environment)?;
    info!(
        target: "lingo",
        "negotiating with default locale `{}` and {} whitelisted locale(s)",
        negotiator.default_locale(),
        negotiator.additional_locales().len(),
    );
    Ok(LocaleResolver::new(negotiator))
}
