//! Shared test support utilities for behaviour-driven suites.
//!
//! Exposes the `locale` helpers (for example `StepLocale`) that parse locale
//! parameters in BDD steps so scenarios feed consistent values into the
//! configuration and resolution flow.
pub mod locale;
