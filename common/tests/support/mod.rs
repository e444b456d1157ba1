//! Test support utilities for negotiation behaviour suites.
//!
//! `steps` parses quoted values and tag lists out of Gherkin steps;
//! `i18n_helpers` cleans up formatted Fluent output for assertions.

pub mod i18n_helpers;
pub mod steps;
