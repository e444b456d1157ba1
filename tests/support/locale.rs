use std::convert::Infallible;
use std::str::FromStr;

/// Wrapper for locale values supplied via behaviour-driven test steps.
#[derive(Clone, Debug)]
pub struct StepLocale {
    raw: String,
}

impl FromStr for StepLocale {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let raw = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed)
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepLocale {
    /// Consumes the step value, yielding the parsed string.
    pub fn into_inner(self) -> String {
        self.raw
    }
}
