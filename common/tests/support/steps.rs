use std::convert::Infallible;
use std::str::FromStr;

/// Quoted text supplied via a behaviour-driven test step.
///
/// Surrounding whitespace and one layer of single or double quotes are
/// removed, so `""` yields an empty string.
#[derive(Clone, Debug)]
pub struct StepText {
    raw: String,
}

impl FromStr for StepText {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let raw = ['"', '\'']
            .into_iter()
            .find_map(|quote| {
                trimmed
                    .strip_prefix(quote)
                    .and_then(|rest| rest.strip_suffix(quote))
            })
            .unwrap_or(trimmed)
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepText {
    /// Consumes the step value, yielding the unquoted string.
    pub fn into_inner(self) -> String {
        self.raw
    }
}

/// Comma-separated list of language tags supplied via a test step.
#[derive(Clone, Debug, Default)]
pub struct StepList {
    items: Vec<String>,
}

impl FromStr for StepList {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = StepText::from_str(input)?.into_inner();
        let items = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self { items })
    }
}

impl StepList {
    /// Consumes the list, yielding the tags.
    pub fn into_inner(self) -> Vec<String> {
        self.items
    }
}
