use thiserror::Error;

/// Errors raised while parsing or writing a document.
#[derive(Error, Debug)]
pub enum DomError {
    #[error("Markup parsing failed: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Markup serialization failed: {0}")]
    Serialize(String),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// A selector string that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Invalid selector '{selector}': unexpected input at '{rest}'")]
    Invalid { selector: String, rest: String },
}
