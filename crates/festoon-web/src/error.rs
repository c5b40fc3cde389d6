#![forbid(unsafe_code)]

//! Browser binding errors.

use std::fmt;

use festoon_fx::ConfigError;

/// Why the page could not be brought up.
#[derive(Debug, Clone, PartialEq)]
pub enum WebError {
    /// A required element id is missing from the document.
    MissingElement(&'static str),
    /// The browser lacks an API the page needs.
    Unsupported(&'static str),
    /// A DOM call threw.
    Js(String),
    /// Page configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "missing element #{id}"),
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
            Self::Js(msg) => write!(f, "javascript error: {msg}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for WebError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_source() {
        assert_eq!(
            WebError::MissingElement("particleCanvas").to_string(),
            "missing element #particleCanvas"
        );
        let err = WebError::from(ConfigError::EmptyPalette);
        assert!(std::error::Error::source(&err).is_some());
    }
}
