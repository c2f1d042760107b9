use thiserror::Error;

use crate::model::Section;

/// Faults raised while fetching, resolving or normalizing weather data.
#[derive(Debug, Error)]
pub enum Error {
    /// The weather provider answered with an error of its own.
    #[error("Caiyun API error: {message}")]
    Upstream { message: String },

    /// An address could not be turned into a coordinate.
    #[error("Geocoding error: {message}")]
    Resolution { message: String },

    /// Connection or protocol failure, with the request URL (and its key) stripped.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The payload did not have the shape the provider documents.
    #[error("Failed to parse {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No {0} data in the provider response")]
    MissingSection(Section),
}

impl Error {
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream { message: message.into() }
    }

    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution { message: message.into() }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_names_the_section() {
        let err = Error::MissingSection(Section::Daily);
        assert_eq!(err.to_string(), "No daily data in the provider response");
    }

    #[test]
    fn upstream_carries_provider_message() {
        let err = Error::upstream("'token is invalid'");
        assert!(err.to_string().contains("token is invalid"));
    }
}
