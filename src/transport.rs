//! Network fetch collaborator
//!
//! The client never talks to the network directly. It hands a fully built
//! URL to a [`Transport`] and gets the raw response text back, which keeps
//! the mapping layer testable without a live service.

use thiserror::Error;

/// Errors raised by a transport while fetching a document.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be performed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} {reason} for {url}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// Failure reported by a custom transport implementation
    #[error("Transport failed: {0}")]
    Other(String),
}

/// Something that can turn a URL into response text.
///
/// Implement this to plug in a different HTTP stack, a proxy, or canned
/// responses. Implementations should fail for non-success responses rather
/// than returning an error page as text.
pub trait Transport {
    /// Fetches the document at `url` and returns its body as text.
    fn fetch_text(&self, url: &str) -> Result<String, TransportError>;
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch_text(url)
    }
}

/// Default transport backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a transport around a preconfigured client (timeouts, proxies, ...).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.text()?)
    }
}
