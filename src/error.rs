use std::io;

use thiserror::Error;

/// Error type for a fetch, covering every stage of a cycle.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum FetchError {
    /// The URL is not a usable `http://host[:port][/path]` string.
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: &'static str },

    /// DNS resolution or the TCP connect failed.
    #[error("could not connect to {host}:{port}: {source}")]
    ConnectError {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The request could not be written in full.
    #[error("failed to send request: {0}")]
    SendError(#[source] io::Error),

    /// Reading the response failed before the peer closed the connection.
    #[error("failed to receive response: {0}")]
    ReceiveError(#[source] io::Error),

    /// The redirect chain was longer than the configured maximum.
    #[error("too many redirects (maximum is {max})")]
    TooManyRedirects { max: usize },
}

impl FetchError {
    pub(crate) fn malformed(url: &str, reason: &'static str) -> Self {
        FetchError::MalformedUrl {
            url: url.to_string(),
            reason,
        }
    }
}
