use std::{fs, io, path::Path};

use crate::utils::{find_header_end, find_header_value, parse_status_code, status_line};

/// Status-class prefix that marks a response as a redirect.
pub const REDIRECT_PREFIX: &[u8] = b"HTTP/1.1 3";

/// A fully drained HTTP response.
///
/// The raw bytes are exactly what the peer sent before closing the
/// connection. Status line, headers and body are views into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: Vec<u8>,
    url: String,
    redirects: usize,
}

impl Response {
    pub fn new(raw: Vec<u8>, url: impl Into<String>, redirects: usize) -> Self {
        Self {
            raw,
            url: url.into(),
            redirects,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The URL this response was fetched from, after any redirects.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of redirects followed to reach this response.
    pub fn redirects(&self) -> usize {
        self.redirects
    }

    pub fn status_line(&self) -> Option<&str> {
        status_line(&self.raw)
    }

    pub fn status_code(&self) -> Option<u16> {
        parse_status_code(&self.raw)
    }

    pub fn is_redirect(&self) -> bool {
        is_redirect(&self.raw)
    }

    pub fn location(&self) -> Option<&str> {
        location(&self.raw)
    }

    /// Write the raw response bytes to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.raw)
    }

    /// Everything after the header block, or nothing if the block never ends.
    pub fn body(&self) -> &[u8] {
        match find_header_end(&self.raw) {
            Some(end) => &self.raw[end..],
            None => &[],
        }
    }
}

/// Whether a raw response carries a 3xx status line.
pub fn is_redirect(response: &[u8]) -> bool {
    response.starts_with(REDIRECT_PREFIX)
}

/// The `Location` header value of a raw response, if any.
pub fn location(response: &[u8]) -> Option<&str> {
    find_header_value(response, "Location").filter(|value| !value.is_empty())
}
