use std::fmt;

use crate::error::FetchError;

/// The only scheme the client speaks.
pub const HTTP_SCHEME: &str = "http://";

/// Port used when the URL does not name one.
pub const DEFAULT_PORT: u16 = 80;

/// The parts of an `http://` URL needed to issue a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl UrlParts {
    /// `host` or `host:port`, with the default port left out.
    pub fn authority(&self) -> String {
        if self.port == DEFAULT_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", HTTP_SCHEME, self.authority(), self.path)
    }
}

/// Parse a URL into its components.
///
/// Accepts `http://host[:port][/path]`. A port is only recognised when the
/// first `:` comes before the first `/`; anything from the first `/` onwards
/// is the path.
///
/// # Arguments
///
/// * `url` - A string slice representing the URL to parse.
///
/// # Returns
///
/// * `Result<UrlParts, FetchError>` - The host, port and path, or `FetchError::MalformedUrl`.
pub fn parse_url(url: &str) -> Result<UrlParts, FetchError> {
    let start = url
        .strip_prefix(HTTP_SCHEME)
        .ok_or_else(|| FetchError::malformed(url, "URL must start with http://"))?;

    let colon = start.find(':');
    let slash = start.find('/');

    let (host, port) = match (colon, slash) {
        (Some(colon), None) => (&start[..colon], parse_port(url, &start[colon + 1..])?),
        (Some(colon), Some(slash)) if colon < slash => {
            (&start[..colon], parse_port(url, &start[colon + 1..slash])?)
        }
        (_, Some(slash)) => (&start[..slash], DEFAULT_PORT),
        (None, None) => (start, DEFAULT_PORT),
    };

    if host.is_empty() {
        return Err(FetchError::malformed(url, "empty host"));
    }

    let path = match slash {
        Some(slash) => &start[slash..],
        None => "/",
    };

    Ok(UrlParts {
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}

fn parse_port(url: &str, digits: &str) -> Result<u16, FetchError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FetchError::malformed(url, "invalid port"));
    }
    match digits.parse::<u16>() {
        Ok(0) | Err(_) => Err(FetchError::malformed(url, "port out of range")),
        Ok(port) => Ok(port),
    }
}

/// Position just past the `\r\n\r\n` that ends the header block, if present.
pub fn find_header_end(response: &[u8]) -> Option<usize> {
    response
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// The first line of a response, without its line terminator.
pub fn status_line(response: &[u8]) -> Option<&str> {
    let end = response.windows(2).position(|w| w == b"\r\n")?;
    std::str::from_utf8(&response[..end]).ok()
}

/// Parse the status code out of the status line of an HTTP response.
///
/// # Returns
///
/// * `Option<u16>` - The status code, or `None` if the status line is missing or malformed.
pub fn parse_status_code(response: &[u8]) -> Option<u16> {
    status_line(response)?
        .split_whitespace()
        .nth(1)?
        .parse::<u16>()
        .ok()
}

/// Find the value of a header in the header block of a response.
///
/// Header names are matched case-insensitively. Only complete lines, ending
/// in `\r\n`, are considered; the status line is skipped.
pub fn find_header_value<'a>(response: &'a [u8], name: &str) -> Option<&'a str> {
    let headers = match find_header_end(response) {
        Some(end) => &response[..end],
        None => response,
    };

    let mut rest = headers;
    let mut first = true;
    while let Some(eol) = rest.windows(2).position(|w| w == b"\r\n") {
        let line = &rest[..eol];
        rest = &rest[eol + 2..];
        if line.is_empty() {
            break;
        }
        if std::mem::take(&mut first) {
            continue;
        }

        let Ok(line) = std::str::from_utf8(line) else {
            continue;
        };
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case(name) {
                return Some(value.trim());
            }
        }
    }

    None
}
