//! The fetch loop: one request per cycle, following `Location` on 3xx
//! responses until a final response or the redirect limit is reached.

use log::{debug, info};

use crate::{
    client::Connection,
    config::FetchConfig,
    error::FetchError,
    http::build_http_request,
    response::{self, Response},
    utils::{parse_url, UrlParts, HTTP_SCHEME},
};

/// How a `Location` value relates to the URL that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// A full URL with a scheme.
    Absolute,
    /// A path starting with `/` on the current host.
    AbsolutePath,
    /// Anything else, taken relative to the root of the current host.
    RelativePath,
}

/// A classified `Location` value, borrowed from the response carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget<'a> {
    pub kind: RedirectKind,
    pub value: &'a str,
}

impl<'a> RedirectTarget<'a> {
    pub fn classify(value: &'a str) -> Self {
        let kind = if value.starts_with("http://") || value.starts_with("https://") {
            RedirectKind::Absolute
        } else if value.starts_with('/') {
            RedirectKind::AbsolutePath
        } else {
            RedirectKind::RelativePath
        };
        Self { kind, value }
    }

    /// Turn the target into an absolute URL against the current one.
    pub fn resolve(&self, current: &UrlParts) -> String {
        match self.kind {
            RedirectKind::Absolute => self.value.to_string(),
            RedirectKind::AbsolutePath => {
                format!("{}{}{}", HTTP_SCHEME, current.authority(), self.value)
            }
            RedirectKind::RelativePath => {
                format!("{}{}/{}", HTTP_SCHEME, current.authority(), self.value)
            }
        }
    }
}

/// Resolve a `Location` value against the URL of the response carrying it.
pub fn resolve_location(location: &str, current: &UrlParts) -> String {
    RedirectTarget::classify(location).resolve(current)
}

/// The next URL to fetch, or `None` when `raw` is a final response.
///
/// A 3xx response without a `Location` header is final.
pub fn redirect_url(raw: &[u8], current: &UrlParts) -> Option<String> {
    if !response::is_redirect(raw) {
        return None;
    }
    match response::location(raw) {
        Some(location) => Some(resolve_location(location, current)),
        None => {
            debug!("Redirect status without Location header, treating as final");
            None
        }
    }
}

/// Fetch `url` with the default configuration.
///
/// # Arguments
///
/// * `url` - An `http://` URL.
/// * `parameters` - An already `&`-joined query string, sent on the first request only.
///
/// # Returns
///
/// * `Result<Response, FetchError>` - The first non-redirect response, or the first error.
pub fn fetch(url: &str, parameters: Option<&str>) -> Result<Response, FetchError> {
    fetch_with(url, parameters, &FetchConfig::default())
}

/// Fetch `url`, following at most `config.max_redirects` redirects.
pub fn fetch_with(
    url: &str,
    parameters: Option<&str>,
    config: &FetchConfig,
) -> Result<Response, FetchError> {
    fetch_observed(url, parameters, config, |_| {})
}

/// One completed request/response pair within a redirect chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange<'a> {
    pub url: &'a str,
    pub request: &'a [u8],
    pub response: &'a [u8],
    /// The URL the chain continues with, or `None` if `response` is final.
    pub redirect: Option<&'a str>,
}

/// Like [`fetch_with`], calling `observer` once per cycle as soon as its
/// response has been drained, redirects included.
pub fn fetch_observed<F>(
    url: &str,
    parameters: Option<&str>,
    config: &FetchConfig,
    mut observer: F,
) -> Result<Response, FetchError>
where
    F: FnMut(&Exchange<'_>),
{
    let mut current = url.to_string();
    let mut parameters = parameters;

    for redirects in 0..=config.max_redirects {
        let parts = parse_url(&current)?;
        let request = build_http_request(&parts, parameters);
        let raw = fetch_once(&parts, &request, config)?;
        let next = redirect_url(&raw, &parts);

        observer(&Exchange {
            url: &current,
            request: &request,
            response: &raw,
            redirect: next.as_deref(),
        });

        let Some(next) = next else {
            return Ok(Response::new(raw, current, redirects));
        };

        info!("Redirect #{}: {} -> {}", redirects + 1, current, next);
        current = next;
        parameters = None;
    }

    Err(FetchError::TooManyRedirects {
        max: config.max_redirects,
    })
}

/// One fetch cycle: connect, send the request and drain the response.
///
/// The connection is dropped, and so closed, before this returns.
fn fetch_once(
    parts: &UrlParts,
    request: &[u8],
    config: &FetchConfig,
) -> Result<Vec<u8>, FetchError> {
    debug!(
        "Request for {}:\n{}",
        parts,
        String::from_utf8_lossy(request)
    );

    let mut connection = Connection::connect(&parts.host, parts.port, config)?;
    connection.send(request)?;
    connection.receive_all(config.chunk_size)
}
