use crate::utils::UrlParts;

/// Build an HTTP GET request for the given URL parts.
///
/// The query string is appended to the request line only; `parts.path` is
/// left untouched. An empty query string is treated as absent.
///
/// # Arguments
///
/// * `parts` - The parsed URL to request.
/// * `parameters` - An already `&`-joined `name=value` query string, if any.
///
/// # Returns
///
/// * `Vec<u8>` - The raw request bytes.
pub fn build_http_request(parts: &UrlParts, parameters: Option<&str>) -> Vec<u8> {
    let target = match parameters {
        Some(query) if !query.is_empty() => format!("{}?{}", parts.path, query),
        _ => parts.path.clone(),
    };

    format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target, parts.host
    )
    .into_bytes()
}
