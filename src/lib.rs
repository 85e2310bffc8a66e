pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod redirect;
pub mod response;
pub mod utils;


// Re-export main types for easy access
pub use args::{Args, UsageError};
pub use client::{read_to_close, write_request, Connection};
pub use config::FetchConfig;
pub use error::FetchError;
pub use http::build_http_request;
pub use redirect::{
    fetch, fetch_observed, fetch_with, resolve_location, Exchange, RedirectKind, RedirectTarget,
};
pub use response::Response;
pub use utils::{parse_url, UrlParts};
