use std::time::Duration;

/// Redirects followed before a fetch gives up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Size of each read from the socket.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Settings for a fetch. `None` timeouts block indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub max_redirects: usize,
    pub chunk_size: usize,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: Some(Duration::from_secs(10)),
            read_timeout: Some(Duration::from_secs(30)),
            write_timeout: Some(Duration::from_secs(10)),
        }
    }
}
