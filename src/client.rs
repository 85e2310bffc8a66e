use std::{
    io::{self, ErrorKind, Read, Write},
    net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs},
};

use log::{debug, trace};

use crate::{config::FetchConfig, error::FetchError};

/// An open TCP connection for a single fetch cycle.
///
/// The socket is shut down and closed when the value is dropped, so every
/// exit path out of a cycle releases it.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Resolve `host` and connect to the first address it yields.
    ///
    /// There is no fallback to further addresses and no retry.
    pub fn connect(host: &str, port: u16, config: &FetchConfig) -> Result<Self, FetchError> {
        let connect_error = |source: io::Error| FetchError::ConnectError {
            host: host.to_string(),
            port,
            source,
        };

        let addr = (host, port)
            .to_socket_addrs()
            .map_err(connect_error)?
            .next()
            .ok_or_else(|| {
                connect_error(io::Error::new(ErrorKind::NotFound, "no DNS records found"))
            })?;

        debug!("Connecting to {}:{} ({})", host, port, addr);

        let stream = match config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        }
        .map_err(connect_error)?;

        stream
            .set_read_timeout(config.read_timeout)
            .map_err(connect_error)?;
        stream
            .set_write_timeout(config.write_timeout)
            .map_err(connect_error)?;

        Ok(Self { stream, peer: addr })
    }

    /// Write the whole request to the peer.
    pub fn send(&mut self, request: &[u8]) -> Result<(), FetchError> {
        write_request(&mut self.stream, request)?;
        debug!("Sent {} bytes to {}", request.len(), self.peer);
        Ok(())
    }

    /// Read until the peer closes the connection.
    pub fn receive_all(&mut self, chunk_size: usize) -> Result<Vec<u8>, FetchError> {
        let response = read_to_close(&mut self.stream, chunk_size)?;
        debug!("Received {} bytes from {}", response.len(), self.peer);
        Ok(response)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // The peer may already have closed its side.
        let _ = self.stream.shutdown(Shutdown::Both);
        trace!("Closed connection to {}", self.peer);
    }
}

/// Write a whole request to any writer and flush it.
///
/// A writer that stops accepting bytes early is a `FetchError::SendError`.
pub fn write_request(stream: &mut impl Write, request: &[u8]) -> Result<(), FetchError> {
    stream
        .write_all(request)
        .and_then(|()| stream.flush())
        .map_err(FetchError::SendError)
}

/// Read a response from any reader until it reports end of stream.
///
/// Reads `chunk_size` bytes at a time into a growable buffer. A read error
/// discards everything accumulated so far; only a fully drained response is
/// returned.
///
/// # Arguments
///
/// * `stream` - A mutable reference to something that implements Read.
/// * `chunk_size` - The maximum number of bytes per read.
///
/// # Returns
///
/// * `Result<Vec<u8>, FetchError>` - The complete response, or `FetchError::ReceiveError`.
pub fn read_to_close(stream: &mut impl Read, chunk_size: usize) -> Result<Vec<u8>, FetchError> {
    let mut response = Vec::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                trace!("Read chunk of {} bytes", n);
                response.extend_from_slice(&buffer[..n]);
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!(
                    "Read error after {} bytes, discarding partial response: {}",
                    response.len(),
                    err
                );
                return Err(FetchError::ReceiveError(err));
            }
        }
    }

    Ok(response)
}
