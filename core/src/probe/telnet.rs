//! Single telnet-style credential attempt.
//!
//! One attempt owns one blocking TCP stream with OS-enforced timeouts and
//! performs the fixed three-step exchange: read the banner, send the
//! username, read the prompt, send the password, read the verdict. The
//! verdict is classified by scanning for shell indicators.
//!
//! A refused connection, a timeout or a short read all mean the same
//! thing to the caller: this pair did not work. Only the classification
//! result leaves this module.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use tracing::trace;

use barrage_common::endpoint::Endpoint;

const RESPONSE_BUFFER_SIZE: usize = 1024;

/// Substrings in the final response that indicate a successful login.
const SUCCESS_MARKERS: &[&str] = &["$", "#", ">", "Welcome", "Last login"];

/// Tries one username/password pair against the endpoint.
///
/// Returns `true` only when the exchange completed and the final response
/// looks like a shell. The stream is dropped on every path.
pub fn attempt(endpoint: &Endpoint, username: &str, password: &str, io_timeout: Duration) -> bool {
    match exchange(endpoint, username, password, io_timeout) {
        Ok(response) => {
            let ok = is_shell_response(&response);
            trace!(endpoint = %endpoint, username, ok, "credential attempt finished");
            ok
        }
        Err(e) => {
            trace!(endpoint = %endpoint, username, "credential attempt aborted: {e}");
            false
        }
    }
}

/// Runs the wire exchange and returns the final response text.
fn exchange(
    endpoint: &Endpoint,
    username: &str,
    password: &str,
    io_timeout: Duration,
) -> std::io::Result<String> {
    let mut stream = TcpStream::connect_timeout(&endpoint.socket_addr(), io_timeout)?;
    stream.set_read_timeout(Some(io_timeout))?;
    stream.set_write_timeout(Some(io_timeout))?;

    let mut buffer = [0u8; RESPONSE_BUFFER_SIZE];

    // Banner, then identity.
    read_some(&mut stream, &mut buffer)?;
    stream.write_all(format!("{username}\r\n").as_bytes())?;

    // Password prompt, then secret.
    read_some(&mut stream, &mut buffer)?;
    stream.write_all(format!("{password}\r\n").as_bytes())?;

    // Final verdict.
    let n = read_some(&mut stream, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer[..n]).into_owned())
}

/// Reads at least one byte or fails. A zero-length read means the peer
/// hung up mid-exchange.
fn read_some(stream: &mut TcpStream, buffer: &mut [u8]) -> std::io::Result<usize> {
    let n = stream.read(buffer)?;
    if n == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "peer closed the connection",
        ));
    }
    Ok(n)
}

fn is_shell_response(response: &str) -> bool {
    SUCCESS_MARKERS
        .iter()
        .any(|marker| response.contains(marker))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
