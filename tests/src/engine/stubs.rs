//! Loopback stub services the engine is exercised against.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// A UDP listener that counts every datagram it receives.
pub struct UdpSink {
    pub port: u16,
    received: Arc<AtomicU64>,
}

impl UdpSink {
    pub async fn start() -> UdpSink {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        let received = Arc::new(AtomicU64::new(0));
        let counter = received.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 2048];
            while socket.recv_from(&mut buf).await.is_ok() {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        UdpSink { port, received }
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

/// A minimal telnet-style responder: banner, username, password prompt,
/// then a shell-looking response for accepted pairs and a rejection for
/// everything else.
pub struct TelnetStub {
    pub port: u16,
}

impl TelnetStub {
    pub async fn start(accepted: Vec<(&str, &str)>) -> TelnetStub {
        let accepted: Vec<(String, String)> = accepted
            .into_iter()
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let accepted = accepted.clone();
                tokio::spawn(async move {
                    let _ = serve_login(stream, &accepted).await;
                });
            }
        });

        TelnetStub { port }
    }
}

async fn serve_login(
    mut stream: TcpStream,
    accepted: &[(String, String)],
) -> std::io::Result<()> {
    stream.write_all(b"login: ").await?;
    let username = read_line(&mut stream).await?;

    stream.write_all(b"Password: ").await?;
    let password = read_line(&mut stream).await?;

    let ok = accepted
        .iter()
        .any(|(u, p)| *u == username && *p == password);

    if ok {
        stream.write_all(b"Welcome\r\nbox$ ").await?;
    } else {
        stream.write_all(b"Login incorrect").await?;
    }
    Ok(())
}

async fn read_line(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = [0u8; 256];
    let n = stream.read(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf[..n]).trim().to_string())
}
