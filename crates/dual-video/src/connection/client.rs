use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use tungstenite::protocol::Message;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::WebSocket;

use crate::message::{ShowMessage, parse_message};

/// Connect to `url` and spawn the reader thread. Fails if the handshake fails.
pub fn spawn_reader(
    url: &str,
    tx: Sender<ShowMessage>,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<JoinHandle<()>> {
    let (mut ws, _response) = tungstenite::connect(url)?;
    // Short read timeout so the loop can notice the shutdown flag
    if let MaybeTlsStream::Plain(stream) = ws.get_mut() {
        stream.set_read_timeout(Some(Duration::from_millis(100)))?;
    }
    log::info!("Connected to show server at {url}");

    let handle = thread::Builder::new()
        .name("dual-video-show-rx".into())
        .spawn(move || run_reader(ws, &tx, &shutdown))?;
    Ok(handle)
}

/// Read text frames until the socket closes or shutdown is requested,
/// forwarding every recognised message in arrival order.
pub fn run_reader<S: Read + Write>(
    mut ws: WebSocket<S>,
    tx: &Sender<ShowMessage>,
    shutdown: &AtomicBool,
) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match ws.read() {
            Ok(Message::Text(text)) => {
                if let Some(msg) = parse_message(text.as_str()) {
                    if tx.send(msg).is_err() {
                        log::debug!("Message receiver dropped, stopping reader");
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                log::info!("Show server closed connection");
                break;
            }
            Ok(_) => {} // Binary, Ping, Pong
            Err(tungstenite::Error::Io(ref e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                log::info!("Show server connection closed");
                break;
            }
            Err(e) => {
                log::warn!("Show server read error: {e}");
                break;
            }
        }
    }

    let _ = ws.close(None);
    let _ = ws.flush();
    log::info!("Show server reader shutting down");
}
