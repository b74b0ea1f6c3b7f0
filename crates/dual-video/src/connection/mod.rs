pub mod client;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::message::ShowMessage;

/// Link to the show-control server: owns the reader thread and the inbound queue.
///
/// No reconnection: once the socket closes, `is_running` turns false and the
/// host decides what to do.
pub struct ShowConnection {
    inbound_rx: Receiver<ShowMessage>,
    shutdown: Arc<AtomicBool>,
    reader_handle: Option<JoinHandle<()>>,
    pub last_activity: Option<Instant>,
}

impl ShowConnection {
    pub fn connect(url: &str) -> anyhow::Result<Self> {
        // Unbounded: dropping a control message would corrupt the clip state.
        let (tx, rx) = crossbeam_channel::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = client::spawn_reader(url, tx, shutdown.clone())?;
        Ok(Self::from_parts(rx, shutdown, Some(handle)))
    }

    fn from_parts(
        inbound_rx: Receiver<ShowMessage>,
        shutdown: Arc<AtomicBool>,
        reader_handle: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            inbound_rx,
            shutdown,
            reader_handle,
            last_activity: None,
        }
    }

    /// Whether the reader thread is still alive.
    pub fn is_running(&self) -> bool {
        self.reader_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Everything received since the last call, in arrival order.
    pub fn drain(&mut self) -> Vec<ShowMessage> {
        let messages: Vec<ShowMessage> = self.inbound_rx.try_iter().collect();
        if !messages.is_empty() {
            self.last_activity = Some(Instant::now());
        }
        messages
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.reader_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ShowConnection {
    fn drop(&mut self) {
        self.stop();
    }
}
