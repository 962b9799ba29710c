use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

use crate::protocol::read_line;

/// Spawn a thread that logs every line the device sends.
///
/// Diagnostics only. It owns its own read handle and stops when `running`
/// is cleared or the port reports a hard error.
pub fn spawn_monitor<R>(mut reader: R, running: Arc<AtomicBool>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        debug!("Serial monitor started");

        while running.load(Ordering::Relaxed) {
            match read_line(&mut reader) {
                // Timed out with nothing pending
                Ok(line) if line.is_empty() => continue,
                Ok(line) => info!("Serial: {:?}", String::from_utf8_lossy(&line)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Serial monitor stopped: {}", e);
                    break;
                }
            }
        }
    })
}
