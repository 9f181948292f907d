//! Line input read off the async runtime
//!
//! Blocking reads live on a plain thread so an unfinished read never holds
//! the runtime open once the screen has returned.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

const LINE_BUFFER: usize = 16;

/// Forward lines from `reader` into a channel
///
/// The channel closes at end of input or on a read error. The thread exits
/// after its next line once the receiver is gone.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    thread::Builder::new()
        .name("fint-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input");
                        break;
                    }
                }
            }
            debug!(event = "input_reader_stopped", "Input reader stopped");
        })?;

    Ok(rx)
}
