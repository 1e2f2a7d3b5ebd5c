//! Operator input.
//!
//! Lines are read on a dedicated OS thread and forwarded over a channel. A
//! blocked read there cannot hold up runtime shutdown after Ctrl+C; the
//! thread simply dies with the process.

use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;

const INPUT_CHANNEL_CAPACITY: usize = 16;

/// Start reading lines from `reader` in the background.
///
/// The channel closes at end of input, after a read error (which is sent
/// first), or once the receiver is dropped and another line arrives.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<std::io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);

    thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });

    rx
}

/// Read operator commands from the process's stdin.
pub fn stdin_lines() -> mpsc::Receiver<std::io::Result<String>> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
}
