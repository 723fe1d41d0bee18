//! Request intake: from a named pipe (or stdin) to the dispatcher.
//!
//! A dedicated OS thread blocks on the pipe, parses each line into a
//! [HallCall] and pushes it on an unbounded crossbeam channel. The dispatcher
//! polls the other end through [RequestSource] exactly once per round, so calls
//! queue up instead of getting lost while the bank is busy.
//!
//! Writing a request from a shell:
//! ```text
//! echo "5,up,7" > /tmp/elevator_request_queue
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::Context;
use crossbeam_channel as cbc;

use crate::config::{self, SimConfig};
use crate::elevator_logic::request::HallCall;
use crate::print;

/// Where the dispatcher gets new calls from. Never blocks.
pub trait RequestSource {
    /// The next waiting call, or `None` if nothing is available right now.
    fn next_request(&mut self) -> Option<HallCall>;
}

impl RequestSource for cbc::Receiver<HallCall> {
    fn next_request(&mut self) -> Option<HallCall> {
        self.try_recv().ok()
    }
}

impl RequestSource for VecDeque<HallCall> {
    fn next_request(&mut self) -> Option<HallCall> {
        self.pop_front()
    }
}

/// The channel between the reader thread and the dispatcher.
pub fn channel() -> (cbc::Sender<HallCall>, cbc::Receiver<HallCall>) {
    cbc::unbounded::<HallCall>()
}

/// Starts the reader thread for the source named in `config`.
///
/// For a pipe path the pipe is created first if it does not exist.
pub fn spawn_reader(config: &SimConfig, call_tx: cbc::Sender<HallCall>) -> anyhow::Result<thread::JoinHandle<()>> {
    if config.reads_stdin() {
        print::info("Reading requests from stdin".to_string());
        let handle = thread::Builder::new()
            .name("request-reader".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                match forward_lines(stdin.lock(), &call_tx) {
                    Ok(_) => print::warn("stdin closed, no more requests will arrive".to_string()),
                    Err(e) => print::err(format!("Reading stdin failed: {:#}", e)),
                }
            })
            .context("Failed to spawn request reader")?;
        return Ok(handle);
    }

    let path = config.request_pipe.clone();
    ensure_pipe(&path)?;
    print::info(format!("Listening for requests on {}", path.display()));

    thread::Builder::new()
        .name("request-reader".to_string())
        .spawn(move || read_pipe(path, call_tx))
        .context("Failed to spawn request reader")
}

/// Reads `path` forever, reopening it whenever the last writer hangs up.
/// A regular file is read once.
fn read_pipe(path: PathBuf, call_tx: cbc::Sender<HallCall>) {
    loop {
        // Blokkerer til nokon opnar pipa for skriving
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                print::err(format!("Failed to open {}: {}", path.display(), e));
                thread::sleep(config::READER_RETRY_DELAY);
                continue;
            }
        };

        match forward_lines(BufReader::new(file), &call_tx) {
            Ok(true) => {
                if !is_fifo(&path) {
                    print::info(format!("Reached end of {}", path.display()));
                    return;
                }
            }
            Ok(false) => return,
            Err(e) => {
                print::err(format!("Reading {} failed: {:#}", path.display(), e));
                thread::sleep(config::READER_RETRY_DELAY);
            }
        }
    }
}

/// Parses every line of `reader` and sends the valid calls on `call_tx`.
///
/// Blank lines are skipped and lines that fail to parse are logged and dropped.
/// Returns `Ok(false)` if the dispatcher has hung up, `Ok(true)` at end of input.
pub fn forward_lines<R: BufRead>(reader: R, call_tx: &cbc::Sender<HallCall>) -> anyhow::Result<bool> {
    for line in reader.lines() {
        let line = line.context("Failed to read request line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        print::info(format!("Received: '{}'", line));
        match line.parse::<HallCall>() {
            Ok(call) => {
                if call_tx.send(call).is_err() {
                    return Ok(false);
                }
            }
            Err(e) => print::warn(format!("Dropping request '{}': {:#}", line, e)),
        }
    }
    Ok(true)
}

/// Creates the named pipe at `path` unless something already exists there.
#[cfg(unix)]
fn ensure_pipe(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    let status = std::process::Command::new("mkfifo")
        .arg(path)
        .status()
        .context("Failed to run mkfifo")?;
    if !status.success() {
        anyhow::bail!("mkfifo {} exited with {}", path.display(), status);
    }
    print::ok(format!("Created request pipe {}", path.display()));
    Ok(())
}

#[cfg(not(unix))]
fn ensure_pipe(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    anyhow::bail!(
        "{} does not exist and named pipes are unix only, use pipe::{} to read stdin",
        path.display(),
        config::STDIN_SOURCE
    )
}

#[cfg(unix)]
fn is_fifo(path: &Path) -> bool {
    use std::os::unix::fs::FileTypeExt;
    std::fs::metadata(path)
        .map(|meta| meta.file_type().is_fifo())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_fifo(_path: &Path) -> bool {
    false
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevator_logic::request::Heading;
    use std::io::Cursor;

    #[test]
    fn forwards_valid_lines_and_skips_the_rest() {
        let (tx, mut rx) = channel();
        let input = Cursor::new("5,up,7\nnot a request\n\n  2,down,1  \n3,idle,1\n");

        assert!(forward_lines(input, &tx).unwrap());

        assert_eq!(rx.next_request(), Some(HallCall::new(5, Heading::Up, 7)));
        assert_eq!(rx.next_request(), Some(HallCall::new(2, Heading::Down, 1)));
        assert_eq!(rx.next_request(), None);
    }

    #[test]
    fn stops_when_dispatcher_is_gone() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!forward_lines(Cursor::new("5,up,7\n"), &tx).unwrap());
    }

    #[test]
    fn channel_keeps_every_call_until_polled() {
        let (tx, mut rx) = channel();
        for floor in 1..=3 {
            tx.send(HallCall::new(floor, Heading::Up, 7)).unwrap();
        }
        // one per poll, in arrival order
        assert_eq!(rx.next_request().map(|c| c.origin), Some(1));
        assert_eq!(rx.next_request().map(|c| c.origin), Some(2));
        assert_eq!(rx.next_request().map(|c| c.origin), Some(3));
        assert_eq!(rx.next_request(), None);
    }

    #[test]
    fn queue_source_pops_in_order() {
        let mut queue: VecDeque<HallCall> = VecDeque::from(vec![HallCall::new(4, Heading::Down, 1)]);
        assert_eq!(queue.next_request(), Some(HallCall::new(4, Heading::Down, 1)));
        assert_eq!(queue.next_request(), None);
    }

    #[test]
    fn regular_file_is_read_once() {
        let path = std::env::temp_dir().join(format!("elevatorbank-intake-{}.txt", std::process::id()));
        std::fs::write(&path, "6,down,2\n").unwrap();
        let (tx, mut rx) = channel();

        read_pipe(path.clone(), tx);

        assert_eq!(rx.next_request(), Some(HallCall::new(6, Heading::Down, 2)));
        let _ = std::fs::remove_file(&path);
    }
}
