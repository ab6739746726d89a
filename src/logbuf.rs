//! In-app log capture.
//!
//! The terminal is owned by the shell, so subscriber output cannot go to
//! stderr while the desktop is up. Formatted lines land in a shared ring
//! buffer instead, which the log viewer window reads, with an optional
//! mirror file for `--log-file`. The panic hook writes into the same
//! buffer because raw mode mangles the default panic output.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

const DEFAULT_CAPACITY: usize = 2000;

static SHARED_LOG: OnceLock<LogHandle> = OnceLock::new();
static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static PANIC_HOOK: OnceLock<()> = OnceLock::new();

pub fn set_global_log(handle: LogHandle) -> bool {
    SHARED_LOG.set(handle).is_ok()
}

pub fn global_log() -> Option<LogHandle> {
    SHARED_LOG.get().cloned()
}

/// Mirror every formatted log line to `path` in addition to the in-app buffer.
pub fn set_log_file(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOG_FILE.set(Mutex::new(file));
    Ok(())
}

/// Chains a hook that writes panic details into the log buffer, so they
/// survive in the mirror file even though the alternate screen eats stderr.
pub fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(log) = SHARED_LOG.get() {
            log.push(String::new());
            log.push("=== PANIC ===".to_string());
            if let Some(at) = info.location() {
                log.push(format!("{}:{}:{}", at.file(), at.line(), at.column()));
            }
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "<non-string panic>".to_string());
            log.push(format!("message: {message}"));
            let backtrace = std::backtrace::Backtrace::force_capture();
            for line in backtrace.to_string().lines() {
                log.push(line.to_string());
            }
            log.push("============".to_string());
        }
        prev(info);
    }));
}

#[derive(Debug)]
struct Ring {
    lines: VecDeque<String>,
    cap: usize,
}

/// Shared ring buffer of formatted log lines.
#[derive(Clone, Debug)]
pub struct LogHandle {
    inner: Arc<Mutex<Ring>>,
}

impl LogHandle {
    pub fn new(cap: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Ring {
                lines: VecDeque::new(),
                cap: cap.max(1),
            })),
        }
    }

    pub fn new_default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut ring) = self.inner.lock() {
            ring.lines.push_back(line.into());
            while ring.lines.len() > ring.cap {
                ring.lines.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|ring| ring.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(ring) => ring.lines.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn writer(&self) -> LogWriter {
        LogWriter {
            handle: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// Splits a byte stream into lines and feeds them to a [`LogHandle`].
///
/// Complete lines are pushed as they arrive; a trailing partial line is
/// held back until the next newline or an explicit flush.
#[derive(Debug)]
pub struct LogWriter {
    handle: LogHandle,
    pending: Vec<u8>,
}

impl LogWriter {
    fn drain_complete_lines(&mut self) {
        let Some(split) = self.pending.iter().rposition(|byte| *byte == b'\n') else {
            return;
        };
        let chunk: Vec<u8> = self.pending.drain(..=split).collect();
        self.push_lines(&chunk);
    }

    fn push_lines(&self, bytes: &[u8]) {
        for line in String::from_utf8_lossy(bytes).split('\n') {
            if !line.is_empty() {
                self.handle.push(line.to_string());
            }
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let rest = std::mem::take(&mut self.pending);
        self.push_lines(&rest);
        Ok(())
    }
}

enum Sink {
    Buffer(LogWriter),
    Stderr(io::Stderr),
}

/// One subscriber write destination, resolved per event.
///
/// Until `set_global_log` runs, lines fall back to stderr; afterwards they
/// go to the ring buffer, with a copy to the mirror file when one is set.
pub struct LogDestination {
    sink: Sink,
}

impl LogDestination {
    fn pick() -> Self {
        let sink = match global_log() {
            Some(handle) => Sink::Buffer(handle.writer()),
            None => Sink::Stderr(io::stderr()),
        };
        Self { sink }
    }
}

impl Write for LogDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = LOG_FILE.get()
            && let Ok(mut file) = file.lock()
        {
            let _ = file.write_all(buf);
        }
        match &mut self.sink {
            Sink::Buffer(w) => w.write(buf),
            Sink::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Buffer(w) => w.flush(),
            Sink::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MakeLogWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MakeLogWriter {
    type Writer = LogDestination;

    fn make_writer(&'a self) -> Self::Writer {
        LogDestination::pick()
    }
}

/// Install the global tracing subscriber. Safe to call more than once;
/// later calls lose the `try_init` race and are no-ops.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(MakeLogWriter)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
