//! Rotating-glyph progress indicator for blocking operations.
//!
//! [`Throbber::throb`] runs an action on the calling thread while a helper
//! thread overlays a spinner glyph at a fixed terminal column. Cleanup lives
//! in a `Drop` guard, so the animation is stopped and the cursor restored
//! whether the action returns, returns an error, or panics.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Glyph cycles; one is picked at random per invocation.
pub const THROBBERS: [[&str; 10]; 2] = [
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    ["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"],
];

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Cursor-up, written at the spinner column once the action finishes.
pub const DEFAULT_REDRAW: &str = "\x1b[1A";

const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Number of animations currently running in this process.
static ACTIVE: AtomicUsize = AtomicUsize::new(0);

/// Whether any throbber is currently animating.
pub fn is_active() -> bool {
    ACTIVE.load(Ordering::SeqCst) > 0
}

pub struct Throbber<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    position: usize,
    redraw: String,
    interval: Duration,
    enabled: bool,
}

impl Throbber<Stdout> {
    /// A throbber drawing on stdout at column 0.
    pub fn stdout() -> Self {
        Self::new(Arc::new(Mutex::new(io::stdout())))
    }
}

impl<W: Write + Send + 'static> Throbber<W> {
    pub fn new(out: Arc<Mutex<W>>) -> Self {
        Self {
            out,
            position: 0,
            redraw: DEFAULT_REDRAW.to_string(),
            interval: DEFAULT_INTERVAL,
            enabled: true,
        }
    }

    /// Terminal column the glyph is drawn at.
    pub fn position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Sequence written at the spinner column on completion.
    pub fn redraw(mut self, redraw: impl Into<String>) -> Self {
        self.redraw = redraw.into();
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A disabled throbber runs actions without drawing anything.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Run `action` with the spinner animating, returning its result.
    ///
    /// The animation thread is stopped and joined before the restore sequence
    /// is written, so no frame can land after it.
    pub fn throb<T>(&self, action: impl FnOnce() -> T) -> T {
        if !self.enabled {
            return action();
        }
        let _animation = Animation::start(self);
        action()
    }
}

/// A running animation. Dropping it stops the thread and restores the cursor.
struct Animation<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    position: usize,
    redraw: String,
}

impl<W: Write + Send + 'static> Animation<W> {
    fn start(throbber: &Throbber<W>) -> Self {
        let frames = THROBBERS[fastrand::usize(..THROBBERS.len())];
        let stop_flag = Arc::new(AtomicBool::new(false));

        let out = Arc::clone(&throbber.out);
        let stop = Arc::clone(&stop_flag);
        let position = throbber.position;
        let interval = throbber.interval;

        ACTIVE.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(position, "throbber started");

        let thread = thread::spawn(move || {
            let mut i = 0;
            while !stop.load(Ordering::SeqCst) {
                i = (i + 1) % frames.len();
                if let Ok(mut out) = out.lock() {
                    let _ = write!(out, "\r\x1b[{}G{}{}", position, frames[i], HIDE_CURSOR);
                    let _ = out.flush();
                }
                // Woken early by `stop`.
                thread::park_timeout(interval);
            }
        });

        Self {
            out: Arc::clone(&throbber.out),
            stop_flag,
            thread: Some(thread),
            position: throbber.position,
            redraw: throbber.redraw.clone(),
        }
    }

    fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl<W: Write + Send + 'static> Drop for Animation<W> {
    fn drop(&mut self) {
        self.stop();

        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(
            out,
            "\r\x1b[{}G{}{}",
            self.position, self.redraw, SHOW_CURSOR
        );
        let _ = out.flush();

        ACTIVE.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("throbber stopped");
    }
}
