//! In-progress indicator shown while a remote call is outstanding.
//!
//! The spinner draws on stderr from a ticker thread and is cleared when it is
//! dropped, so every exit path out of the guarded scope removes it.

use std::cell::RefCell;
use std::io::{stderr, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(80);

/// Shows that a remote call is outstanding
pub trait Progress {
    fn begin(&self, message: &str);
    fn finish(&self);
}

/// Keeps `progress` running until dropped
pub struct ProgressScope<'a> {
    progress: &'a dyn Progress,
}

impl<'a> ProgressScope<'a> {
    pub fn begin(progress: &'a dyn Progress, message: &str) -> Self {
        progress.begin(message);
        Self { progress }
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.progress.finish();
    }
}

/// Draws a [`Spinner`] on stderr, or nothing when disabled
#[derive(Default)]
pub struct SpinnerProgress {
    enabled: bool,
    spinner: RefCell<Option<Spinner>>,
}

impl SpinnerProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            spinner: RefCell::default(),
        }
    }
}

impl Progress for SpinnerProgress {
    fn begin(&self, message: &str) {
        if self.enabled {
            self.spinner.replace(Some(Spinner::start(message)));
        }
    }

    fn finish(&self) {
        // Dropping the spinner joins its thread and clears the line.
        self.spinner.take();
    }
}

pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let running = Arc::clone(&running);
            let message = message.to_string();
            thread::spawn(move || {
                let mut frame = 0usize;
                while running.load(Ordering::Relaxed) {
                    let _ = draw(FRAMES[frame % FRAMES.len()], &message);
                    frame = frame.wrapping_add(1);
                    thread::sleep(TICK);
                }
            })
        };

        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            let _ = clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn draw(frame: char, message: &str) -> std::io::Result<()> {
    let mut stderr = stderr();
    queue!(
        stderr,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::Cyan),
        Print(frame),
        ResetColor,
        Print(format!(" {message}"))
    )?;
    stderr.flush()
}

fn clear() -> std::io::Result<()> {
    let mut stderr = stderr();
    queue!(stderr, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    stderr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_draws_nothing() {
        let progress = SpinnerProgress::new(false);
        progress.begin("Working");
        assert!(progress.spinner.borrow().is_none());
    }

    #[test]
    fn test_scope_stops_spinner_on_drop() {
        let progress = SpinnerProgress::new(true);
        let running = {
            let _scope = ProgressScope::begin(&progress, "Working");
            let spinner = progress.spinner.borrow();
            let spinner = spinner.as_ref().unwrap();
            assert!(spinner.handle.is_some());
            Arc::clone(&spinner.running)
        };

        assert!(progress.spinner.borrow().is_none());
        assert!(!running.load(Ordering::Relaxed));
    }
}
