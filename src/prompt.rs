//! Passphrase prompting boundary.
//!
//! The private-key loader never talks to a terminal itself; it starts a
//! [`PrompterSession`] through a [`Prompter`] and asks it for passphrase
//! guesses.  [`TtyPrompter`] is the interactive implementation: it opens
//! `/dev/tty` and reads with terminal echo disabled, restoring the original
//! terminal state via an RAII guard on every exit path.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::io::{AsRawFd, RawFd};

use serde::Serialize;
use tracing::debug;
use zeroize::Zeroizing;

/// Context handed to a prompter when a session starts.
///
/// `fingerprint` is a digest of the raw material — diagnostic only, so the
/// human can tell *which* key is asking.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    pub purpose: String,
    pub filename: String,
    pub fingerprint: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("prompt unavailable: {0}")]
    Unavailable(String),
}

/// Creates prompting sessions.  One session covers one load attempt series.
pub trait Prompter {
    fn start(&self, context: PromptContext) -> Result<Box<dyn PrompterSession + '_>, PromptError>;
}

/// A live prompting session.
pub trait PrompterSession {
    /// Ask the human for the next guess.  `echo = false` means the input
    /// must not be displayed as it is typed.
    fn ask(&mut self, message: &str, echo: bool) -> Result<Zeroizing<String>, PromptError>;

    /// Signal that the material was decoded, so the session can clear any
    /// transient UI state.
    fn success(&mut self);
}

// ---------------------------------------------------------------------------
// TTY implementation
// ---------------------------------------------------------------------------

/// Interactive prompter reading from the controlling terminal.
pub struct TtyPrompter;

impl Prompter for TtyPrompter {
    fn start(&self, context: PromptContext) -> Result<Box<dyn PrompterSession + '_>, PromptError> {
        let tty = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .map_err(|e| PromptError::Unavailable(format!("/dev/tty: {e}")))?;
        debug!(
            purpose = %context.purpose,
            filename = %context.filename,
            fingerprint = %context.fingerprint,
            "prompt session started"
        );
        Ok(Box::new(TtySession { tty, context }))
    }
}

struct TtySession {
    tty: File,
    context: PromptContext,
}

impl PrompterSession for TtySession {
    fn ask(&mut self, message: &str, echo: bool) -> Result<Zeroizing<String>, PromptError> {
        let mut w = &self.tty;
        w.write_all(message.as_bytes())?;
        w.flush()?;
        let value = if echo {
            read_line(&self.tty)?
        } else {
            read_hidden(&self.tty)?
        };
        Ok(value)
    }

    fn success(&mut self) {
        debug!(filename = %self.context.filename, "prompt session succeeded");
    }
}

// ---------------------------------------------------------------------------
// TermiosGuard — RAII terminal-state restoration
// ---------------------------------------------------------------------------

/// Restores the original `termios` settings on the given fd when dropped, so
/// echo comes back even if the read fails or the thread panics.
struct TermiosGuard {
    fd: RawFd,
    orig: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        // Best-effort restore; a dead fd no longer has terminal state worth
        // saving.
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSANOW, &self.orig);
        }
    }
}

fn read_line(tty: &File) -> Result<Zeroizing<String>, PromptError> {
    let mut buf = Zeroizing::new(Vec::<u8>::new());
    BufReader::new(tty).read_until(b'\n', &mut buf)?;
    buf_to_string(buf)
}

/// Read one line with terminal echo disabled.
///
/// Saves the current `termios`, clears `ECHO`/`ECHONL` (applying with
/// `TCSAFLUSH` so stale keypresses are discarded), reads into a `Zeroizing`
/// buffer, then restores the original settings via the guard.
fn read_hidden(tty: &File) -> Result<Zeroizing<String>, PromptError> {
    let fd = tty.as_raw_fd();

    // SAFETY: fd is a valid open tty and term is initialised by tcgetattr
    // before assume_init.
    let guard = unsafe {
        let mut term = std::mem::MaybeUninit::<libc::termios>::uninit();
        if libc::tcgetattr(fd, term.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error().into());
        }
        TermiosGuard {
            fd,
            orig: term.assume_init(),
        }
    };

    let mut noecho = guard.orig;
    noecho.c_lflag &= !(libc::ECHO as libc::tcflag_t);
    noecho.c_lflag &= !(libc::ECHONL as libc::tcflag_t);

    unsafe {
        if libc::tcsetattr(fd, libc::TCSAFLUSH, &noecho) != 0 {
            return Err(io::Error::last_os_error().into());
        }
    }

    let mut buf = Zeroizing::new(Vec::<u8>::new());
    let result = BufReader::new(tty).read_until(b'\n', &mut buf);

    // Restore before writing the newline so it is echoed normally.
    drop(guard);
    let mut w = tty;
    let _ = w.write_all(b"\n");

    result?;
    buf_to_string(buf)
}

fn buf_to_string(mut buf: Zeroizing<Vec<u8>>) -> Result<Zeroizing<String>, PromptError> {
    while buf.last() == Some(&b'\n') || buf.last() == Some(&b'\r') {
        buf.pop();
    }
    let s = std::str::from_utf8(&buf)
        .map_err(|e| PromptError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(Zeroizing::new(s.to_string()))
}
