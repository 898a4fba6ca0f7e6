//! Terminal setup and restore
//!
//! [`TerminalSession`] puts the terminal in raw mode with the alternate
//! screen, mouse capture and bracketed paste, and undoes all of it when it
//! is left or dropped. A failure halfway through setup still leaves the
//! terminal cooked.

use std::io::{self, Write};

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use tracing::warn;

/// Switch for the terminal line discipline
pub trait RawMode {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

/// Raw mode of the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermRawMode;

impl RawMode for CrosstermRawMode {
    fn enable(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

/// Full screen terminal state, restored on [`TerminalSession::leave`] or drop
pub struct TerminalSession<W: Write, R: RawMode = CrosstermRawMode> {
    out: W,
    raw: R,
    active: bool,
}

impl<W: Write, R: RawMode> TerminalSession<W, R> {
    pub fn enter(mut out: W, mut raw: R) -> io::Result<Self> {
        raw.enable()?;
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste) {
            let _ = raw.disable();
            let _ = execute!(out, DisableBracketedPaste, DisableMouseCapture, LeaveAlternateScreen);
            return Err(err);
        }
        Ok(Self {
            out,
            raw,
            active: true,
        })
    }

    /// Restore the terminal, reporting the first failure
    pub fn leave(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let raw = self.raw.disable();
        let screen = execute!(
            self.out,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        raw.and(screen)
    }
}

impl<W: Write, R: RawMode> Drop for TerminalSession<W, R> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "terminal restore failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    const ENTER_ALT: &str = "\x1b[?1049h";
    const LEAVE_ALT: &str = "\x1b[?1049l";

    /// Raw mode flag shared with the test
    #[derive(Clone, Default)]
    struct FakeRaw(Rc<Cell<bool>>);

    impl RawMode for FakeRaw {
        fn enable(&mut self) -> io::Result<()> {
            self.0.set(true);
            Ok(())
        }

        fn disable(&mut self) -> io::Result<()> {
            self.0.set(false);
            Ok(())
        }
    }

    /// Output buffer shared with the test
    #[derive(Clone, Default)]
    struct SharedOut(Rc<RefCell<Vec<u8>>>);

    impl SharedOut {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedOut {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Terminal that rejects every write
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_setup_leaves_raw_mode() {
        let raw = FakeRaw::default();
        let result = TerminalSession::enter(Broken, raw.clone());
        assert!(result.is_err());
        assert!(!raw.0.get());
    }

    #[test]
    fn test_enter_then_leave() {
        let raw = FakeRaw::default();
        let out = SharedOut::default();
        let session = TerminalSession::enter(out.clone(), raw.clone()).unwrap();
        assert!(raw.0.get());
        assert!(out.text().contains(ENTER_ALT));
        assert!(!out.text().contains(LEAVE_ALT));

        session.leave().unwrap();
        assert!(!raw.0.get());
        assert!(out.text().ends_with(LEAVE_ALT));
    }

    #[test]
    fn test_drop_restores_terminal() {
        let raw = FakeRaw::default();
        let out = SharedOut::default();
        {
            let _session = TerminalSession::enter(out.clone(), raw.clone()).unwrap();
            assert!(raw.0.get());
        }
        assert!(!raw.0.get());
        assert!(out.text().ends_with(LEAVE_ALT));
    }

    #[test]
    fn test_leave_restores_once() {
        let raw = FakeRaw::default();
        let out = SharedOut::default();
        TerminalSession::enter(out.clone(), raw.clone()).unwrap().leave().unwrap();
        assert_eq!(out.text().matches(LEAVE_ALT).count(), 1);
    }
}
