//! Terminal mode snapshot, restored when the run is interrupted.
//!
//! The password prompt turns echo off while it waits for input. Ctrl+C is
//! handled by the runtime rather than the default signal action, so the
//! prompt never gets the chance to switch echo back on before we exit.

#[cfg(unix)]
mod imp {
    use std::fs::File;
    use std::mem::MaybeUninit;
    use std::os::fd::AsRawFd;

    /// The controlling terminal's attributes as they were at startup.
    pub struct TerminalState {
        tty: File,
        saved: libc::termios,
    }

    impl TerminalState {
        /// Snapshot the controlling terminal, if there is one.
        pub fn capture() -> Option<Self> {
            let tty = File::options()
                .read(true)
                .write(true)
                .open("/dev/tty")
                .ok()?;
            Self::from_file(tty)
        }

        /// Snapshot the terminal behind `tty`; `None` if it is not a terminal.
        pub(crate) fn from_file(tty: File) -> Option<Self> {
            let mut saved = MaybeUninit::<libc::termios>::uninit();

            // SAFETY: the descriptor stays open for the lifetime of `tty`,
            // and `saved` is only read after tcgetattr reports success.
            unsafe {
                if libc::tcgetattr(tty.as_raw_fd(), saved.as_mut_ptr()) != 0 {
                    return None;
                }
                Some(Self {
                    tty,
                    saved: saved.assume_init(),
                })
            }
        }

        /// Put the terminal back the way it was captured.
        pub fn restore(&self) {
            // SAFETY: `saved` came from tcgetattr on this same descriptor.
            let rc = unsafe { libc::tcsetattr(self.tty.as_raw_fd(), libc::TCSANOW, &self.saved) };
            if rc != 0 {
                tracing::debug!(
                    error = %std::io::Error::last_os_error(),
                    "Could not restore terminal attributes"
                );
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    /// Console modes are restored by the OS on exit here.
    pub struct TerminalState;

    impl TerminalState {
        pub fn capture() -> Option<Self> {
            None
        }

        pub fn restore(&self) {}
    }
}

pub use imp::TerminalState;
