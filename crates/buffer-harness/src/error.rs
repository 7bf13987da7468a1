//! Errors raised by hosts and propagated through the harness.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors raised by a [`BufferHost`](crate::BufferHost).
///
/// The harness never recovers from these: they propagate unmodified to whoever runs the script.
pub enum HostError {
    #[error("host has no buffer list")]
    /// The host has no concept of open buffers.
    NoBufferList,

    #[error("buffer {0} is no longer open")]
    /// A buffer reference outlived the buffer it points to.
    BufferClosed(u32),

    #[error("buffer {buffer} has no line {line}")]
    /// `line(n)` was asked for a line outside the buffer.
    LineOutOfRange {
        /// Buffer number.
        buffer: u32,
        /// Requested 1-based line number.
        line: i64,
    },

    #[error("a buffer named '{0}' is already open")]
    /// The host refused to open a second buffer with the same full name.
    AlreadyOpen(String),

    #[error("command failed with exit code {code}: {command}")]
    /// `system(command)` exited with a non-zero status.
    CommandFailed {
        /// The shell command line.
        command: String,
        /// Exit code (`-1` when the process was killed by a signal).
        code: i32,
    },

    #[error("could not start command '{command}': {message}")]
    /// `system(command)` could not spawn a shell.
    CommandSpawn {
        /// The shell command line.
        command: String,
        /// The OS error message.
        message: String,
    },

    #[error("{0} is not available in this host")]
    /// The host does not provide this binding.
    Unsupported(&'static str),

    #[error("{0}")]
    /// Any other host-specific failure.
    Other(String),
}
