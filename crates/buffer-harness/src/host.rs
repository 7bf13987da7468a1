//! Host bindings.
//!
//! The harness never owns buffers. An embedding application implements [`BufferHost`] over its
//! own buffer list, and scripts reach buffers only through [`BufferRef`] lookup keys:
//!
//! - [`BufferHost::buf_cnt`] / [`BufferHost::buf_nr`] enumerate open buffers (1-based positions)
//! - the remaining trait methods answer metadata queries for one buffer
//! - [`Buffer`] pairs a key with its host so scripts can call `b.ffname()`, `b.line(2)`, ...
//!
//! All queries are read-only and idempotent within one host session.

use crate::error::HostError;
use std::num::NonZeroU32;
use std::process::Command;

/// Non-owning reference to one open buffer, keyed by the host's buffer number.
///
/// Buffer numbers are never zero, so a present reference is always truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferRef(NonZeroU32);

impl BufferRef {
    /// Create a reference for buffer `number`. Returns `None` for `0`.
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// The host's buffer number.
    pub fn number(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for BufferRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "buffer {}", self.0)
    }
}

/// The buffer-introspection surface a host application exposes to scripts.
///
/// Only [`buf_cnt`](Self::buf_cnt), [`buf_nr`](Self::buf_nr), [`ffname`](Self::ffname),
/// [`sfname`](Self::sfname), [`line_count`](Self::line_count) and [`line`](Self::line) are
/// required; the remaining methods have defaults built on top of them.
pub trait BufferHost {
    /// Number of open buffers.
    fn buf_cnt(&self) -> Result<usize, HostError>;

    /// Buffer at 1-based position `index` in the buffer list, or `None` when out of range.
    ///
    /// This is a positional lookup, not a lookup by buffer number: after buffer 1 is closed,
    /// `buf_nr(1)` returns whichever buffer is now first (for example number 2). Hosts whose own
    /// lookup is keyed by number must translate positions before answering.
    fn buf_nr(&self, index: i64) -> Result<Option<BufferRef>, HostError>;

    /// Full (absolute) file name, empty for an unnamed buffer.
    fn ffname(&self, buf: BufferRef) -> Result<String, HostError>;

    /// Short (display) file name, empty for an unnamed buffer.
    fn sfname(&self, buf: BufferRef) -> Result<String, HostError>;

    /// The buffer's file name as shown to the user. Defaults to [`sfname`](Self::sfname).
    fn fname(&self, buf: BufferRef) -> Result<String, HostError> {
        self.sfname(buf)
    }

    /// Number of lines in the buffer.
    fn line_count(&self, buf: BufferRef) -> Result<usize, HostError>;

    /// Text of 1-based line `n`, without its line terminator.
    fn line(&self, buf: BufferRef, n: i64) -> Result<String, HostError>;

    /// Lines `start..=end` (1-based), clamped to the buffer.
    fn lines(&self, buf: BufferRef, start: i64, end: i64) -> Result<Vec<String>, HostError> {
        let count = i64::try_from(self.line_count(buf)?).unwrap_or(i64::MAX);
        let start = start.max(1);
        let end = end.min(count);
        if start > end {
            return Ok(Vec::new());
        }
        (start..=end).map(|n| self.line(buf, n)).collect()
    }

    /// The buffer after `buf` in the buffer list.
    fn next(&self, buf: BufferRef) -> Result<Option<BufferRef>, HostError> {
        let Some(pos) = self.position_of(buf)? else {
            return Err(HostError::BufferClosed(buf.number()));
        };
        self.buf_nr(pos + 1)
    }

    /// The buffer before `buf` in the buffer list.
    fn prev(&self, buf: BufferRef) -> Result<Option<BufferRef>, HostError> {
        let Some(pos) = self.position_of(buf)? else {
            return Err(HostError::BufferClosed(buf.number()));
        };
        self.buf_nr(pos - 1)
    }

    /// Number of windows currently displaying the buffer. Hosts without windows report `0`.
    fn window_count(&self, _buf: BufferRef) -> Result<usize, HostError> {
        Ok(0)
    }

    /// Run a shell command. Hosts must opt in (see [`run_shell`]).
    fn system(&self, _command: &str) -> Result<(), HostError> {
        Err(HostError::Unsupported("system"))
    }

    /// 1-based position of `buf` in the buffer list.
    fn position_of(&self, buf: BufferRef) -> Result<Option<i64>, HostError> {
        let count = i64::try_from(self.buf_cnt()?).unwrap_or(i64::MAX);
        for index in 1..=count {
            if self.buf_nr(index)? == Some(buf) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

/// Run `command` through the platform shell, failing on a non-zero exit status.
///
/// Hosts that allow scripts to call `system` can forward [`BufferHost::system`] here.
pub fn run_shell(command: &str) -> Result<(), HostError> {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);

    let status = cmd.status().map_err(|err| HostError::CommandSpawn {
        command: command.to_string(),
        message: err.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(HostError::CommandFailed {
            command: command.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// A [`BufferRef`] bound to the host that owns it.
///
/// This is what scripts hold after `buf_nr(i)`: a lookup key plus accessors. It never copies
/// buffer contents beyond what an accessor returns.
#[derive(Clone, Copy)]
pub struct Buffer<'h> {
    host: &'h dyn BufferHost,
    id: BufferRef,
}

impl std::fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").field("id", &self.id).finish()
    }
}

impl PartialEq for Buffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<'h> Buffer<'h> {
    /// Bind `id` to `host`.
    pub fn new(host: &'h dyn BufferHost, id: BufferRef) -> Self {
        Self { host, id }
    }

    /// The underlying lookup key.
    pub fn id(&self) -> BufferRef {
        self.id
    }

    /// The host's buffer number.
    pub fn number(&self) -> u32 {
        self.id.number()
    }

    /// Full file name (empty if unnamed).
    pub fn ffname(&self) -> Result<String, HostError> {
        self.host.ffname(self.id)
    }

    /// Short file name (empty if unnamed).
    pub fn sfname(&self) -> Result<String, HostError> {
        self.host.sfname(self.id)
    }

    /// Display file name.
    pub fn fname(&self) -> Result<String, HostError> {
        self.host.fname(self.id)
    }

    /// Number of lines.
    pub fn line_count(&self) -> Result<usize, HostError> {
        self.host.line_count(self.id)
    }

    /// Text of 1-based line `n`.
    pub fn line(&self, n: i64) -> Result<String, HostError> {
        self.host.line(self.id, n)
    }

    /// Lines `start..=end`, clamped to the buffer.
    pub fn lines(&self, start: i64, end: i64) -> Result<Vec<String>, HostError> {
        self.host.lines(self.id, start, end)
    }

    /// Next buffer in the host's list.
    pub fn next(&self) -> Result<Option<Buffer<'h>>, HostError> {
        Ok(self.host.next(self.id)?.map(|id| Buffer::new(self.host, id)))
    }

    /// Previous buffer in the host's list.
    pub fn prev(&self) -> Result<Option<Buffer<'h>>, HostError> {
        Ok(self.host.prev(self.id)?.map(|id| Buffer::new(self.host, id)))
    }

    /// Number of windows displaying this buffer.
    pub fn window_count(&self) -> Result<usize, HostError> {
        self.host.window_count(self.id)
    }
}
