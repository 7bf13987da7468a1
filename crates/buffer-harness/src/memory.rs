//! An in-memory [`BufferHost`] for tests and demos.
//!
//! `MemoryHost` keeps a list of named line vectors. It models the parts of an editor's buffer list
//! that the harness can observe (numbering, names, lines, list order) and nothing else.

use crate::error::HostError;
use crate::host::{BufferHost, BufferRef, run_shell};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct BufferEntry {
    id: BufferRef,
    ffname: Option<String>,
    sfname: Option<String>,
    lines: Vec<String>,
    windows: usize,
}

/// A fake host holding buffers in memory.
///
/// Buffer numbers start at 1 and are never reused within one host, like an editor session:
/// closing buffer 2 of 3 leaves buffers 1 and 3 at positions 1 and 2. Once `u32::MAX` has been
/// handed out, [`open_buffer`](Self::open_buffer) fails.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    next_number: u64,
    buffers: Vec<BufferEntry>,
    cwd: Option<PathBuf>,
    shell: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            next_number: 1,
            buffers: Vec::new(),
            cwd: None,
            shell: false,
        }
    }
}

impl MemoryHost {
    /// Create a host with no buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative names against `cwd` and shorten names under it.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Allow scripts to run shell commands through `system`.
    pub fn with_shell(mut self, enabled: bool) -> Self {
        self.shell = enabled;
        self
    }

    /// Open a buffer. `name` is a file path (absolute, or relative to the configured cwd); `None`
    /// opens an unnamed buffer.
    pub fn open_buffer(&mut self, name: Option<&str>, text: &str) -> Result<BufferRef, HostError> {
        let (ffname, sfname) = match name {
            Some(name) => {
                let (full, short) = self.resolve_name(name);
                if self
                    .buffers
                    .iter()
                    .any(|b| b.ffname.as_deref() == Some(full.as_str()))
                {
                    return Err(HostError::AlreadyOpen(full));
                }
                (Some(full), Some(short))
            }
            None => (None, None),
        };

        let id = u32::try_from(self.next_number)
            .ok()
            .and_then(BufferRef::new)
            .ok_or_else(|| HostError::Other("buffer numbers exhausted".to_string()))?;
        self.next_number += 1;

        self.buffers.push(BufferEntry {
            id,
            ffname,
            sfname,
            lines: split_lines(text),
            windows: 0,
        });
        Ok(id)
    }

    /// Close a buffer. Its number is not reused.
    pub fn close_buffer(&mut self, buf: BufferRef) -> Result<(), HostError> {
        let Some(pos) = self.buffers.iter().position(|b| b.id == buf) else {
            return Err(HostError::BufferClosed(buf.number()));
        };
        self.buffers.remove(pos);
        Ok(())
    }

    /// Set how many windows display `buf`.
    pub fn set_window_count(&mut self, buf: BufferRef, windows: usize) -> Result<(), HostError> {
        self.entry_mut(buf)?.windows = windows;
        Ok(())
    }

    fn entry(&self, buf: BufferRef) -> Result<&BufferEntry, HostError> {
        self.buffers
            .iter()
            .find(|b| b.id == buf)
            .ok_or(HostError::BufferClosed(buf.number()))
    }

    fn entry_mut(&mut self, buf: BufferRef) -> Result<&mut BufferEntry, HostError> {
        self.buffers
            .iter_mut()
            .find(|b| b.id == buf)
            .ok_or(HostError::BufferClosed(buf.number()))
    }

    fn resolve_name(&self, name: &str) -> (String, String) {
        let path = Path::new(name);
        let Some(cwd) = self.cwd.as_deref() else {
            return (name.to_string(), name.to_string());
        };

        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        let short = full
            .strip_prefix(cwd)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| full.clone());
        (
            full.to_string_lossy().into_owned(),
            short.to_string_lossy().into_owned(),
        )
    }
}

/// Split text into lines. A buffer always has at least one (possibly empty) line, and a trailing
/// newline does not start a new line.
fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);
    body.split('\n').map(str::to_string).collect()
}

impl BufferHost for MemoryHost {
    fn buf_cnt(&self) -> Result<usize, HostError> {
        Ok(self.buffers.len())
    }

    fn buf_nr(&self, index: i64) -> Result<Option<BufferRef>, HostError> {
        if index < 1 {
            return Ok(None);
        }
        let Ok(pos) = usize::try_from(index - 1) else {
            return Ok(None);
        };
        Ok(self.buffers.get(pos).map(|b| b.id))
    }

    fn ffname(&self, buf: BufferRef) -> Result<String, HostError> {
        Ok(self.entry(buf)?.ffname.clone().unwrap_or_default())
    }

    fn sfname(&self, buf: BufferRef) -> Result<String, HostError> {
        Ok(self.entry(buf)?.sfname.clone().unwrap_or_default())
    }

    fn line_count(&self, buf: BufferRef) -> Result<usize, HostError> {
        Ok(self.entry(buf)?.lines.len())
    }

    fn line(&self, buf: BufferRef, n: i64) -> Result<String, HostError> {
        let entry = self.entry(buf)?;
        n.checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| entry.lines.get(i))
            .cloned()
            .ok_or(HostError::LineOutOfRange {
                buffer: buf.number(),
                line: n,
            })
    }

    fn window_count(&self, buf: BufferRef) -> Result<usize, HostError> {
        Ok(self.entry(buf)?.windows)
    }

    fn position_of(&self, buf: BufferRef) -> Result<Option<i64>, HostError> {
        Ok(self
            .buffers
            .iter()
            .position(|b| b.id == buf)
            .and_then(|pos| i64::try_from(pos + 1).ok()))
    }

    fn system(&self, command: &str) -> Result<(), HostError> {
        if !self.shell {
            return Err(HostError::Unsupported("system"));
        }
        run_shell(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    #[cfg(unix)]
    fn test_names_relative_to_cwd() {
        let mut host = MemoryHost::new().with_cwd("/work");
        let a = host.open_buffer(Some("src/main.rs"), "").unwrap();
        let b = host.open_buffer(Some("/etc/hosts"), "").unwrap();
        assert_eq!(host.ffname(a).unwrap(), "/work/src/main.rs");
        assert_eq!(host.sfname(a).unwrap(), "src/main.rs");
        assert_eq!(host.ffname(b).unwrap(), "/etc/hosts");
        assert_eq!(host.sfname(b).unwrap(), "/etc/hosts");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut host = MemoryHost::new();
        host.open_buffer(Some("a.txt"), "").unwrap();
        let err = host.open_buffer(Some("a.txt"), "dup").unwrap_err();
        assert_eq!(err, HostError::AlreadyOpen("a.txt".to_string()));
    }

    #[test]
    fn test_numbers_not_reused_after_close() {
        let mut host = MemoryHost::new();
        let a = host.open_buffer(None, "").unwrap();
        let b = host.open_buffer(None, "").unwrap();
        host.close_buffer(a).unwrap();
        let c = host.open_buffer(None, "").unwrap();
        assert_eq!((b.number(), c.number()), (2, 3));
        assert_eq!(host.buf_nr(1).unwrap(), Some(b));
        assert_eq!(host.buf_nr(2).unwrap(), Some(c));
        assert_eq!(
            host.close_buffer(a).unwrap_err(),
            HostError::BufferClosed(1)
        );
    }

    #[test]
    fn test_numbers_exhausted() {
        let mut host = MemoryHost::new();
        host.next_number = u64::from(u32::MAX);
        let last = host.open_buffer(None, "").unwrap();
        assert_eq!(last.number(), u32::MAX);

        let exhausted = HostError::Other("buffer numbers exhausted".to_string());
        assert_eq!(host.open_buffer(None, "").unwrap_err(), exhausted);
        assert_eq!(host.open_buffer(None, "").unwrap_err(), exhausted);
        assert_eq!(host.buf_cnt().unwrap(), 1);
    }
}
