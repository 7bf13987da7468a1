//! The assertion harness bound to one host and one sink.

use crate::error::HostError;
use crate::host::{Buffer, BufferHost};
use crate::render::{MessageOptions, fit_message, render_with};
use crate::sink::MessageSink;
use crate::value::Value;

/// Script-facing API: host queries, `ok`/`is` assertions and the `message` sink.
///
/// The host is injected by reference; the harness never mutates it and keeps no state between
/// calls besides the output options.
pub struct Harness<'a> {
    host: &'a dyn BufferHost,
    sink: &'a mut dyn MessageSink,
    options: MessageOptions,
}

impl std::fmt::Debug for Harness<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> Harness<'a> {
    /// Bind a harness to `host`, writing to `sink` with default [`MessageOptions`].
    pub fn new(host: &'a dyn BufferHost, sink: &'a mut dyn MessageSink) -> Self {
        Self::with_options(host, sink, MessageOptions::default())
    }

    /// Bind a harness with explicit output options.
    pub fn with_options(
        host: &'a dyn BufferHost,
        sink: &'a mut dyn MessageSink,
        options: MessageOptions,
    ) -> Self {
        Self {
            host,
            sink,
            options,
        }
    }

    /// The injected host.
    pub fn host(&self) -> &'a dyn BufferHost {
        self.host
    }

    /// Current output options.
    pub fn options(&self) -> MessageOptions {
        self.options
    }

    /// Emit `ok - <comment>` if `value` is truthy, `fail - <comment>` otherwise.
    pub fn ok(&mut self, value: impl Into<Value>, comment: &str) {
        let passed = value.into().is_truthy();
        self.report(passed, comment);
    }

    /// Emit `ok - <comment>` if `got` equals `expected`, `fail - <comment>` otherwise.
    pub fn is(&mut self, got: impl Into<Value>, expected: impl Into<Value>, comment: &str) {
        let passed = got.into() == expected.into();
        self.report(passed, comment);
    }

    fn report(&mut self, passed: bool, comment: &str) {
        let status = if passed { "ok" } else { "fail" };
        self.emit(&format!("{status} - {comment}"));
    }

    /// Render `value` and emit it.
    pub fn message(&mut self, value: impl Into<Value>) {
        let text = self.render(&value.into());
        self.emit(&text);
    }

    /// Alias of [`message`](Self::message).
    pub fn alert(&mut self, value: impl Into<Value>) {
        self.message(value);
    }

    /// Render each value and emit them as one space-separated message.
    pub fn message_all<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let text = values
            .into_iter()
            .map(|v| self.render(&v.into()))
            .collect::<Vec<_>>()
            .join(" ");
        self.emit(&text);
    }

    /// Render `value` the way [`message`](Self::message) would, without emitting it.
    ///
    /// Buffer references are described by their host short name when the host can provide one.
    pub fn render(&self, value: &Value) -> String {
        let host = self.host;
        render_with(value, &|buf| host.sfname(buf).ok())
    }

    /// Number of open buffers in the host.
    pub fn buf_cnt(&self) -> Result<usize, HostError> {
        self.host.buf_cnt()
    }

    /// Buffer at 1-based position `index`, or `None` when out of range.
    pub fn buf_nr(&self, index: i64) -> Result<Option<Buffer<'a>>, HostError> {
        let host = self.host;
        Ok(host.buf_nr(index)?.map(|id| Buffer::new(host, id)))
    }

    /// Run a shell command through the host.
    pub fn system(&self, command: &str) -> Result<(), HostError> {
        self.host.system(command)
    }

    fn emit(&mut self, text: &str) {
        let line = fit_message(text, &self.options);
        self.sink.emit(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use crate::sink::MessageLog;
    use crate::value::Callable;

    #[test]
    fn test_ok_and_is() {
        let host = MemoryHost::new();
        let mut log = MessageLog::new();
        let mut h = Harness::new(&host, &mut log);
        h.ok(1, "one");
        h.ok("", "empty");
        h.is(2, 2.0, "same number");
        h.is("a", "b", "different strings");
        drop(h);
        assert_eq!(
            log.messages(),
            [
                "ok - one",
                "fail - empty",
                "ok - same number",
                "fail - different strings"
            ]
        );
    }

    #[test]
    fn test_is_equality_per_kind() {
        let mut host = MemoryHost::new();
        host.open_buffer(Some("a.txt"), "a").unwrap();
        host.open_buffer(Some("b.txt"), "b").unwrap();
        let f = Callable::new("f", |_| Value::Undefined);
        let g = Callable::new("f", |_| Value::Undefined);

        let mut log = MessageLog::new();
        let mut h = Harness::new(&host, &mut log);
        h.is(vec![1, 2], vec![1, 2], "same list");
        h.is(vec![1, 2], vec![2, 1], "reordered list");
        h.is(
            Value::mapping([("a", 1), ("b", 2)]),
            Value::mapping([("b", 2), ("a", 1)]),
            "reordered mapping",
        );
        h.is(
            Value::mapping([("a", 1)]),
            Value::mapping([("a", 2)]),
            "different mapping",
        );
        let first = h.buf_nr(1).unwrap();
        let again = h.buf_nr(1).unwrap();
        let second = h.buf_nr(2).unwrap();
        h.is(first, again, "same buffer");
        h.is(first, second, "different buffers");
        h.is(f.clone(), f.clone(), "same callable");
        h.is(f, g, "same name, different callable");
        drop(h);
        assert_eq!(
            log.messages(),
            [
                "ok - same list",
                "fail - reordered list",
                "ok - reordered mapping",
                "fail - different mapping",
                "ok - same buffer",
                "fail - different buffers",
                "ok - same callable",
                "fail - same name, different callable",
            ]
        );
    }

    #[test]
    fn test_comment_is_fitted_like_any_message() {
        let host = MemoryHost::new();
        let mut log = MessageLog::new();
        let mut h = Harness::new(&host, &mut log);
        h.ok(true, "first\nsecond");
        drop(h);
        assert_eq!(log.last(), Some("ok - first"));
    }
}
