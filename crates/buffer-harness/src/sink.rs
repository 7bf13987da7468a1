//! Message sinks.
//!
//! A sink receives every line the harness produces: assertion results and rendered messages.

use std::io::Write;

/// Destination for harness output. Emitting never fails.
pub trait MessageSink {
    /// Receive one fully rendered message.
    fn emit(&mut self, message: &str);
}

impl<F> MessageSink for F
where
    F: FnMut(&str),
{
    fn emit(&mut self, message: &str) {
        self(message)
    }
}

/// A sink that keeps every message in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages emitted so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drain all messages.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl MessageSink for MessageLog {
    fn emit(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// A sink that writes one line per message to an [`std::io::Write`] (stdout, a file, ...).
///
/// Write errors are dropped: output is best-effort and must never abort a script.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stdout> {
    /// A sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageSink for WriterSink<W> {
    fn emit(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{message}");
        let _ = self.writer.flush();
    }
}
