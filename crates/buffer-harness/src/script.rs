//! Scripts and the script runner.
//!
//! A script is anything implementing [`Script`]: it receives a [`Harness`] bound to the host and
//! runs to completion. Host errors are returned as-is; turning them into user-visible output is
//! the host's job (see [`report_error`]).

use crate::error::HostError;
use crate::harness::Harness;
use crate::host::BufferHost;
use crate::render::{MessageOptions, fit_message};
use crate::sink::MessageSink;
use crate::value::{Callable, Value};

/// A smoke-test script driven against a host.
pub trait Script {
    /// Name used when reporting errors.
    fn name(&self) -> &str;

    /// Run the script to completion.
    fn run(&self, harness: &mut Harness<'_>) -> Result<(), HostError>;
}

/// A [`Script`] backed by a closure. Built with [`script`].
pub struct FnScript<F> {
    name: String,
    body: F,
}

impl<F> std::fmt::Debug for FnScript<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnScript").field("name", &self.name).finish()
    }
}

/// Wrap a closure as a named script.
pub fn script<F>(name: impl Into<String>, body: F) -> FnScript<F>
where
    F: Fn(&mut Harness<'_>) -> Result<(), HostError>,
{
    FnScript {
        name: name.into(),
        body,
    }
}

impl<F> Script for FnScript<F>
where
    F: Fn(&mut Harness<'_>) -> Result<(), HostError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, harness: &mut Harness<'_>) -> Result<(), HostError> {
        (self.body)(harness)
    }
}

/// Run `script` against `host`, writing to `sink`.
pub fn run_script(
    script: &dyn Script,
    host: &dyn BufferHost,
    sink: &mut dyn MessageSink,
    options: MessageOptions,
) -> Result<(), HostError> {
    let mut harness = Harness::with_options(host, sink, options);
    script.run(&mut harness)
}

/// Emit `Script error: <name>: <error>` to `sink`.
pub fn report_error(sink: &mut dyn MessageSink, script_name: &str, error: &HostError) {
    let text = format!("Script error: {script_name}: {error}");
    sink.emit(&fit_message(&text, &MessageOptions::default()));
}

/// The stock smoke test: exercises every query binding and every message kind once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmokeScript;

impl Script for SmokeScript {
    fn name(&self) -> &str {
        "smoke"
    }

    fn run(&self, h: &mut Harness<'_>) -> Result<(), HostError> {
        let count = h.buf_cnt()?;
        h.message(count);
        h.ok(count, "buf_cnt");
        let again = h.buf_cnt()?;
        h.ok(again, "buf_cnt");

        let b = h.buf_nr(1)?;
        h.ok(b, "buf_nr");

        h.message(Value::mapping([("a", 123)]));
        h.message("String");
        h.message(Callable::anonymous(|_| Value::from(123)));
        h.message(b);

        if let Some(b) = b {
            h.message(b.number());
            h.message(b.ffname()?);
            h.message(b.sfname()?);
        }
        Ok(())
    }
}
