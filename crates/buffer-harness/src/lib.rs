#![warn(missing_docs)]
//! Buffer Harness - a minimal scripted assertion harness for buffer-introspection hosts
//!
//! # Overview
//!
//! `buffer-harness` is for smoke-testing an application (typically an editor) that exposes a
//! small buffer API to scripts: how many buffers are open, look one up by position, and read its
//! file names and lines. It does not store buffers itself. The host implements [`BufferHost`] and
//! is injected into a [`Harness`], which gives scripts three things:
//!
//! - host query bindings (`buf_cnt`, `buf_nr`, buffer accessors)
//! - the `ok(value, comment)` assertion (plus `is(got, expected, comment)`)
//! - the `message`/`alert` sink, rendering any [`Value`] as one line of text
//!
//! # Quick Start
//!
//! ```rust
//! use buffer_harness::{Harness, MemoryHost, MessageLog};
//!
//! let mut host = MemoryHost::new();
//! host.open_buffer(Some("notes.txt"), "first\nsecond\n").unwrap();
//!
//! let mut log = MessageLog::new();
//! let mut h = Harness::new(&host, &mut log);
//!
//! let count = h.buf_cnt().unwrap();
//! h.ok(count, "buf_cnt");
//! let b = h.buf_nr(1).unwrap();
//! h.ok(b, "buf_nr");
//! h.ok(h.buf_nr(99).unwrap(), "buf_nr out of range");
//! h.message(b.unwrap().line(2).unwrap());
//!
//! assert_eq!(
//!     log.messages(),
//!     ["ok - buf_cnt", "ok - buf_nr", "fail - buf_nr out of range", "second"]
//! );
//! ```
//!
//! # Module Description
//!
//! - [`host`] - the host trait, buffer references and buffer handles
//! - [`value`] - the tagged value union and its truthiness rule
//! - [`render`] - deterministic rendering and message fitting
//! - [`sink`] - message sinks
//! - [`harness`] - the script-facing harness
//! - [`script`] - scripts, the runner and the stock smoke script
//! - [`memory`] - an in-memory host for tests

pub mod error;
pub mod harness;
pub mod host;
pub mod memory;
pub mod render;
pub mod script;
pub mod sink;
pub mod value;

pub use error::HostError;
pub use harness::Harness;
pub use host::{Buffer, BufferHost, BufferRef, run_shell};
pub use memory::MemoryHost;
pub use render::{MessageOptions, fit_message, format_number, render, render_with};
pub use script::{FnScript, Script, SmokeScript, report_error, run_script, script};
pub use sink::{MessageLog, MessageSink, WriterSink};
pub use value::{Callable, Value};
