//! Outbound completion channels.
//!
//! Delivery is fire-and-forget: `deliver` returns nothing, and a sink that
//! fails logs the failure instead of reporting it to the engine.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tracing::{debug, warn};

use super::completion::CompletionRecord;

/// A one-way channel to the hosting context.
pub trait CompletionSink {
    /// Hand a record to the channel. No acknowledgement, no retry.
    fn deliver(&mut self, record: &CompletionRecord);
}

/// Drops every record. Used when the host registers no channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CompletionSink for NullSink {
    fn deliver(&mut self, _record: &CompletionRecord) {}
}

/// Keeps delivered records in memory.
///
/// Clones share the same log, so a host can keep a handle after moving
/// one clone into the engine.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<CompletionRecord>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of every record delivered so far.
    #[must_use]
    pub fn records(&self) -> Vec<CompletionRecord> {
        self.records.borrow().clone()
    }

    /// Number of records delivered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// The most recent record.
    #[must_use]
    pub fn last(&self) -> Option<CompletionRecord> {
        self.records.borrow().last().cloned()
    }
}

impl CompletionSink for RecordingSink {
    fn deliver(&mut self, record: &CompletionRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

/// Writes one JSON document per line.
#[derive(Debug)]
pub struct JsonLineSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CompletionSink for JsonLineSink<W> {
    fn deliver(&mut self, record: &CompletionRecord) {
        let result = serde_json::to_writer(&mut self.writer, record)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush());

        if let Err(error) = result {
            warn!(%error, "Failed to write completion record");
        }
    }
}

/// Forwards records to a host callback, e.g. a `postMessage` binding.
pub struct CallbackSink<F: FnMut(&CompletionRecord)> {
    callback: F,
}

impl<F: FnMut(&CompletionRecord)> CallbackSink<F> {
    #[must_use]
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(&CompletionRecord)> CompletionSink for CallbackSink<F> {
    fn deliver(&mut self, record: &CompletionRecord) {
        (self.callback)(record);
    }
}

/// Fans a record out to several channels.
///
/// Models the embedding page's same-document plus parent-document
/// broadcast: every channel gets the record, in registration order.
#[derive(Default)]
pub struct BroadcastSink {
    sinks: Vec<Box<dyn CompletionSink>>,
}

impl BroadcastSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel (builder pattern).
    #[must_use]
    pub fn with(mut self, sink: impl CompletionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add a channel.
    pub fn push(&mut self, sink: impl CompletionSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl CompletionSink for BroadcastSink {
    fn deliver(&mut self, record: &CompletionRecord) {
        debug!(channels = self.sinks.len(), "Broadcasting completion record");
        for sink in &mut self.sinks {
            sink.deliver(record);
        }
    }
}

impl std::fmt::Debug for BroadcastSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastSink")
            .field("channels", &self.sinks.len())
            .finish()
    }
}
