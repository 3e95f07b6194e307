//! Completion notification.
//!
//! The engine emits exactly one `CompletionRecord` per won game and hands
//! it to a `CompletionSink`. Sinks are one-way: the engine never learns
//! whether the host received the record.

pub mod completion;
pub mod sink;

pub use completion::{CompletionData, CompletionRecord, BLOCK_ID, COMPLETION_TYPE};
pub use sink::{BroadcastSink, CallbackSink, CompletionSink, JsonLineSink, NullSink, RecordingSink};
