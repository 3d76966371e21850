//! Core trait abstractions.

pub mod extractor;
pub mod sink;

pub use extractor::StatExtractor;
pub use sink::RecordSink;
