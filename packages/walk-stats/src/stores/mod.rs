//! Record sink implementations.

pub mod jsonl;

pub use jsonl::JsonlStore;
