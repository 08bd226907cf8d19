//! End-to-end conversion tests
//!
//! Exercises the public facade: one-call helpers, the processor and batch
//! runs over real files.

mod common;

mod batch_runs;
mod document_properties;
mod direction_detection;
