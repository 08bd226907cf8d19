//! Conversion engine for the Firestore JSON converter
//!
//! Wraps the transcoder in everything needed to convert files:
//!
//! - [`Processor`]: picks the conversion direction per document
//! - [`FileIo`]: reads and writes one JSON document
//! - [`BatchConverter`]: validates and converts many files
//! - [`EngineConfig`]: TOML configuration
//!
//! The engine logs through `tracing`; installing a subscriber is left to the
//! binary.
//!
//! ## Example
//!
//! ```
//! use firestore_json_engine::{Direction, Processor};
//! use serde_json::json;
//!
//! let doc = json!({"age": {"integerValue": "30"}});
//! let out = Processor::default().convert(doc.as_object().unwrap()).unwrap();
//! assert_eq!(out.direction, Direction::Decode);
//! assert_eq!(serde_json::Value::Object(out.document), json!({"age": 30}));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod fileops;
pub mod processor;

pub use batch::{
    validate_path, BatchConverter, BatchReport, FailedFile, FileOutcome, Mode, PathRole,
    SkippedPair, StampedPath,
};
pub use config::{EngineConfig, DEFAULT_LOG_LEVEL};
pub use error::{ConvertError, EngineError, Result};
pub use fileops::{render, FileIo};
pub use processor::{Conversion, Direction, Processor};
