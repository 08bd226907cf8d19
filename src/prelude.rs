//! Convenient imports for firestore-json.
//!
//! ```
//! use firestore_json::prelude::*;
//!
//! let wire = to_firestore(&json!({"ok": true})).unwrap();
//! assert_eq!(wire, json!({"ok": {"booleanValue": true}}));
//! ```

// One-call helpers
pub use crate::{convert, from_firestore, to_firestore};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::{Conversion, Direction, Processor, TranscodeOptions};

// Re-export serde_json for convenience
pub use serde_json::json;
