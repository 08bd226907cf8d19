//! File I/O adapter
//!
//! Reads one JSON document from disk and writes its converted form back.
//! Every failure is logged with the offending path before it is returned, so
//! batch runs can skip the file and keep going.

use crate::error::{EngineError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An input file and, in generate mode, the file its result goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIo {
    input: PathBuf,
    output: Option<PathBuf>,
}

impl FileIo {
    /// Pair an input with the output file it converts into
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        FileIo {
            input: input.into(),
            output: Some(output.into()),
        }
    }

    /// Read-only adapter, used when results are only previewed
    pub fn input_only(input: impl Into<PathBuf>) -> Self {
        FileIo {
            input: input.into(),
            output: None,
        }
    }

    /// Path read from
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path written to, if any
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Read and parse the input document
    ///
    /// The top level must be a JSON object.
    pub fn read_input(&self) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(&self.input).map_err(|source| {
            warn!(path = %self.input.display(), error = %source, "can't read input file, skipping it");
            EngineError::Io {
                path: self.input.clone(),
                source,
            }
        })?;

        let parsed: Value = serde_json::from_str(&content).map_err(|source| {
            warn!(path = %self.input.display(), error = %source, "input file contains invalid JSON, skipping it");
            EngineError::Json {
                path: self.input.clone(),
                source,
            }
        })?;

        match parsed {
            Value::Object(map) => {
                debug!(path = %self.input.display(), fields = map.len(), "input file read");
                Ok(map)
            }
            other => {
                let found = json_type_name(&other);
                warn!(path = %self.input.display(), found, "input file is not a JSON object, skipping it");
                Err(EngineError::NotAnObject {
                    path: self.input.clone(),
                    found,
                })
            }
        }
    }

    /// Serialize `doc` and write it to the output file
    pub fn write_output(&self, doc: &Map<String, Value>, pretty: bool) -> Result<()> {
        let output = self.output.as_ref().ok_or_else(|| {
            EngineError::InvalidArguments(format!(
                "no output path paired with {}",
                self.input.display()
            ))
        })?;

        let rendered = render(doc, pretty).map_err(|source| {
            warn!(path = %self.input.display(), error = %source, "can't serialize converted document");
            EngineError::Json {
                path: self.input.clone(),
                source,
            }
        })?;

        fs::write(output, rendered).map_err(|source| {
            warn!(path = %output.display(), error = %source, "can't write output file");
            EngineError::Io {
                path: output.clone(),
                source,
            }
        })?;

        debug!(path = %output.display(), "output file written");
        Ok(())
    }
}

/// Render a document as JSON text with a trailing newline
pub fn render(doc: &Map<String, Value>, pretty: bool) -> serde_json::Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    text.push('\n');
    Ok(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
