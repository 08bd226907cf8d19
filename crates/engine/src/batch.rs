//! Multi-file conversion
//!
//! A batch is built in two phases:
//!
//! 1. **Validation** (constructor): argument checks, then concurrent path
//!    checks. Each path set is checked on its own scoped thread; invalid
//!    paths are sent over one channel as [`StampedPath`]s and collected once
//!    both threads have joined. Pairs with an invalid side are skipped.
//! 2. **Conversion** ([`BatchConverter::run`]): valid pairs are read,
//!    converted and written one at a time. A failing file is recorded and
//!    the run moves on.
//!
//! ## Fatal conditions
//!
//! - no inputs
//! - generate mode without outputs, or with a different number of outputs
//! - the same path twice within the inputs (or within the outputs)
//! - no valid pair left after validation
//!
//! The same path may appear as both an input and an output; the file is
//! converted in place.

use crate::error::{EngineError, Result};
use crate::fileops::{render, FileIo};
use crate::processor::{Direction, Processor};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tracing::{debug, info, warn};

/// Whether results are printed or written to files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Convert in memory and print to a writer
    Preview,
    /// Convert and write output files
    Generate,
}

/// Which path set a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// A file to read
    Input,
    /// A file to write
    Output,
}

/// A path that failed validation, stamped with its position in its set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedPath {
    /// Index within the input (or output) list
    pub id: usize,
    /// Which list the path came from
    pub role: PathRole,
    /// The offending path
    pub path: PathBuf,
    /// Why it was rejected
    pub reason: String,
}

/// A successfully converted file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    /// File that was read
    pub input: PathBuf,
    /// `None` in preview mode
    pub output: Option<PathBuf>,
    /// Direction the document was converted in
    pub direction: Direction,
}

/// A pair dropped during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPair {
    /// Input side of the pair
    pub input: PathBuf,
    /// Output side, absent in preview mode
    pub output: Option<PathBuf>,
    /// Every validation failure for either side
    pub reasons: Vec<String>,
}

/// A valid pair whose conversion failed
#[derive(Debug)]
pub struct FailedFile {
    /// File whose conversion failed
    pub input: PathBuf,
    /// What went wrong
    pub error: EngineError,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted, in input order
    pub converted: Vec<FileOutcome>,
    /// Pairs dropped before conversion
    pub skipped: Vec<SkippedPair>,
    /// Pairs that failed to convert or write
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// True when every pair that passed validation was converted
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line summary, e.g. `2 converted, 1 skipped, 0 failed`
    pub fn summary(&self) -> String {
        format!(
            "{} converted, {} skipped, {} failed",
            self.converted.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// Validated set of input/output pairs ready to convert
#[derive(Debug)]
pub struct BatchConverter {
    mode: Mode,
    pairs: Vec<FileIo>,
    skipped: Vec<SkippedPair>,
    processor: Processor,
    direction: Direction,
    pretty: bool,
}

impl BatchConverter {
    /// Batch that prints converted documents instead of writing them
    pub fn preview(inputs: Vec<PathBuf>) -> Result<Self> {
        Self::build(Mode::Preview, inputs, Vec::new())
    }

    /// Batch that writes `inputs[i]`'s conversion to `outputs[i]`
    pub fn generate(inputs: Vec<PathBuf>, outputs: Vec<PathBuf>) -> Result<Self> {
        Self::build(Mode::Generate, inputs, outputs)
    }

    /// Use `processor` for conversions (default options otherwise)
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = processor;
        self
    }

    /// Direction to convert in; `Auto` detects it per file
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Toggle indented output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Whether this batch previews or generates
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pairs that passed validation, in argument order
    pub fn pairs(&self) -> &[FileIo] {
        &self.pairs
    }

    /// Pairs dropped during validation
    pub fn skipped(&self) -> &[SkippedPair] {
        &self.skipped
    }

    fn build(mode: Mode, inputs: Vec<PathBuf>, outputs: Vec<PathBuf>) -> Result<Self> {
        check_arguments(mode, &inputs, &outputs)?;

        let invalid = validate_paths(&inputs, &outputs);
        let mut reasons: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for stamped in invalid {
            let side = match stamped.role {
                PathRole::Input => "input",
                PathRole::Output => "output",
            };
            reasons.entry(stamped.id).or_default().push(format!(
                "{} path {}: {}",
                side,
                stamped.path.display(),
                stamped.reason
            ));
        }

        let mut pairs = Vec::with_capacity(inputs.len());
        let mut skipped = Vec::new();
        for (id, input) in inputs.into_iter().enumerate() {
            let output = outputs.get(id).cloned();
            if let Some(reasons) = reasons.remove(&id) {
                warn!(
                    input = %input.display(),
                    reasons = %reasons.join("; "),
                    "skipping invalid path pair"
                );
                skipped.push(SkippedPair {
                    input,
                    output,
                    reasons,
                });
                continue;
            }
            pairs.push(match output {
                Some(output) => FileIo::new(input, output),
                None => FileIo::input_only(input),
            });
        }

        if pairs.is_empty() {
            return Err(EngineError::NoValidPairs);
        }

        debug!(valid = pairs.len(), skipped = skipped.len(), "path validation finished");
        Ok(BatchConverter {
            mode,
            pairs,
            skipped,
            processor: Processor::default(),
            direction: Direction::Auto,
            pretty: true,
        })
    }

    /// Convert every valid pair
    ///
    /// In preview mode results go to `out`; in generate mode `out` is unused.
    pub fn run<W: Write>(&self, out: &mut W) -> BatchReport {
        let mut report = BatchReport {
            skipped: self.skipped.clone(),
            ..BatchReport::default()
        };

        for io in &self.pairs {
            debug!(input = %io.input().display(), "converting file");
            match self.convert_one(io, out) {
                Ok(direction) => report.converted.push(FileOutcome {
                    input: io.input().to_path_buf(),
                    output: io.output().map(Path::to_path_buf),
                    direction,
                }),
                Err(error) => {
                    warn!(input = %io.input().display(), error = %error, "file conversion failed");
                    report.failed.push(FailedFile {
                        input: io.input().to_path_buf(),
                        error,
                    });
                }
            }
        }

        info!(
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        report
    }

    fn convert_one<W: Write>(&self, io: &FileIo, out: &mut W) -> Result<Direction> {
        let doc = io.read_input()?;
        let conversion = self.processor.convert_with(&doc, self.direction)?;

        match self.mode {
            Mode::Generate => io.write_output(&conversion.document, self.pretty)?,
            Mode::Preview => {
                let text = render(&conversion.document, self.pretty).map_err(|source| EngineError::Json {
                    path: io.input().to_path_buf(),
                    source,
                })?;
                let written = if self.pairs.len() > 1 {
                    write!(out, "==> {} <==\n{}", io.input().display(), text)
                } else {
                    out.write_all(text.as_bytes())
                };
                written.map_err(|source| EngineError::Io {
                    path: io.input().to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(conversion.direction)
    }
}

fn check_arguments(mode: Mode, inputs: &[PathBuf], outputs: &[PathBuf]) -> Result<()> {
    if inputs.is_empty() {
        return Err(EngineError::InvalidArguments("no input files provided".into()));
    }
    if mode == Mode::Generate {
        if outputs.is_empty() {
            return Err(EngineError::InvalidArguments(
                "generate mode requires output files".into(),
            ));
        }
        if outputs.len() != inputs.len() {
            return Err(EngineError::InvalidArguments(format!(
                "{} input files but {} output files; counts must match",
                inputs.len(),
                outputs.len()
            )));
        }
    }
    if let Some(dup) = find_duplicate(inputs) {
        return Err(EngineError::InvalidArguments(format!(
            "input path {} is given more than once",
            dup.display()
        )));
    }
    if let Some(dup) = find_duplicate(outputs) {
        return Err(EngineError::InvalidArguments(format!(
            "output path {} is given more than once",
            dup.display()
        )));
    }
    Ok(())
}

fn find_duplicate(paths: &[PathBuf]) -> Option<&PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths.iter().find(|p| !seen.insert(p.as_path()))
}

/// Check both path sets concurrently and collect the invalid paths
fn validate_paths(inputs: &[PathBuf], outputs: &[PathBuf]) -> Vec<StampedPath> {
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        let handles = [
            (inputs, PathRole::Input, tx.clone()),
            (outputs, PathRole::Output, tx),
        ]
        .into_iter()
        .filter(|(paths, _, _)| !paths.is_empty())
        .map(|(paths, role, tx)| scope.spawn(move || validate_set(paths, role, &tx)))
        .collect::<Vec<_>>();

        for handle in handles {
            if let Err(err) = handle.join() {
                panic::resume_unwind(err);
            }
        }
    });

    // Every sender is gone once the scope has joined
    let mut invalid: Vec<StampedPath> = rx.into_iter().collect();
    invalid.sort_by_key(|s| (s.id, s.role == PathRole::Output));
    invalid
}

fn validate_set(paths: &[PathBuf], role: PathRole, tx: &Sender<StampedPath>) {
    for (id, path) in paths.iter().enumerate() {
        if let Err(reason) = validate_path(path, role) {
            // The receiver outlives the scope
            let _ = tx.send(StampedPath {
                id,
                role,
                path: path.clone(),
                reason,
            });
        }
    }
}

/// Check one path
///
/// Inputs must exist and not be directories. Outputs must not be
/// directories and their parent directory must exist.
pub fn validate_path(path: &Path, role: PathRole) -> std::result::Result<(), String> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Err("path is an existing directory".into()),
        Ok(_) => return Ok(()),
        Err(e) if role == PathRole::Input => return Err(e.to_string()),
        Err(_) => {}
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match fs::metadata(parent) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(format!("parent {} is not a directory", parent.display())),
        Err(e) => Err(format!("parent directory {}: {}", parent.display(), e)),
    }
}
