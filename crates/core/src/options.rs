//! Transcoder configuration.

/// Default bound on container nesting, in either direction.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options shared by the decoder and the encoder.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use firestore_json_core::TranscodeOptions;
///
/// let opts = TranscodeOptions::new().max_depth(16);
/// assert_eq!(opts.max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Deepest array/map nesting accepted below a top-level field.
    pub max_depth: usize,
}

impl TranscodeOptions {
    /// Options with the default depth bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest nesting accepted below a top-level field
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
