//! Validation configuration.
//!
//! Controls how strictly a document is checked and the limits that protect the
//! validator against adversarial input.

use serde::Serialize;

/// How strictly documents are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationMode {
    /// Enforce the PDF specification exactly.
    Strict,
    /// Tolerate common real-world deviations at call sites that opt in.
    Relaxed,
    /// Skip validation entirely.
    None,
}

/// Options for a validation run.
///
/// # Example
///
/// ```
/// use pdf_validate::config::{ValidationConfig, ValidationMode};
///
/// // Spec-exact checking
/// let strict = ValidationConfig::strict();
/// assert_eq!(strict.mode, ValidationMode::Strict);
///
/// // Tolerant checking (default)
/// let relaxed = ValidationConfig::default();
/// assert_eq!(relaxed.mode, ValidationMode::Relaxed);
///
/// // Custom limits
/// let custom = ValidationConfig {
///     max_recursion_depth: 32,
///     ..ValidationConfig::strict()
/// };
/// assert_eq!(custom.max_recursion_depth, 32);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig {
    /// Validation mode
    pub mode: ValidationMode,

    /// Maximum nesting depth of the page tree and of nested constructs
    /// (a Form XObject whose resources hold another Form XObject, ...).
    ///
    /// PDF Spec: ISO 32000-1:2008, Section H.1 - Implementation Limits
    pub max_recursion_depth: u32,

    /// Maximum number of hops when a reference points at another reference.
    pub max_reference_chain: u32,

    /// Maximum decompression ratio (decompressed:compressed), 0 disables the check.
    pub max_decompression_ratio: u32,

    /// Maximum decompressed stream size in bytes, 0 disables the check.
    pub max_decompressed_size: usize,
}

impl Default for ValidationConfig {
    /// Default configuration: relaxed mode
    fn default() -> Self {
        Self::relaxed()
    }
}

impl ValidationConfig {
    /// Strict mode: any deviation from the PDF specification is an error.
    pub fn strict() -> Self {
        Self {
            mode: ValidationMode::Strict,
            max_recursion_depth: 100, // PDF spec recommended limit
            max_reference_chain: 32,
            max_decompression_ratio: 100,
            max_decompressed_size: 100 * 1024 * 1024, // 100 MB
        }
    }

    /// Relaxed mode: accept deviations commonly produced by real-world writers.
    pub fn relaxed() -> Self {
        Self {
            mode: ValidationMode::Relaxed,
            ..Self::strict()
        }
    }

    /// No validation: the document is trusted and only read or manipulated.
    pub fn disabled() -> Self {
        Self {
            mode: ValidationMode::None,
            ..Self::strict()
        }
    }

    /// True in strict mode.
    pub fn is_strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }

    /// True in relaxed mode.
    pub fn is_relaxed(&self) -> bool {
        self.mode == ValidationMode::Relaxed
    }
}
