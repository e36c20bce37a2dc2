//! Error types for layout and transition operations.
//!
//! Most layout failures degrade to no-ops; only the cases a caller can act on
//! are surfaced here.

use thiserror::Error;

use crate::engine::ElementId;

/// Errors raised by layout engines, arrangers and platform detection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A transition keyframe name did not parse as `to.from.phase`.
    #[error("malformed transition point '{name}': {reason}")]
    MalformedTransition {
        /// The keyframe name as received.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Rendering-engine capabilities could not be determined.
    #[error("layout unavailable: {failures} capability probe(s) failed (first: {first})")]
    LayoutUnavailable {
        /// Number of probes that failed.
        failures: usize,
        /// Message of the first failure.
        first: String,
    },

    /// A single capability probe failed.
    #[error("probe failed: {0}")]
    Probe(String),

    /// An element id that does not belong to this document.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// The render pass could not build or compute its tree.
    #[error("render failed: {0}")]
    Render(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
