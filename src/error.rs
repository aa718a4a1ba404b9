//! Error types for notation, named sequences, ring tables and storage.
//!
//! Token-level errors are recoverable: the executor logs them, skips the
//! offending token and keeps going. Nothing here represents a torn cube.

use thiserror::Error;

use crate::geometry::Layer;

/// A single token that could not be executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Matches neither the move grammar nor any named sequence.
    #[error("invalid move: {0}")]
    InvalidToken(String),
    /// A named sequence repeat count that does not fit in a `u64`.
    #[error("repeat count out of range: {0}")]
    RepeatOutOfRange(String),
    /// A named sequence that keeps expanding into itself.
    #[error("sequence {token} nests deeper than {limit} levels")]
    NestingTooDeep { token: String, limit: usize },
}

/// Rejected named-sequence registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence name {0:?} must be non-empty and contain no whitespace or apostrophes")]
    InvalidName(String),
    #[error("sequence name {0:?} is already a move token")]
    ShadowsMove(String),
    #[error("sequence name {name:?} is ambiguous with existing sequence {existing:?}")]
    Ambiguous { name: String, existing: String },
}

/// A ring table that does not fit the grid it is built for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerTableError {
    #[error("no rings defined for layer {0}")]
    MissingLayer(Layer),
    #[error("layer {layer} references slot {slot:?} outside the grid")]
    SlotOutOfBounds {
        layer: Layer,
        slot: (usize, usize, usize),
    },
    #[error("layer {layer} has a ring of length {len}, which is not a multiple of 4")]
    RingLength { layer: Layer, len: usize },
}

/// Failure reading or writing the JSON documents.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("stored sequence rejected: {0}")]
    Sequence(#[from] SequenceError),
}
