//! Reconciliation error types.

use thiserror::Error;

/// Why a reconciliation pass could not complete.
///
/// All variants are recoverable: the caller abandons the visual
/// transition, releases both capture sets, and lets the applied layout
/// change stand.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// One of the capture sets holds no values.
    #[error("capture set holds no values")]
    EmptyRange,

    /// No captured value of the filled side falls inside the other
    /// side's position range, so no intrinsic child size is available.
    #[error("capture ranges share no values to size children from")]
    NoSharedValues,

    /// Inter-item spacing could not be inferred from any captured
    /// neighbor pair on either side.
    #[error("inter-item spacing could not be inferred")]
    SpacingUnresolved,

    /// A position inside the fill range is missing from both sides.
    #[error("no counterpart value at layout position {position}")]
    MissingCounterpart { position: i32 },

    /// A side is still smaller than the other after its own fill pass.
    /// The walks only extend a side's range outward, so a hole inside
    /// the captured range never fills.
    #[error("side remains incomplete after filling ({target} of {other} values)")]
    IncompleteFill { target: usize, other: usize },
}

pub type Result<T> = std::result::Result<T, MatchError>;
