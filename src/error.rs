//! Crate-wide error type.
//!
//! Replaces the reference port's hand-rolled `Display`/`Error` impls with a
//! `thiserror` derive, matching the convention used elsewhere in this
//! workspace (see the lightburn converter crate).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClipError>;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("execute with Paths output requires all added paths to be closed")]
    OpenPathWithPathsOutput,

    #[error("scanbeam intersection order could not be resolved")]
    IntersectionOrderUnresolvable,

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("execute called while another execute is already in progress on this instance")]
    ExecuteReentry,

    #[error("invalid offset parameters: {0}")]
    InvalidOffsetParameters(String),
}
