//! Typed failures of the viewport engine.
//!
//! Every failure here is numeric-domain, not I/O. None is retried: the
//! engine either falls back to a safe local default (degenerate bounds
//! skip framing) or surfaces the typed error and leaves scene state
//! untouched.

use bk_model::NameError;

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    /// Geometry that cannot drive a computation (zero-volume bounds,
    /// zero camera distance, coincident clipping planes).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// A selection name violated the packing contract.
    #[error(transparent)]
    InvalidEncoding(#[from] NameError),

    /// The viewing ray has no usable component along any principal axis;
    /// the caller must leave the affected element where it is.
    #[error("viewing ray is ambiguous along every principal axis")]
    AmbiguousDepth,
}
