use lode_formats::PixelFormat;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextureError>;

/// Unified error type for the texture resolution pipeline.
///
/// Classification and validation failures are terminal and carry enough
/// context (offending value, bound, byte counts) to diagnose the input without
/// inspecting pipeline internals. Only [`TextureError::Creation`] can be
/// preceded by the single size-capped retry of the loader.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The declared format has no determinable per-texel bit cost, or is an
    /// explicitly disallowed legacy palette/YUV token.
    #[error("unsupported pixel format {format:?}")]
    UnsupportedFormat { format: PixelFormat },

    /// A structural header flag contradicts a declared dimension.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// The classified shape cannot be represented downstream.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(&'static str),

    /// A dimension, mip count or array count exceeds the active hardware
    /// limits profile.
    #[error("{what} {value} exceeds hardware limit {max}")]
    ExceedsHardwareLimit {
        what: &'static str,
        value: u64,
        max: u64,
    },

    /// The payload is shorter than the bytes the computed layout requires.
    #[error("insufficient pixel data: need {required} bytes, have {available}")]
    InsufficientData { required: u64, available: u64 },

    /// The device collaborator reported a creation failure (after the retry
    /// protocol, when its preconditions held).
    #[error("device resource creation failed")]
    Creation(#[source] anyhow::Error),
}
