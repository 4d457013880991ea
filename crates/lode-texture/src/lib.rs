//! Resolution of parsed texture containers into device-ready subresources.
//!
//! Given an already-parsed container description (format, extents, mip and
//! array counts, shape flags) plus its raw pixel payload, this crate:
//!
//! - resolves legacy uncompressed formats from channel bit-masks, rewriting
//!   the payload where the encoding requires it ([`lode_formats::legacy`])
//! - classifies the target shape ([`shape::classify`])
//! - validates every value against a per-tier hardware limits profile
//!   ([`limits::HardwareLimits`])
//! - computes per-(slice, mip) byte layouts with optional size clamping
//!   ([`layout::build_layout`])
//! - creates the texture and view through the [`device::GpuDevice`]
//!   collaborator, retrying once with a tier-derived cap on creation failure,
//!   or takes the hardware mip-generation path for single-level sources
//!   ([`loader::create_texture`])
//!
//! Container parsing, GPU memory lifetime and command submission belong to
//! the collaborators; the pipeline itself is pure, synchronous and never
//! mutates its input payload.

pub mod desc;
pub mod device;
pub mod error;
pub mod layout;
pub mod limits;
pub mod loader;
pub mod shape;
pub mod testing;

#[cfg(test)]
mod proptests;

pub use desc::{
    AlphaMode, BindFlags, Caps2, CpuAccessFlags, DimensionHint, HeaderFlags, LoadOptions,
    ResourceMiscFlags, TextureImage, Usage,
};
pub use device::{
    calc_subresource, FormatSupport, GpuDevice, ResourceDesc, ResourceKind, UploadContext,
    ViewDesc, ViewDimension,
};
pub use error::{Result, TextureError};
pub use layout::{build_layout, total_payload_bytes, SubresourceData, TextureLayout};
pub use limits::{retry_max_size, FeatureTier, HardwareLimits, MAX_MIP_LEVELS};
pub use loader::{create_texture, LoadedTexture};
pub use shape::{classify, Classified, ClassifiedShape};
