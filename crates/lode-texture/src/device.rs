//! Device and execution-context collaborator traits.
//!
//! The pipeline is backend-agnostic: it computes descriptors and subresource
//! data, then hands them to a [`GpuDevice`] for allocation and a
//! [`UploadContext`] for the auto-mipgen upload path. Implementations own
//! their handle types; the loader returns them by value, so a failure after
//! partial creation simply drops whatever was created.

use anyhow::Result;
use bitflags::bitflags;
use lode_formats::PixelFormat;

use crate::desc::{BindFlags, CpuAccessFlags, ResourceMiscFlags, Usage};
use crate::layout::SubresourceData;
use crate::limits::FeatureTier;

bitflags! {
    /// Per-format capabilities reported by the device.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FormatSupport: u32 {
        /// The device can generate mip chains for this format in hardware.
        const MIP_AUTOGEN = 1 << 0;
    }
}

/// Shape of the resource to create, orthogonal to array/cubemap status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Texture1D,
    Texture2D,
    Texture3D,
}

/// Full description of the resource handed to [`GpuDevice::create_texture`].
///
/// Cubemap status travels in `misc` (the texture-cube flag), as the device
/// APIs this models expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDesc {
    pub kind: ResourceKind,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_levels: u32,
    pub array_layers: u32,
    pub format: PixelFormat,
    pub usage: Usage,
    pub bind: BindFlags,
    pub cpu_access: CpuAccessFlags,
    pub misc: ResourceMiscFlags,
}

/// View dimensionality, carrying the per-dimension counts the view needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewDimension {
    Texture1D,
    Texture1DArray { array_layers: u32 },
    Texture2D,
    Texture2DArray { array_layers: u32 },
    TextureCube,
    TextureCubeArray { num_cubes: u32 },
    Texture3D,
}

/// Description of the shader-resource view over a created texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewDesc {
    pub format: PixelFormat,
    pub dimension: ViewDimension,
    pub mip_levels: u32,
}

/// Resource-allocating device collaborator.
///
/// `create_texture` receives one [`SubresourceData`] per (array slice, mip
/// level) pair in array-major/mip-minor order, or an empty slice when the
/// texture is populated later through an [`UploadContext`]. Failures are
/// reported as plain [`anyhow::Error`]s; the loader decides whether a retry
/// applies.
pub trait GpuDevice {
    type Texture;
    type View;

    fn feature_tier(&self) -> FeatureTier;
    fn format_support(&self, format: PixelFormat) -> FormatSupport;
    fn create_texture(&self, desc: &ResourceDesc, init: &[SubresourceData])
        -> Result<Self::Texture>;
    fn create_view(&self, texture: &Self::Texture, desc: &ViewDesc) -> Result<Self::View>;
}

/// Command-issuing collaborator, consumed by the auto-mipgen path.
pub trait UploadContext<D: GpuDevice + ?Sized> {
    fn update_subresource(
        &mut self,
        texture: &D::Texture,
        subresource: u32,
        bytes: &[u8],
        row_pitch: u32,
        slice_pitch: u32,
    );
    fn generate_mips(&mut self, view: &D::View);
}

/// Flat subresource index of `(mip, slice)` in a chain of `mip_levels`.
pub fn calc_subresource(mip: u32, slice: u32, mip_levels: u32) -> u32 {
    mip + slice * mip_levels
}
