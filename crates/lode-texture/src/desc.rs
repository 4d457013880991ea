//! Container-facing descriptor types.
//!
//! A [`TextureImage`] is the already-parsed view of a texture container: the
//! header fields the pipeline classifies, plus the raw payload in
//! slice-major/mip-minor order. Parsing the container's binary layout is the
//! container collaborator's job; this crate only reads the structured fields.

use bitflags::bitflags;
use lode_formats::{LegacyPixelFormat, PixelFormat};

bitflags! {
    /// Structural flags of the container header.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        const MIP_COUNT = 0x2_0000;
        const LINEAR_SIZE = 0x8_0000;
        const DEPTH = 0x80_0000;
    }
}

bitflags! {
    /// Legacy capability bits of the container header (cubemap faces, volume).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVE_X = 0x400;
        const CUBEMAP_NEGATIVE_X = 0x800;
        const CUBEMAP_POSITIVE_Y = 0x1000;
        const CUBEMAP_NEGATIVE_Y = 0x2000;
        const CUBEMAP_POSITIVE_Z = 0x4000;
        const CUBEMAP_NEGATIVE_Z = 0x8000;
        const CUBEMAP_ALL_FACES = Self::CUBEMAP_POSITIVE_X.bits()
            | Self::CUBEMAP_NEGATIVE_X.bits()
            | Self::CUBEMAP_POSITIVE_Y.bits()
            | Self::CUBEMAP_NEGATIVE_Y.bits()
            | Self::CUBEMAP_POSITIVE_Z.bits()
            | Self::CUBEMAP_NEGATIVE_Z.bits();
        const VOLUME = 0x20_0000;
    }
}

bitflags! {
    /// Miscellaneous resource options, shared between the container's extended
    /// header and caller-supplied load options.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ResourceMiscFlags: u32 {
        const GENERATE_MIPS = 0x1;
        const SHARED = 0x2;
        const TEXTURE_CUBE = 0x4;
    }
}

bitflags! {
    /// Bind-usage flags for the created resource.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BindFlags: u32 {
        const SHADER_RESOURCE = 0x8;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
    }
}

bitflags! {
    /// CPU-access flags for the created resource.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 0x1_0000;
        const READ = 0x2_0000;
    }
}

/// Memory usage mode of the created resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Usage {
    #[default]
    Default,
    Immutable,
    Dynamic,
    Staging,
}

/// Shape hint from the container's extended header, when present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DimensionHint {
    Texture1D,
    Texture2D,
    Texture3D,
    /// Legacy containers carry no explicit dimension; the classifier derives
    /// one from the structural flags.
    #[default]
    Unknown,
}

/// Alpha interpretation declared by the container, passed through to callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    #[default]
    Unknown,
    Straight,
    Premultiplied,
    Opaque,
    Custom,
}

/// An already-parsed texture container: header fields plus raw payload.
///
/// `data` holds every declared subresource tightly packed, array slices outer
/// and mip levels inner. The pipeline treats it as shared read-only input; any
/// transformation produces a new buffer.
#[derive(Clone, Debug, Default)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_count: u32,
    pub array_size: u32,
    pub format: PixelFormat,
    /// Channel bit-masks and bit count, consulted when `format` is
    /// [`PixelFormat::Unknown`].
    pub pixel_format: LegacyPixelFormat,
    pub dimension: DimensionHint,
    pub flags: HeaderFlags,
    pub caps2: Caps2,
    /// Misc options from the container's extended header.
    pub misc: ResourceMiscFlags,
    pub alpha_mode: AlphaMode,
    pub data: Vec<u8>,
}

/// Caller-facing configuration for a load.
#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    pub usage: Usage,
    pub bind: BindFlags,
    pub cpu_access: CpuAccessFlags,
    pub misc: ResourceMiscFlags,
    /// Remap color formats to their sRGB companions at creation.
    pub force_srgb: bool,
    /// Maximum retained edge length; 0 means unlimited. Used verbatim unless
    /// the creation-failure retry derives a tier cap.
    pub max_size: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            usage: Usage::Default,
            bind: BindFlags::SHADER_RESOURCE,
            cpu_access: CpuAccessFlags::empty(),
            misc: ResourceMiscFlags::empty(),
            force_srgb: false,
            max_size: 0,
        }
    }
}
