//! Logical pixel-format tables and byte-layout math for texture containers.
//!
//! Formats here are API-independent tokens describing channel layout, bit depth
//! and compression scheme. The companion `lode-texture` crate maps them onto a
//! device through its collaborator traits; this crate only answers questions a
//! layout computation needs:
//!
//! - [`PixelFormat::bits_per_pixel`]: per-texel bit cost (0 when undeterminable)
//! - [`surface_info`]: row pitch, row count and total bytes of one mip level
//! - [`PixelFormat::to_srgb`]: sRGB companion format, for force-sRGB loads
//! - [`legacy`]: resolution of legacy uncompressed headers via channel bit-masks

pub mod legacy;

pub use legacy::{resolve_legacy, LegacyPixelFormat, LegacyRewrite, ResolvedLegacy};

/// Logical pixel format of a texture payload.
///
/// The set mirrors what container headers can declare: the common uncompressed
/// layouts, the BC1-BC7 block-compressed families, the two packed 4:2:2-style
/// layouts with their shared-chroma byte pairs, and a handful of legacy
/// palette/YUV tokens that are recognized but never loadable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Declared format could not be determined from the header alone.
    #[default]
    Unknown,

    R32G32B32A32Float,
    R32G32B32Float,
    R16G16B16A16Float,
    R16G16B16A16Unorm,
    R32G32Float,
    R10G10B10A2Unorm,
    R11G11B10Float,
    R8G8B8A8Unorm,
    R8G8B8A8UnormSrgb,
    B8G8R8A8Unorm,
    B8G8R8A8UnormSrgb,
    B8G8R8X8Unorm,
    B8G8R8X8UnormSrgb,
    R16G16Float,
    R16G16Unorm,
    R32Float,
    R16Float,
    R16Unorm,
    R8G8Unorm,
    R8Unorm,
    A8Unorm,
    B5G6R5Unorm,
    B5G5R5A1Unorm,
    B4G4R4A4Unorm,

    /// Packed layout storing one G sample per texel and shared R/B per pair.
    R8G8B8G8Unorm,
    /// Packed layout with the chroma bytes leading each pair.
    G8R8G8B8Unorm,

    Bc1Unorm,
    Bc1UnormSrgb,
    Bc2Unorm,
    Bc2UnormSrgb,
    Bc3Unorm,
    Bc3UnormSrgb,
    Bc4Unorm,
    Bc4Snorm,
    Bc5Unorm,
    Bc5Snorm,
    Bc6hUf16,
    Bc6hSf16,
    Bc7Unorm,
    Bc7UnormSrgb,

    // Legacy palette/YUV tokens. Recognized so diagnostics can name them, but
    // they carry no per-texel bit cost a layout computation could use.
    P8,
    A8P8,
    Ai44,
    Ia44,
}

impl PixelFormat {
    /// Bits consumed per texel, or 0 when the format has no fixed per-texel
    /// cost (palette/YUV tokens and [`PixelFormat::Unknown`]).
    ///
    /// Block-compressed formats report their amortized per-texel cost (4 or 8),
    /// packed pair formats report the cost of one packed texel pair half (32).
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Unknown => 0,

            PixelFormat::R32G32B32A32Float => 128,
            PixelFormat::R32G32B32Float => 96,
            PixelFormat::R16G16B16A16Float
            | PixelFormat::R16G16B16A16Unorm
            | PixelFormat::R32G32Float => 64,
            PixelFormat::R10G10B10A2Unorm
            | PixelFormat::R11G11B10Float
            | PixelFormat::R8G8B8A8Unorm
            | PixelFormat::R8G8B8A8UnormSrgb
            | PixelFormat::B8G8R8A8Unorm
            | PixelFormat::B8G8R8A8UnormSrgb
            | PixelFormat::B8G8R8X8Unorm
            | PixelFormat::B8G8R8X8UnormSrgb
            | PixelFormat::R16G16Float
            | PixelFormat::R16G16Unorm
            | PixelFormat::R32Float
            | PixelFormat::R8G8B8G8Unorm
            | PixelFormat::G8R8G8B8Unorm => 32,
            PixelFormat::R16Float
            | PixelFormat::R16Unorm
            | PixelFormat::R8G8Unorm
            | PixelFormat::B5G6R5Unorm
            | PixelFormat::B5G5R5A1Unorm
            | PixelFormat::B4G4R4A4Unorm => 16,
            PixelFormat::R8Unorm | PixelFormat::A8Unorm => 8,

            PixelFormat::Bc1Unorm
            | PixelFormat::Bc1UnormSrgb
            | PixelFormat::Bc4Unorm
            | PixelFormat::Bc4Snorm => 4,
            PixelFormat::Bc2Unorm
            | PixelFormat::Bc2UnormSrgb
            | PixelFormat::Bc3Unorm
            | PixelFormat::Bc3UnormSrgb
            | PixelFormat::Bc5Unorm
            | PixelFormat::Bc5Snorm
            | PixelFormat::Bc6hUf16
            | PixelFormat::Bc6hSf16
            | PixelFormat::Bc7Unorm
            | PixelFormat::Bc7UnormSrgb => 8,

            PixelFormat::P8 | PixelFormat::A8P8 | PixelFormat::Ai44 | PixelFormat::Ia44 => 0,
        }
    }

    /// Bytes per 4x4 block for block-compressed formats, `None` otherwise.
    pub fn block_bytes(self) -> Option<u32> {
        match self {
            PixelFormat::Bc1Unorm
            | PixelFormat::Bc1UnormSrgb
            | PixelFormat::Bc4Unorm
            | PixelFormat::Bc4Snorm => Some(8),
            PixelFormat::Bc2Unorm
            | PixelFormat::Bc2UnormSrgb
            | PixelFormat::Bc3Unorm
            | PixelFormat::Bc3UnormSrgb
            | PixelFormat::Bc5Unorm
            | PixelFormat::Bc5Snorm
            | PixelFormat::Bc6hUf16
            | PixelFormat::Bc6hSf16
            | PixelFormat::Bc7Unorm
            | PixelFormat::Bc7UnormSrgb => Some(16),
            _ => None,
        }
    }

    pub fn is_block_compressed(self) -> bool {
        self.block_bytes().is_some()
    }

    /// Packed pair formats store two texels in one 4-byte unit; their row
    /// length is computed per pair rather than per texel.
    pub fn is_packed_pair(self) -> bool {
        matches!(
            self,
            PixelFormat::R8G8B8G8Unorm | PixelFormat::G8R8G8B8Unorm
        )
    }

    /// The sRGB companion of this format, or the format itself when no sRGB
    /// variant exists.
    pub fn to_srgb(self) -> PixelFormat {
        match self {
            PixelFormat::R8G8B8A8Unorm => PixelFormat::R8G8B8A8UnormSrgb,
            PixelFormat::B8G8R8A8Unorm => PixelFormat::B8G8R8A8UnormSrgb,
            PixelFormat::B8G8R8X8Unorm => PixelFormat::B8G8R8X8UnormSrgb,
            PixelFormat::Bc1Unorm => PixelFormat::Bc1UnormSrgb,
            PixelFormat::Bc2Unorm => PixelFormat::Bc2UnormSrgb,
            PixelFormat::Bc3Unorm => PixelFormat::Bc3UnormSrgb,
            PixelFormat::Bc7Unorm => PixelFormat::Bc7UnormSrgb,
            other => other,
        }
    }

    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            PixelFormat::R8G8B8A8UnormSrgb
                | PixelFormat::B8G8R8A8UnormSrgb
                | PixelFormat::B8G8R8X8UnormSrgb
                | PixelFormat::Bc1UnormSrgb
                | PixelFormat::Bc2UnormSrgb
                | PixelFormat::Bc3UnormSrgb
                | PixelFormat::Bc7UnormSrgb
        )
    }
}

/// Byte layout of a single mip level of a single array/depth slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// Total bytes of one depth slice at this level (`row_bytes * num_rows`).
    pub num_bytes: u64,
    /// Bytes per scanline for uncompressed formats, per block row for
    /// block-compressed formats.
    pub row_bytes: u32,
    /// Scanline count for uncompressed formats, block-row count for
    /// block-compressed formats.
    pub num_rows: u32,
}

/// Computes the byte layout of one mip level from its texel dimensions.
///
/// Block-compressed formats round each axis up to whole 4x4 blocks (a 2x2 BC1
/// level still occupies one full block). Packed pair formats consume 4 bytes
/// per texel pair, rounding odd widths up. Everything else is
/// `ceil(width * bpp / 8)` per row.
pub fn surface_info(width: u32, height: u32, format: PixelFormat) -> SurfaceInfo {
    let (row_bytes, num_rows) = if let Some(block_bytes) = format.block_bytes() {
        let blocks_w = width.div_ceil(4).max(1);
        let blocks_h = height.div_ceil(4).max(1);
        (blocks_w * block_bytes, blocks_h)
    } else if format.is_packed_pair() {
        (((width + 1) >> 1) * 4, height)
    } else {
        let bpp = format.bits_per_pixel();
        (((width as u64 * bpp as u64 + 7) / 8) as u32, height)
    };

    SurfaceInfo {
        num_bytes: row_bytes as u64 * num_rows as u64,
        row_bytes,
        num_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uncompressed_surface_info_is_width_times_bpp() {
        let info = surface_info(256, 128, PixelFormat::R8G8B8A8Unorm);
        assert_eq!(
            info,
            SurfaceInfo {
                num_bytes: 256 * 128 * 4,
                row_bytes: 256 * 4,
                num_rows: 128,
            }
        );
    }

    #[test]
    fn bc1_surface_info_rounds_to_whole_blocks() {
        // 10x6 texels -> 3x2 blocks of 8 bytes each.
        let info = surface_info(10, 6, PixelFormat::Bc1Unorm);
        assert_eq!(info.row_bytes, 3 * 8);
        assert_eq!(info.num_rows, 2);
        assert_eq!(info.num_bytes, 48);
    }

    #[test]
    fn bc_surface_info_never_drops_below_one_block() {
        for format in [PixelFormat::Bc1Unorm, PixelFormat::Bc7Unorm] {
            let info = surface_info(1, 1, format);
            assert_eq!(info.row_bytes, format.block_bytes().unwrap());
            assert_eq!(info.num_rows, 1);
        }
    }

    #[test]
    fn packed_pair_rows_round_odd_widths_up() {
        let info = surface_info(5, 4, PixelFormat::R8G8B8G8Unorm);
        assert_eq!(info.row_bytes, 3 * 4);
        assert_eq!(info.num_rows, 4);
    }

    #[test]
    fn odd_width_24bpp_rows_round_up_to_whole_bytes() {
        // 96 bits per pixel never produces a partial byte, but 1-bit-odd cases
        // from the generic rule must still round up.
        let info = surface_info(3, 1, PixelFormat::R32G32B32Float);
        assert_eq!(info.row_bytes, 3 * 12);
    }

    #[test]
    fn palette_tokens_report_zero_bits_per_pixel() {
        for format in [
            PixelFormat::P8,
            PixelFormat::A8P8,
            PixelFormat::Ai44,
            PixelFormat::Ia44,
            PixelFormat::Unknown,
        ] {
            assert_eq!(format.bits_per_pixel(), 0);
        }
    }

    #[test]
    fn srgb_mapping_covers_bc_and_8bit_color_formats() {
        assert_eq!(
            PixelFormat::B8G8R8X8Unorm.to_srgb(),
            PixelFormat::B8G8R8X8UnormSrgb
        );
        assert_eq!(PixelFormat::Bc3Unorm.to_srgb(), PixelFormat::Bc3UnormSrgb);
        // Formats without an sRGB companion pass through.
        assert_eq!(PixelFormat::R32Float.to_srgb(), PixelFormat::R32Float);
        // Already-sRGB formats are fixed points.
        assert_eq!(
            PixelFormat::Bc1UnormSrgb.to_srgb(),
            PixelFormat::Bc1UnormSrgb
        );
    }
}
