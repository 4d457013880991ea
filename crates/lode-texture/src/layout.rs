//! Per-subresource byte layout of a classified texture payload.
//!
//! The payload stores array slices outer and mip levels inner, each level
//! tightly packed. [`build_layout`] walks that order with a running cursor,
//! optionally clamping to a maximum edge size by skipping leading mip levels
//! uniformly across all slices.

use lode_formats::{surface_info, PixelFormat};

use crate::error::{Result, TextureError};
use crate::shape::Classified;

/// One mip level of one array slice, ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubresourceData {
    /// Pixel bytes of this level, copied out of the source payload.
    pub bytes: Vec<u8>,
    /// Byte stride between consecutive scanlines (or block rows).
    pub row_pitch: u32,
    /// Byte length of one depth slice at this level.
    pub slice_pitch: u32,
}

/// Ordered subresources (array-major, mip-minor) plus the extent of the first
/// retained level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureLayout {
    pub subresources: Vec<SubresourceData>,
    /// Extent of mip level `skipped_mips` of the declared chain.
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Leading mip levels excluded from every slice by the size clamp.
    pub skipped_mips: u32,
}

impl TextureLayout {
    /// Mip levels retained per array slice.
    pub fn mip_levels(&self, declared_mips: u32) -> u32 {
        declared_mips - self.skipped_mips
    }
}

/// Total payload bytes the declared mip/array layout requires at full
/// resolution.
pub fn total_payload_bytes(c: &Classified, format: PixelFormat) -> u64 {
    let mut total = 0u64;
    let (mut w, mut h, mut d) = (c.width, c.height, c.depth);
    for _ in 0..c.mip_count {
        let info = surface_info(w, h, format);
        total += info.num_bytes * d as u64;
        (w, h, d) = half_extent(w, h, d);
    }
    total * c.array_size as u64
}

/// Computes the byte layout of every (array slice, mip level) pair.
///
/// `max_size` of 0 means unlimited. With a cap, a level is retained only when
/// all three of its extents fit; the source cursor still advances over skipped
/// levels, so clamping never changes where later levels are read from. Skips
/// are counted on slice 0 only and apply uniformly (every slice declares the
/// same chain).
pub fn build_layout(
    c: &Classified,
    format: PixelFormat,
    bytes: &[u8],
    max_size: u32,
) -> Result<TextureLayout> {
    let required = total_payload_bytes(c, format);
    if required > bytes.len() as u64 {
        return Err(TextureError::InsufficientData {
            required,
            available: bytes.len() as u64,
        });
    }

    let mut subresources =
        Vec::with_capacity((c.mip_count as usize).saturating_mul(c.array_size as usize));
    let mut skipped_mips = 0u32;
    let (mut t_width, mut t_height, mut t_depth) = (0u32, 0u32, 0u32);
    let mut cursor = 0usize;

    for slice in 0..c.array_size {
        let (mut w, mut h, mut d) = (c.width, c.height, c.depth);

        for _mip in 0..c.mip_count {
            let info = surface_info(w, h, format);
            let level_bytes = (info.num_bytes * d as u64) as usize;

            let retain = c.mip_count <= 1
                || max_size == 0
                || (w <= max_size && h <= max_size && d <= max_size);
            if retain {
                if t_width == 0 {
                    t_width = w;
                    t_height = h;
                    t_depth = d;
                }
                let slice_pitch = u32::try_from(info.num_bytes).map_err(|_| {
                    TextureError::ExceedsHardwareLimit {
                        what: "subresource byte length",
                        value: info.num_bytes,
                        max: u32::MAX as u64,
                    }
                })?;
                subresources.push(SubresourceData {
                    bytes: bytes[cursor..cursor + level_bytes].to_vec(),
                    row_pitch: info.row_bytes,
                    slice_pitch,
                });
            } else if slice == 0 {
                skipped_mips += 1;
            }

            cursor += level_bytes;
            (w, h, d) = half_extent(w, h, d);
        }
    }

    if subresources.is_empty() {
        // Every level was clamped away; there is nothing to create a resource
        // from.
        return Err(TextureError::InsufficientData {
            required,
            available: bytes.len() as u64,
        });
    }

    Ok(TextureLayout {
        subresources,
        width: t_width,
        height: t_height,
        depth: t_depth,
        skipped_mips,
    })
}

fn half_extent(w: u32, h: u32, d: u32) -> (u32, u32, u32) {
    ((w >> 1).max(1), (h >> 1).max(1), (d >> 1).max(1))
}
