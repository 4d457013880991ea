//! Resolution of legacy uncompressed headers that declare channel bit-masks
//! instead of a concrete format token.
//!
//! Old containers describe 24/32-bit RGB layouts through per-channel masks.
//! [`resolve_legacy`] maps the two supported mask layouts to
//! [`PixelFormat::B8G8R8X8Unorm`] together with a [`LegacyRewrite`] describing
//! how the payload bytes must be re-packed. Rewrites always produce a new
//! buffer; the source is never mutated.

use crate::PixelFormat;

/// Channel description of a legacy pixel format header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LegacyPixelFormat {
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl LegacyPixelFormat {
    fn is_mask(&self, r: u32, g: u32, b: u32, a: u32) -> bool {
        self.r_bit_mask == r && self.g_bit_mask == g && self.b_bit_mask == b && self.a_bit_mask == a
    }
}

/// Payload transformation required to present a legacy layout as
/// [`PixelFormat::B8G8R8X8Unorm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegacyRewrite {
    /// 32-bit R/G/B-in-low-bytes layout: swap bytes 0 and 2 of every texel and
    /// zero the padding byte.
    SwizzleBgrx32,
    /// 24-bit B/G/R byte stream: copy each 3-byte texel into a 4-byte texel
    /// with a zero padding byte.
    ExpandRgb24,
}

impl LegacyRewrite {
    /// Applies the rewrite, returning a freshly allocated payload.
    ///
    /// Trailing bytes that do not form a whole source texel are dropped.
    pub fn apply(self, src: &[u8]) -> Vec<u8> {
        match self {
            LegacyRewrite::SwizzleBgrx32 => {
                let texels = src.len() / 4;
                let mut out = vec![0u8; texels * 4];
                for (dst, src) in out.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    dst[0] = src[2];
                    dst[1] = src[1];
                    dst[2] = src[0];
                    // dst[3] stays zero padding.
                }
                out
            }
            LegacyRewrite::ExpandRgb24 => {
                let texels = src.len() / 3;
                let mut out = vec![0u8; texels * 4];
                for (dst, src) in out.chunks_exact_mut(4).zip(src.chunks_exact(3)) {
                    dst[0] = src[0];
                    dst[1] = src[1];
                    dst[2] = src[2];
                }
                out
            }
        }
    }

    /// Payload length after applying this rewrite to `src_len` source bytes.
    pub fn output_len(self, src_len: usize) -> usize {
        match self {
            LegacyRewrite::SwizzleBgrx32 => (src_len / 4) * 4,
            LegacyRewrite::ExpandRgb24 => (src_len / 3) * 4,
        }
    }
}

/// A legacy header resolved to a concrete format plus its payload rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLegacy {
    pub format: PixelFormat,
    pub rewrite: LegacyRewrite,
}

/// Resolves a legacy mask-described pixel format.
///
/// Returns `None` when the mask layout is not one of the two supported legacy
/// encodings; the caller then treats the format as undeterminable.
pub fn resolve_legacy(pf: &LegacyPixelFormat) -> Option<ResolvedLegacy> {
    match pf.rgb_bit_count {
        32 if pf.is_mask(0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0x0000_0000) => {
            Some(ResolvedLegacy {
                format: PixelFormat::B8G8R8X8Unorm,
                rewrite: LegacyRewrite::SwizzleBgrx32,
            })
        }
        24 if pf.is_mask(0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0x0000_0000) => {
            Some(ResolvedLegacy {
                format: PixelFormat::B8G8R8X8Unorm,
                rewrite: LegacyRewrite::ExpandRgb24,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masks(rgb_bit_count: u32, r: u32, g: u32, b: u32, a: u32) -> LegacyPixelFormat {
        LegacyPixelFormat {
            rgb_bit_count,
            r_bit_mask: r,
            g_bit_mask: g,
            b_bit_mask: b,
            a_bit_mask: a,
        }
    }

    #[test]
    fn resolves_32bit_low_byte_rgb_masks() {
        let resolved =
            resolve_legacy(&masks(32, 0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0)).unwrap();
        assert_eq!(resolved.format, PixelFormat::B8G8R8X8Unorm);
        assert_eq!(resolved.rewrite, LegacyRewrite::SwizzleBgrx32);
    }

    #[test]
    fn resolves_24bit_rgb_masks() {
        let resolved =
            resolve_legacy(&masks(24, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0)).unwrap();
        assert_eq!(resolved.format, PixelFormat::B8G8R8X8Unorm);
        assert_eq!(resolved.rewrite, LegacyRewrite::ExpandRgb24);
    }

    #[test]
    fn rejects_unrecognized_masks() {
        // Alpha mask present disqualifies the 32-bit layout.
        assert!(resolve_legacy(&masks(32, 0xff, 0xff00, 0xff_0000, 0xff00_0000)).is_none());
        // 16-bit masks are never legacy-resolvable here.
        assert!(resolve_legacy(&masks(16, 0xf800, 0x07e0, 0x001f, 0)).is_none());
    }

    #[test]
    fn swizzle_swaps_red_and_blue_and_zeroes_padding() {
        let src = [1u8, 2, 3, 0xff, 4, 5, 6, 0xff];
        let out = LegacyRewrite::SwizzleBgrx32.apply(&src);
        assert_eq!(out, vec![3, 2, 1, 0, 6, 5, 4, 0]);
    }

    #[test]
    fn expand_adds_zero_padding_byte_per_texel() {
        let src = [10u8, 20, 30, 40, 50, 60];
        let out = LegacyRewrite::ExpandRgb24.apply(&src);
        assert_eq!(out, vec![10, 20, 30, 0, 40, 50, 60, 0]);
        assert_eq!(out.len(), LegacyRewrite::ExpandRgb24.output_len(src.len()));
    }

    #[test]
    fn expanded_24bit_buffer_is_four_thirds_of_source() {
        // N source texels yield exactly 4*N bytes with channel 3 zeroed and
        // channels 0..2 preserved in order.
        let n = 57usize;
        let src: Vec<u8> = (0..n * 3).map(|i| (i % 251) as u8).collect();
        let out = LegacyRewrite::ExpandRgb24.apply(&src);
        assert_eq!(out.len(), 4 * n);
        for (texel, src_texel) in out.chunks_exact(4).zip(src.chunks_exact(3)) {
            assert_eq!(&texel[..3], src_texel);
            assert_eq!(texel[3], 0);
        }
    }
}
