//! Shape classification of a container descriptor.
//!
//! The header's dimension hint, structural flags and legacy capability bits
//! collapse into a single [`ClassifiedShape`] plus final depth/array values.
//! Classification is a pure transition: inputs in, a tagged variant or a
//! typed failure out.

use crate::desc::{Caps2, DimensionHint, HeaderFlags, LoadOptions, ResourceMiscFlags, TextureImage};
use crate::error::{Result, TextureError};

/// Final shape of the resource, orthogonal to its array status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifiedShape {
    OneD,
    TwoD { cubemap: bool },
    ThreeD,
}

impl ClassifiedShape {
    pub fn is_cubemap(self) -> bool {
        matches!(self, ClassifiedShape::TwoD { cubemap: true })
    }

    pub fn is_volume(self) -> bool {
        matches!(self, ClassifiedShape::ThreeD)
    }
}

/// A descriptor whose shape, sizes and array count are mutually consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classified {
    pub shape: ClassifiedShape,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_count: u32,
    pub array_size: u32,
}

/// Classifies the target shape from header flags and declared sizes.
///
/// Cubemap status can come from three places, in precedence order: the
/// extended header's texture-cube flag, the legacy cubemap capability bits
/// (which require all six faces and force an array size of 6), and a
/// caller-supplied texture-cube option when the array size divides into whole
/// cubes.
pub fn classify(image: &TextureImage, options: &LoadOptions) -> Result<Classified> {
    let width = image.width;
    let mut height = image.height;
    let mut depth = image.depth;
    let mut array_size = image.array_size.max(1);
    let mip_count = image.mip_count.max(1);
    let mut cubemap = false;

    let shape = match image.dimension {
        DimensionHint::Texture1D => {
            // Writers emit 1D textures with a fixed height of 1; a height flag
            // saying otherwise contradicts the declared dimension.
            if image.flags.contains(HeaderFlags::HEIGHT) && height != 1 {
                return Err(TextureError::MalformedHeader(
                    "1D texture declares a height other than 1",
                ));
            }
            height = 1;
            depth = 1;
            ClassifiedShape::OneD
        }
        DimensionHint::Texture2D => {
            if image.misc.contains(ResourceMiscFlags::TEXTURE_CUBE) {
                array_size *= 6;
                cubemap = true;
            }
            depth = 1;
            ClassifiedShape::TwoD { cubemap }
        }
        DimensionHint::Texture3D => {
            if !image.flags.contains(HeaderFlags::DEPTH) {
                return Err(TextureError::MalformedHeader(
                    "volume texture missing the depth flag",
                ));
            }
            if array_size > 1 {
                return Err(TextureError::UnsupportedShape(
                    "volume texture arrays are not representable",
                ));
            }
            ClassifiedShape::ThreeD
        }
        DimensionHint::Unknown => {
            if image.flags.contains(HeaderFlags::DEPTH) {
                ClassifiedShape::ThreeD
            } else {
                if image.caps2.contains(Caps2::CUBEMAP) {
                    // All six faces must be present; partial cubemaps are not
                    // representable downstream.
                    if !image.caps2.contains(Caps2::CUBEMAP_ALL_FACES) {
                        return Err(TextureError::UnsupportedShape(
                            "cubemap does not define all six faces",
                        ));
                    }
                    array_size = 6;
                    cubemap = true;
                }
                depth = 1;
                // Legacy headers cannot express a 1D texture.
                ClassifiedShape::TwoD { cubemap }
            }
        }
    };

    // Caller override wins when the header is ambiguous: a 2D array divisible
    // into whole cubes may be treated as a cubemap array.
    let shape = match shape {
        ClassifiedShape::TwoD { cubemap: false }
            if options.misc.contains(ResourceMiscFlags::TEXTURE_CUBE) && array_size % 6 == 0 =>
        {
            ClassifiedShape::TwoD { cubemap: true }
        }
        other => other,
    };

    Ok(Classified {
        shape,
        width,
        height,
        depth,
        mip_count,
        array_size,
    })
}
