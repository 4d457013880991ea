//! Hardware capability tiers and per-tier resource limits.
//!
//! Container metadata is untrusted; every classified value is checked against
//! the limits profile of the device's capability tier before any resource is
//! created. The retry caps used after a creation failure are a separate,
//! smaller table: they bound the *retained* mip chain rather than the declared
//! resource.

use crate::error::{Result, TextureError};
use crate::shape::{Classified, ClassifiedShape};

/// Device capability tier, ordered from least to most capable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureTier {
    Level9_1,
    Level9_2,
    Level9_3,
    Level10_0,
    Level10_1,
    Level11_0,
    Level11_1,
}

/// Global mip-count bound, independent of shape and tier.
pub const MAX_MIP_LEVELS: u32 = 15;

/// Maximum texture extents of one capability tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HardwareLimits {
    pub max_mip_levels: u32,
    pub max_1d: u32,
    pub max_2d: u32,
    pub max_cube: u32,
    pub max_3d: u32,
    pub max_array_layers: u32,
}

impl HardwareLimits {
    /// The limits profile of a capability tier.
    ///
    /// The 9.x tiers have no native 1D or array support; they reuse the 2D
    /// edge bound for 1D and allow only the six slices a cubemap needs.
    pub fn for_tier(tier: FeatureTier) -> Self {
        match tier {
            FeatureTier::Level9_1 | FeatureTier::Level9_2 => Self {
                max_mip_levels: MAX_MIP_LEVELS,
                max_1d: 2048,
                max_2d: 2048,
                max_cube: 512,
                max_3d: 256,
                max_array_layers: 6,
            },
            FeatureTier::Level9_3 => Self {
                max_mip_levels: MAX_MIP_LEVELS,
                max_1d: 4096,
                max_2d: 4096,
                max_cube: 4096,
                max_3d: 256,
                max_array_layers: 6,
            },
            FeatureTier::Level10_0 | FeatureTier::Level10_1 => Self {
                max_mip_levels: MAX_MIP_LEVELS,
                max_1d: 8192,
                max_2d: 8192,
                max_cube: 8192,
                max_3d: 2048,
                max_array_layers: 512,
            },
            FeatureTier::Level11_0 | FeatureTier::Level11_1 => Self {
                max_mip_levels: MAX_MIP_LEVELS,
                max_1d: 16384,
                max_2d: 16384,
                max_cube: 16384,
                max_3d: 2048,
                max_array_layers: 2048,
            },
        }
    }

    /// Confirms every classified value is within this profile.
    pub fn validate(&self, c: &Classified) -> Result<()> {
        let check = |what: &'static str, value: u32, max: u32| -> Result<()> {
            if value > max {
                Err(TextureError::ExceedsHardwareLimit {
                    what,
                    value: value as u64,
                    max: max as u64,
                })
            } else {
                Ok(())
            }
        };

        check("mip count", c.mip_count, self.max_mip_levels)?;

        match c.shape {
            ClassifiedShape::OneD => {
                check("1D width", c.width, self.max_1d)?;
                check("array size", c.array_size, self.max_array_layers)?;
            }
            ClassifiedShape::TwoD { cubemap: true } => {
                // arraySize already counts individual faces here.
                check("cube width", c.width, self.max_cube)?;
                check("cube height", c.height, self.max_cube)?;
                check("array size", c.array_size, self.max_array_layers)?;
            }
            ClassifiedShape::TwoD { cubemap: false } => {
                check("2D width", c.width, self.max_2d)?;
                check("2D height", c.height, self.max_2d)?;
                check("array size", c.array_size, self.max_array_layers)?;
            }
            ClassifiedShape::ThreeD => {
                check("3D width", c.width, self.max_3d)?;
                check("3D height", c.height, self.max_3d)?;
                check("3D depth", c.depth, self.max_3d)?;
                check("array size", c.array_size, 1)?;
            }
        }
        Ok(())
    }
}

/// Maximum edge size to retry a failed creation with, per tier and shape.
///
/// Volume shapes cap lower than 2D within the same tier; the lowest tiers cap
/// cubemaps lower still.
pub fn retry_max_size(tier: FeatureTier, shape: ClassifiedShape) -> u32 {
    match tier {
        FeatureTier::Level9_1 | FeatureTier::Level9_2 => match shape {
            ClassifiedShape::TwoD { cubemap: true } => 512,
            ClassifiedShape::ThreeD => 256,
            _ => 2048,
        },
        FeatureTier::Level9_3 => match shape {
            ClassifiedShape::ThreeD => 256,
            _ => 4096,
        },
        FeatureTier::Level10_0 | FeatureTier::Level10_1 => match shape {
            ClassifiedShape::ThreeD => 2048,
            _ => 8192,
        },
        FeatureTier::Level11_0 | FeatureTier::Level11_1 => match shape {
            ClassifiedShape::ThreeD => 2048,
            _ => 16384,
        },
    }
}
