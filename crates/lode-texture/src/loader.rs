//! End-to-end resolution of a parsed container into device resources.
//!
//! Pipeline: resolve the pixel format (rewriting legacy payloads) → classify
//! the shape → validate against the device tier's hardware limits → either
//! the auto-mipgen path (single declared level, hardware support) or the full
//! subresource layout → create the texture and view, retrying once with a
//! tier-derived size cap when creation fails without an explicit cap.

use std::borrow::Cow;

use lode_formats::{resolve_legacy, surface_info, PixelFormat};
use tracing::{debug, warn};

use crate::desc::{AlphaMode, BindFlags, LoadOptions, ResourceMiscFlags, TextureImage};
use crate::device::{
    calc_subresource, FormatSupport, GpuDevice, ResourceDesc, ResourceKind, UploadContext,
    ViewDesc, ViewDimension,
};
use crate::error::{Result, TextureError};
use crate::layout::{build_layout, SubresourceData};
use crate::limits::{retry_max_size, FeatureTier, HardwareLimits};
use crate::shape::{classify, Classified, ClassifiedShape};

/// The handles produced by a successful load, plus the container's declared
/// alpha interpretation.
///
/// Both handles are owned; dropping them is the caller's resource cleanup.
#[derive(Debug)]
pub struct LoadedTexture<T, V> {
    pub texture: T,
    pub view: V,
    pub alpha_mode: AlphaMode,
}

/// Resolves a parsed container into a created texture and shader view.
///
/// The execution context is used only when the auto-mipgen path applies
/// (single declared mip level and device-reported hardware support); the full
/// layout path hands all subresource data to the device at creation.
pub fn create_texture<D, C>(
    image: &TextureImage,
    options: &LoadOptions,
    device: &D,
    context: &mut C,
) -> Result<LoadedTexture<D::Texture, D::View>>
where
    D: GpuDevice,
    C: UploadContext<D>,
{
    let (format, data) = resolve_format(image)?;
    let classified = classify(image, options)?;

    let tier = device.feature_tier();
    HardwareLimits::for_tier(tier).validate(&classified)?;

    debug!(
        ?format,
        shape = ?classified.shape,
        width = classified.width,
        height = classified.height,
        depth = classified.depth,
        mips = classified.mip_count,
        array = classified.array_size,
        "classified texture container"
    );

    let autogen = classified.mip_count == 1
        && device
            .format_support(format)
            .contains(FormatSupport::MIP_AUTOGEN)
        // The lowest tiers cannot auto-generate mips for volume textures.
        && (!classified.shape.is_volume() || tier >= FeatureTier::Level10_0);

    let (texture, view) = if autogen {
        load_with_autogen(&classified, format, &data, options, device, context)?
    } else {
        load_full_chain(&classified, format, &data, options, device, tier)?
    };

    Ok(LoadedTexture {
        texture,
        view,
        alpha_mode: image.alpha_mode,
    })
}

/// Resolves the declared format, rewriting the payload for legacy
/// mask-described encodings.
fn resolve_format(image: &TextureImage) -> Result<(PixelFormat, Cow<'_, [u8]>)> {
    let (format, data) = match image.format {
        PixelFormat::Unknown => match resolve_legacy(&image.pixel_format) {
            Some(resolved) => {
                debug!(
                    format = ?resolved.format,
                    rewrite = ?resolved.rewrite,
                    "resolved legacy pixel format"
                );
                (
                    resolved.format,
                    Cow::Owned(resolved.rewrite.apply(&image.data)),
                )
            }
            None => (PixelFormat::Unknown, Cow::Borrowed(image.data.as_slice())),
        },
        concrete => (concrete, Cow::Borrowed(image.data.as_slice())),
    };

    if matches!(
        format,
        PixelFormat::P8 | PixelFormat::A8P8 | PixelFormat::Ai44 | PixelFormat::Ia44
    ) || format.bits_per_pixel() == 0
    {
        return Err(TextureError::UnsupportedFormat { format });
    }

    Ok((format, data))
}

/// Full declared chain: compute the clamped layout, create with init data,
/// and retry once with a tier cap if creation fails without an explicit cap.
fn load_full_chain<D: GpuDevice>(
    classified: &Classified,
    format: PixelFormat,
    data: &[u8],
    options: &LoadOptions,
    device: &D,
    tier: FeatureTier,
) -> Result<(D::Texture, D::View)> {
    let layout = build_layout(classified, format, data, options.max_size)?;
    let first = create_resources(
        device,
        classified,
        format,
        (layout.width, layout.height, layout.depth),
        classified.mip_count - layout.skipped_mips,
        options,
        BindFlags::empty(),
        ResourceMiscFlags::empty(),
        &layout.subresources,
    );

    match first {
        Ok(created) => Ok(created),
        Err(err) => {
            // One retry, only when the caller imposed no cap and there is a
            // chain to clamp. Anything else propagates unchanged.
            if options.max_size != 0 || classified.mip_count <= 1 {
                return Err(TextureError::Creation(err));
            }
            let cap = retry_max_size(tier, classified.shape);
            warn!(
                cap,
                error = %err,
                "resource creation failed; retrying with tier-derived size cap"
            );
            let layout = build_layout(classified, format, data, cap)?;
            create_resources(
                device,
                classified,
                format,
                (layout.width, layout.height, layout.depth),
                classified.mip_count - layout.skipped_mips,
                options,
                BindFlags::empty(),
                ResourceMiscFlags::empty(),
                &layout.subresources,
            )
            .map_err(TextureError::Creation)
        }
    }
}

/// Auto-mipgen path: create the resource with a full computed chain and no
/// init data, upload the top level of every slice, then ask the execution
/// context to generate the remaining levels.
fn load_with_autogen<D, C>(
    classified: &Classified,
    format: PixelFormat,
    data: &[u8],
    options: &LoadOptions,
    device: &D,
    context: &mut C,
) -> Result<(D::Texture, D::View)>
where
    D: GpuDevice,
    C: UploadContext<D>,
{
    let info = surface_info(classified.width, classified.height, format);
    let top_level_bytes = info.num_bytes * classified.depth as u64;
    let required = top_level_bytes * classified.array_size as u64;
    if required > data.len() as u64 {
        return Err(TextureError::InsufficientData {
            required,
            available: data.len() as u64,
        });
    }
    let slice_pitch =
        u32::try_from(info.num_bytes).map_err(|_| TextureError::ExceedsHardwareLimit {
            what: "subresource byte length",
            value: info.num_bytes,
            max: u32::MAX as u64,
        })?;
    let top_level_bytes = top_level_bytes as usize;

    let mip_levels = full_mip_chain_len(classified.width, classified.height, classified.depth);
    let (texture, view) = create_resources(
        device,
        classified,
        format,
        (classified.width, classified.height, classified.depth),
        mip_levels,
        options,
        BindFlags::RENDER_TARGET,
        ResourceMiscFlags::GENERATE_MIPS,
        &[],
    )
    .map_err(TextureError::Creation)?;

    for slice in 0..classified.array_size {
        let offset = slice as usize * top_level_bytes;
        context.update_subresource(
            &texture,
            calc_subresource(0, slice, mip_levels),
            &data[offset..offset + top_level_bytes],
            info.row_bytes,
            slice_pitch,
        );
    }
    context.generate_mips(&view);

    Ok((texture, view))
}

/// Creates the texture and its shader view from final, clamped values.
#[allow(clippy::too_many_arguments)]
fn create_resources<D: GpuDevice>(
    device: &D,
    classified: &Classified,
    format: PixelFormat,
    (width, height, depth): (u32, u32, u32),
    mip_levels: u32,
    options: &LoadOptions,
    extra_bind: BindFlags,
    extra_misc: ResourceMiscFlags,
    init: &[SubresourceData],
) -> anyhow::Result<(D::Texture, D::View)> {
    let format = if options.force_srgb {
        format.to_srgb()
    } else {
        format
    };

    let kind = match classified.shape {
        ClassifiedShape::OneD => ResourceKind::Texture1D,
        ClassifiedShape::TwoD { .. } => ResourceKind::Texture2D,
        ClassifiedShape::ThreeD => ResourceKind::Texture3D,
    };

    // The texture-cube flag must agree with the classified shape regardless of
    // what the caller passed.
    let mut misc = options.misc | extra_misc;
    if classified.shape.is_cubemap() {
        misc |= ResourceMiscFlags::TEXTURE_CUBE;
    } else {
        misc.remove(ResourceMiscFlags::TEXTURE_CUBE);
    }

    // Legacy BC1-3 content may declare base dimensions that are not
    // block-aligned; round the resource up to whole blocks.
    let (mut width, mut height) = (width, height);
    if kind == ResourceKind::Texture2D
        && matches!(
            format,
            PixelFormat::Bc1Unorm | PixelFormat::Bc2Unorm | PixelFormat::Bc3Unorm
        )
        && (width & 3 != 0 || height & 3 != 0)
    {
        width = (width + 3) & !3;
        height = (height + 3) & !3;
    }

    let desc = ResourceDesc {
        kind,
        width,
        height: if kind == ResourceKind::Texture1D { 1 } else { height },
        depth: if kind == ResourceKind::Texture3D { depth } else { 1 },
        mip_levels,
        array_layers: classified.array_size,
        format,
        usage: options.usage,
        bind: options.bind | extra_bind,
        cpu_access: options.cpu_access,
        misc,
    };
    let texture = device.create_texture(&desc, init)?;

    let dimension = match classified.shape {
        ClassifiedShape::OneD if classified.array_size > 1 => ViewDimension::Texture1DArray {
            array_layers: classified.array_size,
        },
        ClassifiedShape::OneD => ViewDimension::Texture1D,
        ClassifiedShape::TwoD { cubemap: true } if classified.array_size > 6 => {
            ViewDimension::TextureCubeArray {
                num_cubes: classified.array_size / 6,
            }
        }
        ClassifiedShape::TwoD { cubemap: true } => ViewDimension::TextureCube,
        ClassifiedShape::TwoD { cubemap: false } if classified.array_size > 1 => {
            ViewDimension::Texture2DArray {
                array_layers: classified.array_size,
            }
        }
        ClassifiedShape::TwoD { cubemap: false } => ViewDimension::Texture2D,
        ClassifiedShape::ThreeD => ViewDimension::Texture3D,
    };
    let view = device.create_view(
        &texture,
        &ViewDesc {
            format,
            dimension,
            mip_levels,
        },
    )?;

    Ok((texture, view))
}

/// Length of the complete mip chain down to 1x1x1.
fn full_mip_chain_len(width: u32, height: u32, depth: u32) -> u32 {
    let max_dim = width.max(height).max(depth).max(1);
    32 - max_dim.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mip_chain_counts_down_to_one_texel() {
        assert_eq!(full_mip_chain_len(1, 1, 1), 1);
        assert_eq!(full_mip_chain_len(2, 1, 1), 2);
        assert_eq!(full_mip_chain_len(256, 256, 1), 9);
        assert_eq!(full_mip_chain_len(256, 16, 512), 10);
        // Non-power-of-two rounds down, matching repeated halving.
        assert_eq!(full_mip_chain_len(100, 1, 1), 7);
    }
}
