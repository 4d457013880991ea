//! In-memory collaborator doubles for tests.
//!
//! [`NullDevice`] allocates nothing: it records every descriptor it is asked
//! to create and returns plain value handles. Creation failures can be
//! injected to exercise the retry protocol. [`RecordingContext`] captures
//! upload and mip-generation calls.

use std::cell::{Cell, RefCell};

use anyhow::{bail, Result};
use lode_formats::PixelFormat;

use crate::device::{FormatSupport, GpuDevice, ResourceDesc, UploadContext, ViewDesc};
use crate::layout::SubresourceData;
use crate::limits::FeatureTier;

/// Byte-length summary of one init subresource, kept instead of the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubresourceInit {
    pub len: usize,
    pub row_pitch: u32,
    pub slice_pitch: u32,
}

/// Value handle returned by [`NullDevice::create_texture`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeTexture {
    pub desc: ResourceDesc,
    pub init: Vec<SubresourceInit>,
}

/// Value handle returned by [`NullDevice::create_view`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FakeView {
    pub desc: ViewDesc,
}

/// Recording, never-allocating device double.
pub struct NullDevice {
    pub tier: FeatureTier,
    pub format_support: FormatSupport,
    /// Number of upcoming `create_texture` calls to fail.
    fail_creates: Cell<u32>,
    /// Every descriptor passed to `create_texture`, in call order (including
    /// failed calls).
    pub created: RefCell<Vec<ResourceDesc>>,
}

impl NullDevice {
    pub fn new(tier: FeatureTier) -> Self {
        Self {
            tier,
            format_support: FormatSupport::empty(),
            fail_creates: Cell::new(0),
            created: RefCell::new(Vec::new()),
        }
    }

    pub fn with_mip_autogen(mut self) -> Self {
        self.format_support |= FormatSupport::MIP_AUTOGEN;
        self
    }

    /// Makes the next `n` `create_texture` calls fail.
    pub fn fail_next_creates(&self, n: u32) {
        self.fail_creates.set(n);
    }
}

impl GpuDevice for NullDevice {
    type Texture = FakeTexture;
    type View = FakeView;

    fn feature_tier(&self) -> FeatureTier {
        self.tier
    }

    fn format_support(&self, _format: PixelFormat) -> FormatSupport {
        self.format_support
    }

    fn create_texture(
        &self,
        desc: &ResourceDesc,
        init: &[SubresourceData],
    ) -> Result<FakeTexture> {
        self.created.borrow_mut().push(desc.clone());
        let remaining = self.fail_creates.get();
        if remaining > 0 {
            self.fail_creates.set(remaining - 1);
            bail!("injected creation failure");
        }
        Ok(FakeTexture {
            desc: desc.clone(),
            init: init
                .iter()
                .map(|s| SubresourceInit {
                    len: s.bytes.len(),
                    row_pitch: s.row_pitch,
                    slice_pitch: s.slice_pitch,
                })
                .collect(),
        })
    }

    fn create_view(&self, _texture: &FakeTexture, desc: &ViewDesc) -> Result<FakeView> {
        Ok(FakeView { desc: *desc })
    }
}

/// One `update_subresource` call captured by [`RecordingContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadRecord {
    pub subresource: u32,
    pub len: usize,
    pub row_pitch: u32,
    pub slice_pitch: u32,
}

/// Execution-context double that records calls in order.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub uploads: Vec<UploadRecord>,
    pub mip_generations: u32,
}

impl UploadContext<NullDevice> for RecordingContext {
    fn update_subresource(
        &mut self,
        _texture: &FakeTexture,
        subresource: u32,
        bytes: &[u8],
        row_pitch: u32,
        slice_pitch: u32,
    ) {
        self.uploads.push(UploadRecord {
            subresource,
            len: bytes.len(),
            row_pitch,
            slice_pitch,
        });
    }

    fn generate_mips(&mut self, _view: &FakeView) {
        self.mip_generations += 1;
    }
}
