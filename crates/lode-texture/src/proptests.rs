//! Structural invariants of the layout builder over randomized descriptors.

use proptest::prelude::*;

use crate::layout::{build_layout, total_payload_bytes};
use crate::shape::{Classified, ClassifiedShape};
use lode_formats::PixelFormat;

fn format_strategy() -> impl Strategy<Value = PixelFormat> {
    prop_oneof![
        Just(PixelFormat::R8G8B8A8Unorm),
        Just(PixelFormat::B8G8R8X8Unorm),
        Just(PixelFormat::B5G6R5Unorm),
        Just(PixelFormat::R32G32B32A32Float),
        Just(PixelFormat::Bc1Unorm),
        Just(PixelFormat::Bc3Unorm),
    ]
}

fn classified_strategy() -> impl Strategy<Value = Classified> {
    (
        1u32..=300,
        1u32..=300,
        prop_oneof![
            Just(ClassifiedShape::TwoD { cubemap: false }),
            Just(ClassifiedShape::ThreeD),
        ],
        1u32..=9,
        1u32..=4,
        1u32..=16,
    )
        .prop_map(|(width, height, shape, mip_count, array, depth)| {
            let volume = matches!(shape, ClassifiedShape::ThreeD);
            Classified {
                shape,
                width,
                height,
                depth: if volume { depth } else { 1 },
                mip_count,
                array_size: if volume { 1 } else { array },
            }
        })
}

fn payload_for(c: &Classified, format: PixelFormat) -> Vec<u8> {
    let len = total_payload_bytes(c, format) as usize;
    (0..len).map(|i| (i % 253) as u8).collect()
}

proptest! {
    #[test]
    fn retained_bytes_never_exceed_the_payload(
        c in classified_strategy(),
        format in format_strategy(),
        max_size in prop_oneof![Just(0u32), 1u32..=256],
    ) {
        let data = payload_for(&c, format);
        if let Ok(layout) = build_layout(&c, format, &data, max_size) {
            let total: u64 = layout.subresources.iter().map(|s| s.bytes.len() as u64).sum();
            prop_assert!(total <= data.len() as u64);
        }
    }

    #[test]
    fn layout_is_deterministic(
        c in classified_strategy(),
        format in format_strategy(),
        max_size in prop_oneof![Just(0u32), 1u32..=256],
    ) {
        let data = payload_for(&c, format);
        let a = build_layout(&c, format, &data, max_size);
        let b = build_layout(&c, format, &data, max_size);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "one run succeeded and the other failed"),
        }
    }

    #[test]
    fn every_slice_retains_the_same_level_count(
        c in classified_strategy(),
        format in format_strategy(),
        max_size in prop_oneof![Just(0u32), 1u32..=256],
    ) {
        let data = payload_for(&c, format);
        if let Ok(layout) = build_layout(&c, format, &data, max_size) {
            // Slice-0 skip count must describe every slice.
            let retained = (c.mip_count - layout.skipped_mips) as usize;
            prop_assert_eq!(layout.subresources.len(), retained * c.array_size as usize);
        }
    }

    #[test]
    fn first_retained_extent_follows_the_halving_sequence(
        c in classified_strategy(),
        format in format_strategy(),
        max_size in prop_oneof![Just(0u32), 1u32..=256],
    ) {
        let data = payload_for(&c, format);
        if let Ok(layout) = build_layout(&c, format, &data, max_size) {
            let (mut w, mut h, mut d) = (c.width, c.height, c.depth);
            for _ in 0..layout.skipped_mips {
                w = (w >> 1).max(1);
                h = (h >> 1).max(1);
                d = (d >> 1).max(1);
            }
            prop_assert_eq!((layout.width, layout.height, layout.depth), (w, h, d));
        }
    }

    #[test]
    fn unclamped_layout_consumes_the_exact_payload(
        c in classified_strategy(),
        format in format_strategy(),
    ) {
        let data = payload_for(&c, format);
        let layout = build_layout(&c, format, &data, 0).unwrap();
        let total: u64 = layout.subresources.iter().map(|s| s.bytes.len() as u64).sum();
        prop_assert_eq!(total, data.len() as u64);
        prop_assert_eq!(layout.skipped_mips, 0);
    }
}
