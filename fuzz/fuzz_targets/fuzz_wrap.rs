#![no_main]

use libfuzzer_sys::fuzz_target;
use stringwrap::{WidthPolicy, WrapConfig, wrap_with_config};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 2048 {
        return;
    }

    let policy = if flags & 0x80 != 0 {
        WidthPolicy::Cjk
    } else {
        WidthPolicy::Standard
    };

    for limit in [2, 3, 10, 40, 80] {
        let config = WrapConfig::new(limit)
            .tab_size(usize::from(flags & 0x07))
            .trim_whitespace(flags & 0x08 != 0)
            .split_words(flags & 0x10 != 0)
            .width_policy(policy);
        let Ok(out) = wrap_with_config(text, &config) else {
            panic!("limit {limit} rejected");
        };

        let segs = out.segments();
        if out.text.is_empty() {
            assert!(segs.is_empty(), "segments without output");
        } else {
            assert_eq!(out.text.split('\n').count(), segs.len());
        }

        // Every ESC byte is copied through.
        assert_eq!(text.matches('\x1b').count(), out.text.matches('\x1b').count());

        let mut expected_byte = 0;
        let mut expected_rune = 0;
        for seg in segs {
            assert_eq!(seg.orig_byte_offset.start, expected_byte);
            assert_eq!(seg.orig_rune_offset.start, expected_rune);
            expected_byte = seg.orig_byte_offset.end;
            expected_rune = seg.orig_rune_offset.end;

            assert_eq!(seg.not_within_limit, seg.width > limit);
        }
    }
});
