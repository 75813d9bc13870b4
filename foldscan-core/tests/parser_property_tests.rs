//! Structural round-trip property for the parser
//!
//! For any well-formed synthetic scan with W windows, V videos per
//! window and F features per window, parsing must return exactly that
//! structure, in input order.

use foldscan_core::parse;
use proptest::collection::btree_set;
use proptest::prelude::*;
use std::fmt::Write;

fn synthetic_scan(windows: &[u32], videos: usize, features: usize) -> String {
    let mut text = String::new();
    for &window in windows {
        writeln!(text, "Window {window}").unwrap();
        writeln!(
            text,
            "video_id accuracy prec_nb prec_b recall_nb recall_b f1_nb f1_b video_name [identity]"
        )
        .unwrap();
        for v in 0..videos {
            writeln!(
                text,
                "{} 0.90 0.95 0.85 0.92 0.88 0.93 0.81 clip_{v}.mp4 [{v}]",
                v + 1
            )
            .unwrap();
        }
        if features > 0 {
            writeln!(text, "Top Feature Importance:").unwrap();
            for k in 0..features {
                writeln!(text, "feat_{k} 0.{:02}", 99 - k).unwrap();
            }
        }
        writeln!(text).unwrap();
    }
    text
}

proptest! {
    #[test]
    fn parse_preserves_structure(
        windows in btree_set(1u32..500, 1..5),
        videos in 0usize..6,
        features in 0usize..5,
    ) {
        let windows: Vec<u32> = windows.into_iter().collect();
        let text = synthetic_scan(&windows, videos, features);
        let outcome = parse(&text).unwrap();

        prop_assert!(outcome.diagnostics.is_empty());
        prop_assert_eq!(outcome.windows.len(), windows.len());
        for (section, &expected_size) in outcome.windows.iter().zip(&windows) {
            prop_assert_eq!(section.window_size, expected_size);
            prop_assert_eq!(section.videos.len(), videos);
            prop_assert_eq!(section.features.len(), features);
            for (i, row) in section.videos.iter().enumerate() {
                prop_assert_eq!(row.identity as usize, i);
                prop_assert_eq!(&row.video_name, &format!("clip_{i}.mp4"));
            }
            for (i, feature) in section.features.iter().enumerate() {
                prop_assert_eq!(feature.rank as usize, i + 1);
            }
        }
    }

    #[test]
    fn parse_is_deterministic(
        windows in btree_set(1u32..500, 1..4),
        videos in 0usize..4,
    ) {
        let windows: Vec<u32> = windows.into_iter().collect();
        let text = synthetic_scan(&windows, videos, 2);
        let first = parse(&text).unwrap();
        let second = parse(&text).unwrap();
        prop_assert_eq!(first, second);
    }
}
