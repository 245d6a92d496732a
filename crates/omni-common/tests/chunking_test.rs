//! Property tests for the message packer.

use omni_common::{generate_response_list, split_text};
use proptest::prelude::*;

fn block_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z \n]{0,80}",
        "[🟡🔴a-z\n]{1,40}",
        "[A-Z]{1900,2100}",
    ]
}

proptest! {
    #[test]
    fn packing_preserves_content_and_order(blocks in prop::collection::vec(block_strategy(), 0..30)) {
        let chunks = generate_response_list(&blocks, 2000);
        prop_assert_eq!(chunks.concat(), blocks.concat());
    }

    #[test]
    fn chunks_fit_unless_a_block_is_oversized(blocks in prop::collection::vec(block_strategy(), 0..30)) {
        let chunks = generate_response_list(&blocks, 2000);
        let oversized: Vec<&String> = blocks.iter().filter(|b| b.chars().count() > 2000).collect();

        for chunk in &chunks {
            let len = chunk.chars().count();
            prop_assert!(len <= 2000 || oversized.iter().any(|b| b.as_str() == chunk.as_str()));
            prop_assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn split_text_pieces_fit(text in "[a-zé\n ]{0,600}", max in 1usize..120) {
        let pieces = split_text(&text, max);
        prop_assert_eq!(pieces.concat(), text);
        prop_assert!(pieces.iter().all(|p| p.chars().count() <= max));
    }
}
