//! Packing of formatted text blocks into message-sized chunks.

/// Discord's per-message character limit.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Greedily packs `blocks` into chunks of at most `max_length` characters.
///
/// Blocks are atomic and keep their order. A block that alone exceeds
/// `max_length` becomes its own oversized chunk rather than being cut.
/// Lengths are counted in characters, not bytes.
pub fn generate_response_list<I, S>(blocks: I, max_length: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in blocks {
        let block = block.as_ref();
        let block_len = block.chars().count();

        if current_len + block_len > max_length {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(block);
            current_len = block_len;
        } else {
            current.push_str(block);
            current_len += block_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Cuts free text into blocks of at most `max_length` characters.
///
/// Breaks after newlines; a single line longer than the limit is cut on
/// character boundaries. Concatenating the result gives back `text`.
pub fn split_text(text: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);
    let mut pieces = Vec::new();

    for line in text.split_inclusive('\n') {
        let mut rest = line;
        while let Some((cut, _)) = rest.char_indices().nth(max_length) {
            pieces.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        if !rest.is_empty() {
            pieces.push(rest.to_string());
        }
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packs_until_limit_then_flushes() {
        let blocks = vec!["a".repeat(500), "b".repeat(500), "c".repeat(1100)];
        let chunks = generate_response_list(&blocks, 2000);

        assert_eq!(
            chunks,
            vec![format!("{}{}", "a".repeat(500), "b".repeat(500)), "c".repeat(1100)]
        );
    }

    #[test]
    fn test_empty_input_gives_no_chunks() {
        let chunks = generate_response_list(Vec::<String>::new(), MAX_MESSAGE_LENGTH);
        assert!(chunks.is_empty());

        let only_empty = generate_response_list(["", ""], MAX_MESSAGE_LENGTH);
        assert!(only_empty.is_empty());
    }

    #[test]
    fn test_exact_fit_stays_in_one_chunk() {
        let chunks = generate_response_list(["x".repeat(1000), "y".repeat(1000)], 2000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2000);
    }

    #[test]
    fn test_oversized_block_passes_through_whole() {
        let chunks = generate_response_list(["a".repeat(10), "b".repeat(2500), "c".repeat(10)], 2000);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "a".repeat(10));
        assert_eq!(chunks[1], "b".repeat(2500));
        assert_eq!(chunks[2], "c".repeat(10));
    }

    #[test]
    fn test_oversized_first_block_does_not_emit_empty_chunk() {
        let chunks = generate_response_list(["z".repeat(2001)], 2000);
        assert_eq!(chunks, vec!["z".repeat(2001)]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Each circle is four bytes but one character.
        let block = "🟡".repeat(700);
        let chunks = generate_response_list([block.clone(), block.clone(), block.clone()], 2000);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1400);
        assert_eq!(chunks[1].chars().count(), 700);
    }

    #[test]
    fn test_split_text_prefers_line_breaks() {
        let text = "first line\nsecond line\nthird";
        let pieces = split_text(text, 15);

        assert_eq!(pieces, vec!["first line\n", "second line\n", "third"]);
    }

    #[test]
    fn test_split_text_cuts_long_lines() {
        let text = "é".repeat(25);
        let pieces = split_text(&text, 10);

        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|p| p.chars().count() <= 10));
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn test_split_text_empty() {
        assert!(split_text("", 2000).is_empty());
    }

    #[test]
    fn test_split_then_pack_respects_limit() {
        let answer = format!("{}\n{}\n{}", "a".repeat(1500), "b".repeat(4100), "c".repeat(300));
        let chunks = generate_response_list(split_text(&answer, 2000), 2000);

        assert!(chunks.iter().all(|c| c.chars().count() <= 2000));
        assert_eq!(chunks.concat(), answer);
    }
}
