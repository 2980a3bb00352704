/// Outcome of applying a caller-supplied window to fetched content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The requested window. `next_start` is the index the caller should
    /// pass on the next call, present only when the window was filled and
    /// content remains beyond it.
    Slice {
        text: String,
        next_start: Option<usize>,
    },
    /// `start_index` points at or past the end of non-empty content.
    OutOfRange,
    /// The computed window is empty.
    EndOfContent,
}

/// Cut `content` to the caller's window.
///
/// Indices count characters, not bytes, so a window can never split a UTF-8
/// sequence. The server holds no memory of prior windows; continuation is
/// encoded entirely in the `next_start` the caller echoes back.
pub fn paginate(content: &str, start_index: usize, max_length: usize) -> Page {
    let total = content.chars().count();
    if total > 0 && start_index >= total {
        return Page::OutOfRange;
    }

    let text: String = content.chars().skip(start_index).take(max_length).collect();
    if text.is_empty() {
        return Page::EndOfContent;
    }

    let taken = text.chars().count();
    let remaining = total - (start_index + taken);
    let next_start = (taken == max_length && remaining > 0).then(|| start_index + taken);

    Page::Slice { text, next_start }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(page: Page) -> (String, Option<usize>) {
        match page {
            Page::Slice { text, next_start } => (text, next_start),
            other => panic!("expected slice, got {other:?}"),
        }
    }

    #[test]
    fn full_window_with_remainder_names_next_start() {
        let content = "a".repeat(12000);
        let (text, next) = slice(paginate(&content, 0, 5000));
        assert_eq!(text.len(), 5000);
        assert_eq!(next, Some(5000));
    }

    #[test]
    fn final_partial_window_has_no_continuation() {
        let content = "a".repeat(12000);
        let (text, next) = slice(paginate(&content, 10000, 5000));
        assert_eq!(text.len(), 2000);
        assert_eq!(next, None);
    }

    #[test]
    fn start_at_end_is_out_of_range() {
        let content = "a".repeat(12000);
        assert_eq!(paginate(&content, 12000, 5000), Page::OutOfRange);
    }

    #[test]
    fn start_beyond_end_is_out_of_range() {
        assert_eq!(paginate("short", 99, 5), Page::OutOfRange);
    }

    #[test]
    fn window_ending_exactly_at_eof_has_no_continuation() {
        let content = "a".repeat(100);
        let (text, next) = slice(paginate(&content, 50, 50));
        assert_eq!(text.len(), 50);
        assert_eq!(next, None);
    }

    #[test]
    fn empty_content_is_end_of_content() {
        assert_eq!(paginate("", 0, 100), Page::EndOfContent);
    }

    #[test]
    fn window_length_is_min_of_max_and_remaining() {
        let content = "abcdefghij";
        for start in 0..content.len() {
            for max in 1..=12 {
                let (text, _) = slice(paginate(content, start, max));
                assert_eq!(text.chars().count(), max.min(content.len() - start));
            }
        }
    }

    #[test]
    fn windows_respect_char_boundaries() {
        let content = "héllo wörld";
        let (first, next) = slice(paginate(content, 0, 6));
        assert_eq!(first, "héllo ");
        assert_eq!(next, Some(6));
        let (second, next) = slice(paginate(content, 6, 6));
        assert_eq!(second, "wörld");
        assert_eq!(next, None);
    }

    #[test]
    fn consecutive_windows_reassemble_content() {
        let content = "0123456789".repeat(7);
        let mut start = 0;
        let mut rebuilt = String::new();
        loop {
            match paginate(&content, start, 16) {
                Page::Slice { text, next_start } => {
                    rebuilt.push_str(&text);
                    match next_start {
                        Some(next) => start = next,
                        None => break,
                    }
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(rebuilt, content);
    }
}
