//! Pagination utilities.
//!
//! Pages are budget driven: plaintext books carry no page metadata, so we
//! count source characters until the budget runs out, then keep going to the
//! end of the current line so a page never stops mid-line. Each page after the
//! first opens with the last few lines of the page before it, giving the
//! reader an anchor when flipping back and forth.

/// Number of trailing lines of page `k` repeated at the top of page `k + 1`.
pub const CONTEXT_LINES: usize = 5;
/// Spaces emitted for every tab character.
pub const TAB_WIDTH: usize = 8;

/// Split the provided text into pages of roughly `budget` source characters.
///
/// Returns an empty vector for empty input. A budget of zero is treated as one.
pub fn paginate(text: &str, budget: usize) -> Vec<String> {
    Pages::new(text, budget).collect()
}

/// Lazily yields pages with the same semantics as [`paginate`].
///
/// Dropping the iterator early is the only way to stop a long pagination run.
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    text: &'a str,
    pos: usize,
    budget: usize,
    /// Trailing lines of the last page handed out.
    carry: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Accumulating { remaining: usize },
    Overflowing,
}

impl<'a> Pages<'a> {
    pub fn new(text: &'a str, budget: usize) -> Self {
        Self {
            text,
            pos: 0,
            budget: budget.max(1),
            carry: String::new(),
        }
    }
}

impl Iterator for Pages<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let text = self.text;
        let rest = &text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let mut body = String::with_capacity(self.budget.min(rest.len()) + 80);
        let mut state = SplitState::Accumulating {
            remaining: self.budget,
        };
        let mut consumed = rest.len();

        for (idx, ch) in rest.char_indices() {
            push_expanded(ch, &mut body);
            state = match state {
                SplitState::Accumulating { remaining } if remaining > 1 => {
                    SplitState::Accumulating {
                        remaining: remaining - 1,
                    }
                }
                SplitState::Accumulating { .. } => SplitState::Overflowing,
                SplitState::Overflowing if is_line_break(ch) => {
                    consumed = idx + ch.len_utf8();
                    break;
                }
                SplitState::Overflowing => SplitState::Overflowing,
            };
        }
        self.pos += consumed;

        let mut page = std::mem::take(&mut self.carry);
        page.push_str(&body);
        self.carry = trailing_lines(&page, CONTEXT_LINES).to_string();
        Some(page)
    }
}

/// Append `ch` to `out`, expanding tabs to [`TAB_WIDTH`] spaces.
pub fn push_expanded(ch: char, out: &mut String) {
    if ch == '\t' {
        out.extend(std::iter::repeat_n(' ', TAB_WIDTH));
    } else {
        out.push(ch);
    }
}

/// Borrow the last `n` lines of `page`, terminators included.
///
/// A terminator ending the page closes the final line rather than opening an
/// empty one. Returns the whole page when it holds `n` lines or fewer.
pub fn trailing_lines(page: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let body_end = match page.chars().next_back() {
        Some(ch) if is_line_break(ch) => page.len() - ch.len_utf8(),
        _ => page.len(),
    };
    page[..body_end]
        .char_indices()
        .rev()
        .filter(|&(_, ch)| is_line_break(ch))
        .nth(n - 1)
        .map_or(page, |(idx, ch)| &page[idx + ch.len_utf8()..])
}

pub(crate) fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(count: usize) -> String {
        (0..count).map(|i| format!("line {i:03}\n")).collect()
    }

    #[test]
    fn empty_input_has_no_pages() {
        assert!(paginate("", 1).is_empty());
        assert!(paginate("", 3000).is_empty());
    }

    #[test]
    fn short_input_is_a_single_page() {
        let pages = paginate("Only a line.\nAnd another.", 3000);
        assert_eq!(pages, vec!["Only a line.\nAnd another.".to_string()]);
    }

    #[test]
    fn overflow_extends_to_end_of_line() {
        let pages = paginate("AAAA\nBBBB\nCCCC\nDDDD\n", 5);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], "AAAA\nBBBB\n");
        assert_eq!(pages[1], "AAAA\nBBBB\nCCCC\nDDDD\n");
    }

    #[test]
    fn every_page_but_the_last_ends_on_a_line_break() {
        let text = numbered_lines(200);
        let pages = paginate(&text, 97);
        assert!(pages.len() > 10);
        for page in &pages[..pages.len() - 1] {
            let last = page.chars().last().expect("pages are never empty");
            assert!(is_line_break(last), "page ended mid-line: {page:?}");
        }
    }

    #[test]
    fn carriage_returns_also_end_pages() {
        let pages = paginate("abc\rdef\rghi\r", 2);
        assert_eq!(pages[0], "abc\r");
        assert!(pages[1].ends_with("def\r"));
    }

    #[test]
    fn pages_cover_input_with_bounded_overlap() {
        let text = numbered_lines(120);
        let pages = paginate(&text, 64);

        let mut rebuilt = String::new();
        for (k, page) in pages.iter().enumerate() {
            let fresh = if k == 0 {
                page.as_str()
            } else {
                let context = trailing_lines(&pages[k - 1], CONTEXT_LINES);
                assert!(context.lines().count() <= CONTEXT_LINES);
                page.strip_prefix(context)
                    .expect("page should open with the previous page's tail")
            };
            rebuilt.push_str(fresh);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn coverage_and_snapping_hold_across_budgets() {
        let text: String = (0..90)
            .map(|i| match i % 3 {
                0 => format!("\tindented {i}\n"),
                1 => format!("carriage {i}\r"),
                _ => format!("a somewhat longer plain line number {i}\n"),
            })
            .collect();
        let expanded = text.replace('\t', &" ".repeat(TAB_WIDTH));

        for budget in [1, 7, 50, 333, 10_000] {
            let pages = paginate(&text, budget);
            assert!(!pages.is_empty());

            let mut rebuilt = String::new();
            for (k, page) in pages.iter().enumerate() {
                assert!(!page.contains('\t'));
                if k + 1 < pages.len() {
                    assert!(page.ends_with(['\n', '\r']), "budget {budget} page {k}");
                }
                let context = if k == 0 {
                    ""
                } else {
                    trailing_lines(&pages[k - 1], CONTEXT_LINES)
                };
                let breaks = context.chars().filter(|&ch| is_line_break(ch)).count();
                assert!(breaks <= CONTEXT_LINES);
                rebuilt.push_str(
                    page.strip_prefix(context)
                        .expect("page should open with the previous page's tail"),
                );
            }
            assert_eq!(rebuilt, expanded, "budget {budget}");
        }
    }

    #[test]
    fn second_page_repeats_exactly_five_lines_when_available() {
        let text = numbered_lines(40);
        let pages = paginate(&text, 80);
        assert!(pages.len() > 1);
        // Page one holds lines 000..=008: the budget runs out inside line 008.
        assert!(pages[0].ends_with("line 008\n"));
        assert!(pages[1].starts_with(
            "line 004\nline 005\nline 006\nline 007\nline 008\nline 009\n"
        ));
        assert!(!pages[1].contains("line 003"));
    }

    #[test]
    fn first_page_has_no_context() {
        let text = numbered_lines(40);
        let pages = paginate(&text, 30);
        assert!(pages[0].starts_with("line 000\n"));
    }

    #[test]
    fn tabs_expand_to_eight_spaces_and_count_once() {
        let pages = paginate("\tab\ncd\n", 3);
        assert_eq!(pages[0], "        ab\n");
        assert!(pages.iter().all(|page| !page.contains('\t')));

        // The tab and `x` spend the whole budget of two.
        let pages = paginate("\tx\ny\n", 2);
        assert_eq!(pages[0], "        x\n");
    }

    #[test]
    fn input_without_terminator_is_one_page() {
        let text = "x".repeat(500);
        let pages = paginate(&text, 10);
        assert_eq!(pages, vec![text]);
    }

    #[test]
    fn long_line_overshoots_without_a_cap() {
        let long = "w".repeat(10_000);
        let text = format!("short\n{long}\ntail\n");
        let pages = paginate(&text, 8);
        assert_eq!(pages[0], format!("short\n{long}\n"));
        assert!(pages[0].chars().count() > 8 * 1000);
        assert_eq!(pages[1], format!("short\n{long}\ntail\n"));
    }

    #[test]
    fn zero_budget_behaves_like_one() {
        assert_eq!(paginate("ab\ncd\n", 0), paginate("ab\ncd\n", 1));
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        let text = "émigré\nnaïve\ncafé\n".repeat(20);
        let pages = paginate(&text, 11);
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|page| page.ends_with('\n')));
    }

    #[test]
    fn streaming_iterator_matches_batch() {
        let text = numbered_lines(50);
        let streamed: Vec<String> = Pages::new(&text, 45).take(3).collect();
        assert_eq!(streamed, paginate(&text, 45)[..3].to_vec());
    }

    #[test]
    fn trailing_lines_counts_terminators_backwards() {
        assert_eq!(trailing_lines("a\nb\nc\n", 2), "b\nc\n");
        assert_eq!(trailing_lines("a\nb\nc", 2), "b\nc");
        assert_eq!(trailing_lines("a\nb\n", 5), "a\nb\n");
        assert_eq!(trailing_lines("", 5), "");
        assert_eq!(trailing_lines("a\r\nb\n", 2), "\nb\n");
    }
}
