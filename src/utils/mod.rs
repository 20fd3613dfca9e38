//! Utility functions and helpers.
//!
//! - [`pager`]: Pager integration and terminal size
//! - [`thread_pool`]: Thread pool configuration for parallel classification
//! - Column fitting for the side-by-side renderer

/// Pager integration for long output
pub mod pager;
/// Thread pool configuration for parallel operations
pub mod thread_pool;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Tab stop width used when laying out columns
pub const TAB_WIDTH: usize = 4;

/// Fit `text` into exactly `width` terminal cells.
///
/// Tabs are expanded to spaces, control characters are dropped, longer text is
/// cut with a trailing `…` and shorter text is padded with spaces. Wide
/// characters (CJK, most emoji) occupy two cells and combining marks none, so
/// a wide character that would straddle the cut is left out.
///
/// # Examples
///
/// ```
/// use pagediff::utils::fit_column;
///
/// assert_eq!(fit_column("abc", 5), "abc  ");
/// assert_eq!(fit_column("abcdef", 4), "abc…");
/// assert_eq!(fit_column("日本語", 5), "日本…");
/// ```
#[must_use]
pub fn fit_column(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let mut expanded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => expanded.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => expanded.push(c),
        }
    }

    let mut fitted = String::with_capacity(width);
    let mut used = 0;
    if expanded.width() > width {
        // One cell is reserved for the ellipsis
        for c in expanded.chars() {
            let cells = c.width().unwrap_or(0);
            if used + cells > width - 1 {
                break;
            }
            fitted.push(c);
            used += cells;
        }
        fitted.push('…');
        used += 1;
    } else {
        used = expanded.width();
        fitted = expanded;
    }

    fitted.extend(std::iter::repeat_n(' ', width - used));
    fitted
}

/// `"1 line"` / `"2 lines"`
#[must_use]
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_column_pads_and_truncates() {
        assert_eq!(fit_column("", 3), "   ");
        assert_eq!(fit_column("exact", 5), "exact");
        assert_eq!(fit_column("too long", 5), "too …");
        assert_eq!(fit_column("anything", 0), "");
    }

    #[test]
    fn test_fit_column_tabs_and_unicode() {
        assert_eq!(fit_column("\tx", 6), "    x ");
        assert_eq!(fit_column("héllo wörld", 7), "héllo …");
        assert_eq!(fit_column("a\u{7}b", 3), "ab ");
    }

    #[test]
    fn test_fit_column_counts_terminal_cells() {
        let fitted = fit_column("日本語のテキスト行", 8);
        assert_eq!(fitted.width(), 8);
        assert_eq!(fitted, "日本語… ");

        assert_eq!(fit_column("日本", 6), "日本  ");
        assert_eq!(fit_column("日本", 4), "日本");
        assert_eq!(fit_column("e\u{301}x", 3), "e\u{301}x ");
        assert_eq!(fit_column("🦀🦀🦀", 5).width(), 5);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "line", "lines"), "1 line");
        assert_eq!(plural(0, "line", "lines"), "0 lines");
        assert_eq!(plural(5, "removal", "removals"), "5 removals");
    }
}
