use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker appended to text cut short by [`truncate_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Truncate `text` to at most `max_cells` terminal cells, ending in `...`.
///
/// Widths of 3 or less leave the text untouched: there is no room for
/// anything but the ellipsis itself.
pub fn truncate_ellipsis(text: &str, max_cells: usize) -> String {
    if max_cells <= ELLIPSIS.len() || display_width(text) <= max_cells {
        return text.to_string();
    }
    let budget = max_cells - ELLIPSIS.len();
    let mut width = 0;
    let mut result = String::new();
    for grapheme in text.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push_str(ELLIPSIS);
    result
}

/// Fit `text` into exactly `cells` terminal cells: truncate with an
/// ellipsis when too wide, then pad with spaces.
///
/// Columns too narrow for an ellipsis are filled with dots when the text
/// overflows, so the result never exceeds `cells`.
pub fn fit_cell(text: &str, cells: usize) -> String {
    let mut out = if display_width(text) <= cells {
        text.to_string()
    } else if cells <= ELLIPSIS.len() {
        ".".repeat(cells)
    } else {
        truncate_ellipsis(text, cells)
    };
    let w = display_width(&out);
    if w < cells {
        out.push_str(&" ".repeat(cells - w));
    }
    out
}

/// Remove the last grapheme cluster from `s`. No-op on an empty string.
pub fn pop_grapheme(s: &mut String) {
    if let Some(start) = prev_grapheme_boundary(s, s.len()) {
        s.truncate(start);
    }
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    let prefix = &s[..byte_offset];
    let mut last_start = 0;
    for (i, _) in prefix.grapheme_indices(true) {
        last_start = i;
    }
    Some(last_start)
}

/// Display width of a grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}
