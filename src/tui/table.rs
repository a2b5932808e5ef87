use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::model::EntryKind;
use crate::util::unicode::fit_cell;

use super::theme::TableStyles;

const COLUMN_SEPARATOR: &str = "\u{2502}"; // │
const RULE: &str = "\u{2500}"; // ─
const RULE_CROSS: &str = "\u{253C}"; // ┼

/// Identifies a table column and the row field it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Name,
    Tags,
    Description,
}

impl ColumnId {
    /// Stable string identifier
    pub fn key(self) -> &'static str {
        match self {
            ColumnId::Name => "filename",
            ColumnId::Tags => "tags",
            ColumnId::Description => "description",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Name => "Name",
            ColumnId::Tags => "Tags",
            ColumnId::Description => "Description",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Width in terminal cells
    pub width: usize,
    /// Whether text search looks at this column
    pub filtered: bool,
}

impl Column {
    pub fn new(id: ColumnId, width: usize, filtered: bool) -> Self {
        Column {
            id,
            title: id.title().to_string(),
            width,
            filtered,
        }
    }
}

/// One display row: an entry plus its annotation, with cells already
/// truncated to their column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub kind: EntryKind,
    pub tags: Vec<String>,
    pub description: String,
    pub name_cell: String,
    pub tags_cell: String,
    pub description_cell: String,
}

impl Row {
    /// Display text for a column
    pub fn cell(&self, id: ColumnId) -> &str {
        match id {
            ColumnId::Name => &self.name_cell,
            ColumnId::Tags => &self.tags_cell,
            ColumnId::Description => &self.description_cell,
        }
    }

    /// Untruncated text for a column, used for matching
    pub fn full_text(&self, id: ColumnId) -> String {
        match id {
            ColumnId::Name => self.name.clone(),
            ColumnId::Tags => self.tags.join(", "),
            ColumnId::Description => self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Rows per page, at least 1
    pub page_size: usize,
    /// Only a focused table highlights its selection
    pub focused: bool,
    /// Whether the table's rows can be narrowed by search
    pub filtered: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            page_size: 15,
            focused: true,
            filtered: true,
        }
    }
}

/// Paged table with a single selected row.
///
/// The current page is always derived from the selection
/// (`selected / page_size`), so the two can never disagree.
#[derive(Debug, Clone)]
pub struct TableWidget {
    columns: Vec<Column>,
    rows: Vec<Row>,
    page_size: usize,
    selected: usize,
    focused: bool,
    filtered: bool,
    /// Previous key, only kept to recognize `gg`
    last_key: Option<char>,
    styles: TableStyles,
}

impl TableWidget {
    pub fn new(columns: Vec<Column>, options: TableOptions, styles: TableStyles) -> Self {
        TableWidget {
            columns,
            rows: Vec::new(),
            page_size: options.page_size.max(1),
            selected: 0,
            focused: options.focused,
            filtered: options.filtered,
            last_key: None,
            styles,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replace the displayed rows. The selection is left as is; call
    /// [`clamp_selection`](Self::clamp_selection) if the row count shrank.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// Select `index`, clamped to the last row.
    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based page holding the selection
    pub fn page(&self) -> usize {
        self.selected / self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Index range of the rows on the current page
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = (self.page() * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        start..end
    }

    /// Total width of a rendered line in cells
    pub fn width(&self) -> usize {
        let cells: usize = self.columns.iter().map(|c| c.width).sum();
        cells + self.columns.len().saturating_sub(1)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Handle a navigation key. Returns whether the key was used.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let previous = self.last_key.take();
        if !matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                self.move_by(-(self.page_size as isize))
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                self.move_by(self.page_size as isize)
            }
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Home => self.selected = 0,
            KeyCode::Char('g') => {
                if previous == Some('g') {
                    self.selected = 0;
                } else {
                    self.last_key = Some('g');
                }
            }
            _ => return false,
        }
        true
    }

    fn move_by(&mut self, delta: isize) {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return;
        };
        let current = self.selected.min(last);
        self.selected = current.saturating_add_signed(delta).min(last);
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Render header, rule, the current page's rows, and a page indicator
    /// when there is more than one page.
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.page_size + 3);

        let titles: Vec<String> = self
            .columns
            .iter()
            .map(|c| fit_cell(&c.title, c.width))
            .collect();
        lines.push(self.join_cells(titles, self.styles.header, self.styles.border));

        let mut rule = Vec::new();
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                rule.push(Span::styled(RULE_CROSS, self.styles.border));
            }
            rule.push(Span::styled(RULE.repeat(col.width), self.styles.border));
        }
        lines.push(Line::from(rule));

        for idx in self.visible_range() {
            let row = &self.rows[idx];
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| fit_cell(row.cell(c.id), c.width))
                .collect();
            let line = if self.focused && idx == self.selected {
                self.join_cells(cells, self.styles.selected, self.styles.selected)
            } else {
                self.join_cells(cells, self.styles.normal, self.styles.border)
            };
            lines.push(line);
        }

        if self.rows.len() > self.page_size {
            lines.push(Line::from(Span::styled(
                format!("Page {}/{}", self.page() + 1, self.page_count()),
                self.styles.footer,
            )));
        }

        lines
    }

    fn join_cells(&self, cells: Vec<String>, cell_style: Style, sep_style: Style) -> Line<'static> {
        let mut spans = Vec::with_capacity(cells.len() * 2);
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(COLUMN_SEPARATOR, sep_style));
            }
            spans.push(Span::styled(cell, cell_style));
        }
        Line::from(spans)
    }
}
