//! Turns directory entries and annotations into table columns and rows.
//!
//! Everything here is pure: given a terminal width, the raw entries, and the
//! annotation map, it produces the same view every time.

use crate::model::{AnnotationRecord, Annotations, EntryInfo};
use crate::util::unicode::{display_width, truncate_ellipsis};

use super::table::{Column, ColumnId, Row};

/// Cells reserved for the outer border and column separators
const CHROME_WIDTH: usize = 6;
/// Narrowest the name column gets when shrunk to fit its content
pub const MIN_NAME_WIDTH: usize = 10;

/// Column widths for the three table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub tags: usize,
    pub description: usize,
}

impl ColumnLayout {
    /// Split the terminal width: name 30%, tags 20%, description the rest.
    pub fn from_width(term_width: usize) -> Self {
        let available = term_width.saturating_sub(CHROME_WIDTH);
        let name = available * 30 / 100;
        let tags = available * 20 / 100;
        ColumnLayout {
            name,
            tags,
            description: available - name - tags,
        }
    }

    /// Shrink the name column to the longest visible name, never below
    /// [`MIN_NAME_WIDTH`] nor above its original share. Freed cells go to
    /// the description.
    pub fn fit_names(self, entries: &[EntryInfo]) -> Self {
        let longest = entries
            .iter()
            .filter(|e| !e.is_hidden())
            .map(|e| display_width(&name_label(e)))
            .max()
            .unwrap_or(0);
        let name = longest.max(MIN_NAME_WIDTH).min(self.name);
        ColumnLayout {
            name,
            tags: self.tags,
            description: self.description + (self.name - name),
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        vec![
            Column::new(ColumnId::Name, self.name, true),
            Column::new(ColumnId::Tags, self.tags, true),
            Column::new(ColumnId::Description, self.description, true),
        ]
    }
}

/// Icon and name as shown in the name column
fn name_label(entry: &EntryInfo) -> String {
    format!("{} {}", entry.kind.icon(), entry.name)
}

/// Build display rows for `entries`, skipping hidden ones.
pub fn project_rows(
    entries: &[EntryInfo],
    annotations: &Annotations,
    layout: &ColumnLayout,
) -> Vec<Row> {
    let empty = AnnotationRecord::default();
    entries
        .iter()
        .filter(|e| !e.is_hidden())
        .map(|entry| {
            let record = annotations.get(&entry.name).unwrap_or(&empty);
            Row {
                name: entry.name.clone(),
                kind: entry.kind,
                tags: record.tags.clone(),
                description: record.description.clone(),
                name_cell: truncate_ellipsis(&name_label(entry), layout.name),
                tags_cell: truncate_ellipsis(&record.tags_joined(), layout.tags),
                description_cell: truncate_ellipsis(&record.description, layout.description),
            }
        })
        .collect()
}

/// Columns and rows for a terminal `term_width` cells wide.
pub fn build_view(
    term_width: usize,
    entries: &[EntryInfo],
    annotations: &Annotations,
) -> (Vec<Column>, Vec<Row>) {
    let layout = ColumnLayout::from_width(term_width).fit_names(entries);
    (layout.columns(), project_rows(entries, annotations, &layout))
}

/// Keep rows whose filtered columns contain `query`, ignoring case.
pub fn filter_rows(rows: &[Row], columns: &[Column], query: &str) -> Vec<Row> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            columns
                .iter()
                .filter(|c| c.filtered)
                .any(|c| row.full_text(c.id).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;

    fn record(name: &str, tags: &[&str], description: &str) -> AnnotationRecord {
        AnnotationRecord {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.into(),
        }
    }

    fn annotations(records: Vec<AnnotationRecord>) -> Annotations {
        records.into_iter().map(|r| (r.name.clone(), r)).collect()
    }

    // ── layout ─────────────────────────────────────────────────────

    #[test]
    fn layout_splits_available_width() {
        let layout = ColumnLayout::from_width(106);
        assert_eq!(
            layout,
            ColumnLayout {
                name: 30,
                tags: 20,
                description: 50
            }
        );
    }

    #[test]
    fn layout_uses_every_cell() {
        for width in [0, 5, 6, 7, 40, 80, 123, 300] {
            let l = ColumnLayout::from_width(width);
            assert_eq!(l.name + l.tags + l.description, width.saturating_sub(6));
        }
    }

    #[test]
    fn fit_names_shrinks_to_content() {
        let entries = vec![
            EntryInfo::new("a.txt", EntryKind::File),
            EntryInfo::new("longer-name.md", EntryKind::File),
        ];
        let layout = ColumnLayout::from_width(106).fit_names(&entries);
        // "📄 longer-name.md" is 2 + 1 + 14 cells
        assert_eq!(layout.name, 17);
        assert_eq!(layout.description, 50 + 13);
    }

    #[test]
    fn fit_names_respects_floor_and_share() {
        let short = vec![EntryInfo::new("a", EntryKind::File)];
        assert_eq!(ColumnLayout::from_width(106).fit_names(&short).name, MIN_NAME_WIDTH);

        let long = vec![EntryInfo::new("x".repeat(80), EntryKind::File)];
        assert_eq!(ColumnLayout::from_width(106).fit_names(&long).name, 30);

        // Share below the floor stays at the share
        assert_eq!(ColumnLayout::from_width(30).fit_names(&short).name, 7);
    }

    #[test]
    fn fit_names_ignores_hidden_entries() {
        let entries = vec![
            EntryInfo::new(".a-very-long-hidden-name", EntryKind::File),
            EntryInfo::new("ab", EntryKind::File),
        ];
        assert_eq!(
            ColumnLayout::from_width(106).fit_names(&entries).name,
            MIN_NAME_WIDTH
        );
    }

    // ── projection ─────────────────────────────────────────────────

    #[test]
    fn fresh_directory_rows() {
        let entries = vec![
            EntryInfo::new(".lanno.json", EntryKind::File),
            EntryInfo::new("a.txt", EntryKind::File),
            EntryInfo::new("b", EntryKind::Dir),
        ];
        let layout = ColumnLayout::from_width(80);
        let rows = project_rows(&entries, &Annotations::new(), &layout);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name_cell, "\u{1F4C4} a.txt");
        assert_eq!(rows[1].name_cell, "\u{1F4C1} b");
        assert_ne!(rows[0].kind, rows[1].kind);
        assert!(rows.iter().all(|r| r.tags_cell.is_empty() && r.description_cell.is_empty()));
    }

    #[test]
    fn rows_merge_annotations() {
        let entries = vec![EntryInfo::new("notes.txt", EntryKind::File)];
        let ann = annotations(vec![record("notes.txt", &["#work", "#urgent"], "Quarterly report")]);
        let rows = project_rows(&entries, &ann, &ColumnLayout::from_width(120));

        assert_eq!(rows[0].tags_cell, "#work, #urgent");
        assert_eq!(rows[0].description_cell, "Quarterly report");
        assert_eq!(rows[0].tags, vec!["#work", "#urgent"]);
    }

    #[test]
    fn cells_truncate_independently() {
        let entries = vec![EntryInfo::new("report.txt", EntryKind::File)];
        let ann = annotations(vec![record(
            "report.txt",
            &["#alpha", "#beta", "#gamma"],
            "a description that is much too long for its column",
        )]);
        let layout = ColumnLayout {
            name: 20,
            tags: 10,
            description: 16,
        };
        let rows = project_rows(&entries, &ann, &layout);

        assert_eq!(rows[0].name_cell, "\u{1F4C4} report.txt");
        assert_eq!(rows[0].tags_cell, "#alpha,...");
        assert_eq!(rows[0].description_cell, "a description...");
        assert_eq!(rows[0].description, ann["report.txt"].description);
    }

    #[test]
    fn build_view_is_deterministic() {
        let entries = vec![
            EntryInfo::new("a.txt", EntryKind::File),
            EntryInfo::new("b", EntryKind::Dir),
        ];
        let ann = annotations(vec![record("b", &["#dir"], "")]);
        let first = build_view(80, &entries, &ann);
        let second = build_view(80, &entries, &ann);
        assert_eq!(first, second);
        assert_eq!(first.0.len(), 3);
        assert_eq!(first.1.len(), 2);
    }

    // ── filtering ──────────────────────────────────────────────────

    #[test]
    fn search_matches_tags_and_description() {
        let entries = vec![
            EntryInfo::new("plan.md", EntryKind::File),
            EntryInfo::new("notes.txt", EntryKind::File),
            EntryInfo::new("photo.jpg", EntryKind::File),
        ];
        let ann = annotations(vec![
            record("plan.md", &["#work"], ""),
            record("notes.txt", &[], "Homework for Monday"),
            record("photo.jpg", &["#holiday"], "beach"),
        ]);
        let (columns, rows) = build_view(100, &entries, &ann);

        let hits = filter_rows(&rows, &columns, "WORK");
        let names: Vec<&str> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["plan.md", "notes.txt"]);
    }

    #[test]
    fn search_matches_untruncated_text() {
        let entries = vec![EntryInfo::new("a", EntryKind::File)];
        let ann = annotations(vec![record("a", &[], "short start then the hidden tail")]);
        let layout = ColumnLayout {
            name: 10,
            tags: 10,
            description: 10,
        };
        let rows = project_rows(&entries, &ann, &layout);
        assert_eq!(filter_rows(&rows, &layout.columns(), "tail").len(), 1);
    }

    #[test]
    fn search_respects_filtered_flag() {
        let entries = vec![EntryInfo::new("work.txt", EntryKind::File)];
        let (mut columns, rows) = build_view(100, &entries, &Annotations::new());
        assert_eq!(filter_rows(&rows, &columns, "work").len(), 1);
        columns[0].filtered = false;
        assert!(filter_rows(&rows, &columns, "work").is_empty());
    }

    #[test]
    fn empty_query_keeps_everything() {
        let entries = vec![
            EntryInfo::new("a", EntryKind::File),
            EntryInfo::new("b", EntryKind::File),
        ];
        let (columns, rows) = build_view(80, &entries, &Annotations::new());
        assert_eq!(filter_rows(&rows, &columns, ""), rows);
    }
}
