use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::load_config;
use crate::io::dir_io::list_entries;
use crate::io::editor::{launch_editor, resolve_editor};
use crate::io::event_log::{self, Category};
use crate::io::sidecar;
use crate::model::{Annotations, Config, EntryInfo};

use super::input;
use super::projector::{build_view, filter_rows};
use super::render;
use super::table::{Column, Row, TableOptions, TableWidget};
use super::theme::Theme;

/// Terminal size assumed when it cannot be queried
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Screen lines that are not table rows: border (2), header, rule,
/// page indicator, status row.
const NON_ROW_LINES: usize = 6;

/// Current interaction mode. Each mode owns its buffers, so leaving a
/// mode discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search {
        query: String,
        /// Rows shown when search started; the query filters these
        all_rows: Vec<Row>,
    },
    InlineEdit {
        /// Entry name the command will apply to
        target: String,
        prompt: String,
        buffer: String,
    },
}

/// Main application state
pub struct App {
    pub dir: PathBuf,
    pub config: Config,
    pub theme: Theme,
    pub table: TableWidget,
    pub mode: Mode,
    pub should_quit: bool,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
    /// Committed search queries, applied in order on every rebuild
    pub filters: Vec<String>,
    /// File to open in the external editor once the event loop regains control
    pub pending_editor: Option<PathBuf>,
    entries: Vec<EntryInfo>,
    annotations: Annotations,
    size: (u16, u16),
}

impl App {
    pub fn new(
        dir: PathBuf,
        config: Config,
        entries: Vec<EntryInfo>,
        annotations: Annotations,
        size: (u16, u16),
    ) -> Self {
        let theme = Theme::from_config(&config.ui);
        let table = TableWidget::new(Vec::new(), TableOptions::default(), theme.table_styles());
        let mut app = App {
            dir,
            config,
            theme,
            table,
            mode: Mode::Browse,
            should_quit: false,
            status_message: None,
            filters: Vec::new(),
            pending_editor: None,
            entries,
            annotations,
            size,
        };
        app.rebuild();
        app
    }

    /// Read the directory and its sidecar from disk.
    ///
    /// Failing to list the directory is fatal; a sidecar that cannot be
    /// read only loses the annotations.
    pub fn load(dir: &Path, config: Config, size: (u16, u16)) -> io::Result<Self> {
        let entries = list_entries(dir)?;
        let annotations = sidecar::load(dir).unwrap_or_else(|e| {
            event_log::error(Category::Sidecar, e.to_string());
            Annotations::new()
        });
        Ok(App::new(dir.to_path_buf(), config, entries, annotations, size))
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Rows per page for the current terminal height
    pub fn page_size(&self) -> usize {
        let fits = (self.size.1 as usize).saturating_sub(NON_ROW_LINES);
        self.config.ui.page_size.min(fits).max(1)
    }

    /// Rows after the committed filters
    fn filtered_rows(&self, columns: &[Column], mut rows: Vec<Row>) -> Vec<Row> {
        for query in &self.filters {
            rows = filter_rows(&rows, columns, query);
        }
        rows
    }

    /// Tear down and rebuild the table from the cached entries and
    /// annotations at the current size. The selection index is kept where
    /// it is still valid.
    pub fn rebuild(&mut self) {
        let previous = self.table.selected();
        let (columns, rows) = build_view(self.size.0 as usize, &self.entries, &self.annotations);
        let rows = self.filtered_rows(&columns, rows);

        let options = TableOptions {
            page_size: self.page_size(),
            ..TableOptions::default()
        };
        let mut table = TableWidget::new(columns, options, self.theme.table_styles());

        if let Mode::Search { query, all_rows } = &mut self.mode {
            table.set_rows(filter_rows(&rows, table.columns(), query));
            *all_rows = rows;
        } else {
            table.set_rows(rows);
        }
        table.select(previous);
        self.table = table;
    }

    /// Handle a terminal resize
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.rebuild();
    }

    /// Re-read entries and annotations from disk, then rebuild.
    pub fn refresh(&mut self) {
        match list_entries(&self.dir) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                let msg = format!("could not list {}: {}", self.dir.display(), e);
                event_log::error(Category::Directory, msg.clone());
                self.status_message = Some(msg);
            }
        }
        match sidecar::load(&self.dir) {
            Ok(annotations) => self.annotations = annotations,
            Err(e) => {
                event_log::error(Category::Sidecar, e.to_string());
                self.status_message = Some(e.to_string());
            }
        }
        self.rebuild();
    }

    /// Apply an annotation command to `target` and report the outcome in
    /// the status row. Failures leave everything as it was.
    pub fn apply_annotation(&mut self, target: &str, tokens: &[&str]) {
        match sidecar::apply_command(&self.dir, target, tokens) {
            Ok(record) => {
                self.status_message = Some(format!("Saved {}", record.name));
            }
            Err(e) => {
                event_log::error(Category::Sidecar, e.to_string());
                self.status_message = Some(format!("Not saved: {}", e));
            }
        }
    }

    /// Ask the event loop to open the selected entry in the editor
    pub fn request_editor(&mut self) {
        if let Some(row) = self.table.selected_row() {
            self.pending_editor = Some(self.dir.join(&row.name));
        }
    }
}

/// Run the TUI application in `dir`
pub fn run(dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let size = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
    let mut app = App::load(&dir, config, size)
        .map_err(|e| format!("cannot list {}: {}", dir.display(), e))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }

        if let Some(path) = app.pending_editor.take() {
            open_in_editor(terminal, app, &path)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Hand the terminal to the external editor, then take it back and refresh.
fn open_in_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let editor = resolve_editor(
        std::env::var("EDITOR").ok().as_deref(),
        app.config.editor.command.as_deref(),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let outcome = launch_editor(&editor, path);

    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.clear()?;

    if let Err(e) = outcome {
        event_log::error(Category::Editor, e.to_string());
        app.status_message = Some(e.to_string());
    }
    let size = crossterm::terminal::size().unwrap_or(app.size);
    app.size = size;
    app.refresh();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationRecord, EntryKind};
    use std::fs;
    use tempfile::TempDir;

    fn entries(names: &[(&str, EntryKind)]) -> Vec<EntryInfo> {
        names.iter().map(|(n, k)| EntryInfo::new(*n, *k)).collect()
    }

    fn app_with(entries: Vec<EntryInfo>, size: (u16, u16)) -> App {
        App::new(
            PathBuf::from("/nonexistent"),
            Config::default(),
            entries,
            Annotations::new(),
            size,
        )
    }

    #[test]
    fn page_size_fits_terminal() {
        let app = app_with(Vec::new(), (80, 24));
        assert_eq!(app.page_size(), 15);
        let app = app_with(Vec::new(), (80, 12));
        assert_eq!(app.page_size(), 6);
        let app = app_with(Vec::new(), (80, 3));
        assert_eq!(app.page_size(), 1);
    }

    #[test]
    fn resize_rebuilds_columns_and_keeps_selection() {
        let names: Vec<(String, EntryKind)> =
            (0..5).map(|i| (format!("f{}", i), EntryKind::File)).collect();
        let list: Vec<EntryInfo> = names.iter().map(|(n, k)| EntryInfo::new(n.clone(), *k)).collect();
        let mut app = app_with(list, (80, 24));
        app.table.select(3);
        let before: usize = app.table.columns().iter().map(|c| c.width).sum();

        app.resize(120, 30);
        let after: usize = app.table.columns().iter().map(|c| c.width).sum();
        assert_eq!(before, 74);
        assert_eq!(after, 114);
        assert_eq!(app.table.selected(), 3);
    }

    #[test]
    fn filters_survive_rebuild() {
        let mut app = app_with(
            entries(&[("alpha", EntryKind::File), ("beta", EntryKind::File)]),
            (80, 24),
        );
        app.filters.push("alp".into());
        app.rebuild();
        assert_eq!(app.table.rows().len(), 1);
        app.resize(100, 24);
        assert_eq!(app.table.rows()[0].name, "alpha");
    }

    #[test]
    fn load_reads_sidecar() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        sidecar::apply_command(dir.path(), "a.txt", &["+work"]).unwrap();

        let app = App::load(dir.path(), Config::default(), (80, 24)).unwrap();
        let rows = app.table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tags_cell, "#work");
        assert_eq!(
            app.annotations().get("a.txt"),
            Some(&AnnotationRecord {
                name: "a.txt".into(),
                tags: vec!["#work".into()],
                description: String::new(),
            })
        );
    }

    #[test]
    fn load_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(App::load(&dir.path().join("gone"), Config::default(), (80, 24)).is_err());
    }

    #[test]
    fn apply_annotation_failure_sets_status() {
        let mut app = app_with(entries(&[("a", EntryKind::File)]), (80, 24));
        app.apply_annotation("a", &["+x"]);
        assert!(
            app.status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("Not saved"))
        );
        assert!(app.annotations().is_empty());
    }

    #[test]
    fn request_editor_uses_selected_row() {
        let mut app = app_with(
            entries(&[("a", EntryKind::File), ("b", EntryKind::File)]),
            (80, 24),
        );
        app.table.select(1);
        app.request_editor();
        assert_eq!(app.pending_editor, Some(PathBuf::from("/nonexistent/b")));
    }

    #[test]
    fn request_editor_without_rows_is_noop() {
        let mut app = app_with(Vec::new(), (80, 24));
        app.request_editor();
        assert!(app.pending_editor.is_none());
    }
}
