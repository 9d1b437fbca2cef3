use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io::load_config;
use crate::io::watcher::{SlotEvent, SlotWatcher};
use crate::model::config::NotedConfig;
use crate::model::note::NoteId;
use crate::ops::query::query_regex;
use crate::session::Controller;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search prompt (the list filters live)
    Search,
    /// The create/edit dialog has focus
    Dialog,
    /// A y/n confirmation popup is open
    Confirm,
}

/// Which dialog field receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogField {
    #[default]
    Title,
    Category,
    Content,
}

impl DialogField {
    pub fn next(self) -> Self {
        match self {
            DialogField::Title => DialogField::Category,
            DialogField::Category => DialogField::Content,
            DialogField::Content => DialogField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DialogField::Title => DialogField::Content,
            DialogField::Category => DialogField::Title,
            DialogField::Content => DialogField::Category,
        }
    }
}

/// What a confirmation popup will do on `y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete from the card list
    DeleteNote { id: NoteId },
    /// Delete the note open in the dialog
    DeleteCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
    /// Mode to return to on cancel
    pub return_mode: Mode,
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the visible cards
    pub cursor: usize,
    /// First visible card
    pub scroll_offset: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Query before the search prompt opened, restored on Esc
    pub search_original: String,
    pub dialog_field: DialogField,
    /// Byte offset of the cursor in the focused dialog field
    pub edit_cursor: usize,
    pub confirm_state: Option<ConfirmState>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Directory `x` exports into
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let theme = Theme::from_config(controller.theme(), &controller.config().ui);
        App {
            controller,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            search_original: String::new(),
            dialog_field: DialogField::default(),
            edit_cursor: 0,
            confirm_state: None,
            status_message: None,
            status_is_error: false,
            export_dir: PathBuf::from("."),
        }
    }

    /// Number of cards currently shown
    pub fn visible_count(&self) -> usize {
        self.controller.visible_notes().len()
    }

    /// Id of the card under the cursor
    pub fn cursor_note_id(&self) -> Option<NoteId> {
        self.controller
            .visible_notes()
            .get(self.cursor)
            .map(|n| n.id)
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    /// Move the cursor onto `id` if it is visible
    pub fn select_note(&mut self, id: NoteId) {
        if let Some(idx) = self
            .controller
            .visible_notes()
            .iter()
            .position(|n| n.id == id)
        {
            self.cursor = idx;
        }
    }

    /// Rebuild the palette after a theme change
    pub fn refresh_theme(&mut self) {
        self.theme = Theme::from_config(self.controller.theme(), &self.controller.config().ui);
    }

    /// Regex for highlighting the active query in cards
    pub fn active_search_re(&self) -> Option<Regex> {
        query_regex(self.controller.query())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    /// Text of the focused dialog field
    pub fn focused_text(&self) -> &str {
        let form = self.controller.form();
        match self.dialog_field {
            DialogField::Title => &form.title,
            DialogField::Category => &form.category,
            DialogField::Content => &form.content,
        }
    }

    /// Mutable text of the focused dialog field, None when the dialog is closed
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        let field = self.dialog_field;
        let form = self.controller.form_mut()?;
        Some(match field {
            DialogField::Title => &mut form.title,
            DialogField::Category => &mut form.category,
            DialogField::Content => &mut form.content,
        })
    }

    /// Move focus to `field`, cursor at its end
    pub fn focus_field(&mut self, field: DialogField) {
        self.dialog_field = field;
        self.edit_cursor = self.focused_text().len();
    }

    /// Apply watcher events from another process
    pub fn apply_slot_events(&mut self, events: &[SlotEvent]) {
        for evt in events {
            match evt {
                SlotEvent::NotesChanged => {
                    let selected = self.cursor_note_id();
                    if let Err(e) = self.controller.reload() {
                        self.set_error(format!("reload failed: {}", e));
                        continue;
                    }
                    if let Some(id) = selected {
                        self.select_note(id);
                    }
                    self.clamp_cursor();
                }
                SlotEvent::ThemeChanged => {
                    self.controller.reload_theme();
                    self.refresh_theme();
                }
            }
        }
    }

    /// Per-tick housekeeping: expire toasts
    pub fn tick(&mut self, now: Instant) {
        self.controller.expire_toasts(now);
    }
}

/// Load config and notes from `data_dir`, falling back to default config
/// when config.toml is unreadable.
pub fn build_app(data_dir: &Path) -> Result<App, Box<dyn std::error::Error>> {
    let config = match load_config(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("event=config_load status=error error={}", e);
            NotedConfig::default()
        }
    };
    let controller = Controller::open(data_dir, config)?;
    let mut app = App::new(controller);
    if let Ok(cwd) = std::env::current_dir() {
        app.export_dir = cwd;
    }
    Ok(app)
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = build_app(data_dir)?;

    let watcher = match SlotWatcher::start(data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            log::warn!("event=watcher_start status=error error={}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    log::info!("event=tui_start notes={}", app.controller.store().len());
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    log::info!("event=tui_exit");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&SlotWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(w) = watcher {
            let events = w.poll();
            if !events.is_empty() {
                app.apply_slot_events(&events);
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
