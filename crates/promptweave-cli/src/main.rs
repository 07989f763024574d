mod messages;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use messages::EnglishText;
use promptweave_config::Config;
use promptweave_engine::{
    BlockCollection, BlockId, ImportMode, NotificationSink, Preset, Severity, TagName, TextLookup,
    default_presets, markup, preset_tags,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{env, io::stdout, path::PathBuf, process};

const CARET_MARK: char = '▏';

enum Mode {
    Normal,
    AddingBlock { input: String },
    PickingPreset { index: usize },
    Editing { id: BlockId },
    ConfirmClear,
}

/// Status line holding the most recent notification
#[derive(Default)]
struct StatusLine {
    last: Option<(Severity, String)>,
}

impl NotificationSink for StatusLine {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::warn!("{message}"),
            _ => log::info!("{message}"),
        }
        self.last = Some((severity, message.to_string()));
    }
}

struct App {
    collection: BlockCollection,
    presets: Vec<Preset>,
    /// Preset keys plus validated custom tags from config, contributed to
    /// the autocomplete candidate pool on every edit
    extra_tags: Vec<TagName>,
    document_path: Option<PathBuf>,
    list_state: ListState,
    mode: Mode,
    status: StatusLine,
    text: EnglishText,
}

impl App {
    fn new(config: &Config, document_path: Option<PathBuf>) -> Self {
        let categories = default_presets();
        let mut extra_tags = preset_tags(&categories);
        let presets: Vec<Preset> = categories.into_iter().flat_map(|c| c.presets).collect();

        let mut status = StatusLine::default();
        for raw in &config.custom_tags {
            match TagName::new(raw) {
                Ok(tag) => {
                    if !extra_tags.contains(&tag) {
                        extra_tags.push(tag);
                    }
                }
                Err(e) => status.notify(Severity::Error, &format!("Ignoring custom tag: {e}")),
            }
        }
        if config.language != "en" {
            status.notify(
                Severity::Info,
                &format!("Language '{}' not bundled, using English", config.language),
            );
        }

        Self {
            collection: BlockCollection::new(),
            presets,
            extra_tags,
            document_path,
            list_state: ListState::default(),
            mode: Mode::Normal,
            status,
            text: EnglishText,
        }
    }

    fn selected_id(&self) -> Option<BlockId> {
        let index = self.list_state.selected()?;
        self.collection.blocks().nth(index).map(|b| b.id())
    }

    fn preset_for(&self, tag: &TagName) -> Option<&Preset> {
        self.presets.iter().find(|p| &p.key == tag)
    }

    fn select_next(&mut self) {
        if self.collection.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.collection.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.collection.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.collection.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Swap the selected block with its neighbour and reconcile the engine
    /// sequence to the new order
    fn move_selected(&mut self, down: bool) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let mut order: Vec<BlockId> = self.collection.blocks().map(|b| b.id()).collect();
        let target = if down { index + 1 } else { index.wrapping_sub(1) };
        if target >= order.len() {
            return;
        }
        order.swap(index, target);
        match self.collection.reorder(&order) {
            Ok(()) => self.list_state.select(Some(target)),
            Err(e) => self.status.notify(Severity::Error, &e.to_string()),
        }
    }

    fn add_custom_block(&mut self, raw: &str) {
        // The add field lowercases its input, matching tag style on import
        let name = raw.trim().to_lowercase();
        match TagName::new(&name) {
            Ok(tag_name) => {
                let label = tag_name.to_string();
                self.collection.add_block(tag_name, "");
                self.list_state.select(Some(self.collection.len() - 1));
                self.status
                    .notify(Severity::Success, &format!("Added <{label}> block"));
            }
            Err(e) => self.status.notify(Severity::Error, &e.to_string()),
        }
    }

    fn add_preset_block(&mut self, index: usize) {
        let Some(preset) = self.presets.get(index) else {
            return;
        };
        let tag_name = preset.key.clone();
        let display = self.text.text(&preset.name_key);
        self.collection.add_block(tag_name, "");
        self.list_state.select(Some(self.collection.len() - 1));
        self.status
            .notify(Severity::Success, &format!("Added {display} block"));
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(removed) = self.collection.remove_block(id) {
            self.status
                .notify(Severity::Info, &format!("Removed <{}>", removed.tag_name()));
        }
        if self.collection.is_empty() {
            self.list_state.select(None);
        } else {
            let last = self.collection.len() - 1;
            let selected = self.list_state.selected().unwrap_or(0).min(last);
            self.list_state.select(Some(selected));
        }
    }

    /// Fill the selected block from its preset's templates, cycling through
    /// them on repeated presses
    fn apply_template(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some((tag_name, current)) = self
            .collection
            .block(id)
            .map(|b| (b.tag_name().clone(), b.content().to_string()))
        else {
            return;
        };
        let templates: Vec<(String, String)> = match self.preset_for(&tag_name) {
            Some(preset) if !preset.templates.is_empty() => preset
                .templates
                .iter()
                .map(|t| (self.text.text(&t.label_key), self.text.text(&t.value_key)))
                .collect(),
            _ => {
                self.status
                    .notify(Severity::Info, "No templates for this block");
                return;
            }
        };

        let next = templates
            .iter()
            .position(|(_, value)| *value == current)
            .map(|i| (i + 1) % templates.len())
            .unwrap_or(0);
        let (label, value) = &templates[next];
        self.collection
            .set_content(id, value, value.len(), &self.extra_tags);
        self.status
            .notify(Severity::Success, &format!("Applied template: {label}"));
    }

    fn import_document(&mut self, mode: ImportMode) {
        let Some(path) = self.document_path.clone() else {
            self.status
                .notify(Severity::Error, "No document path configured");
            return;
        };
        match std::fs::read_to_string(&path) {
            Ok(markup_text) => {
                let report = markup::balance_report(&markup_text);
                if !report.is_balanced() {
                    log::warn!("unbalanced tags in {}: {report:?}", path.display());
                    self.status.notify(
                        Severity::Info,
                        "Document has unbalanced tags; importing what matches",
                    );
                }
                let count = self.collection.import_from(&markup_text, mode);
                log::info!("imported {count} blocks from {}", path.display());
                if count == 0 {
                    self.status
                        .notify(Severity::Error, "No blocks found in document");
                } else {
                    self.status
                        .notify(Severity::Success, &format!("Imported {count} block(s)"));
                }
                if self.list_state.selected().is_none() && !self.collection.is_empty() {
                    self.list_state.select(Some(0));
                }
                if self
                    .list_state
                    .selected()
                    .is_some_and(|i| i >= self.collection.len())
                {
                    self.list_state.select(if self.collection.is_empty() {
                        None
                    } else {
                        Some(self.collection.len() - 1)
                    });
                }
            }
            Err(e) => {
                log::warn!("import from {} failed: {e}", path.display());
                self.status
                    .notify(Severity::Error, &format!("Import failed: {e}"));
            }
        }
    }

    fn export_document(&mut self) {
        let Some(path) = self.document_path.clone() else {
            self.status
                .notify(Severity::Error, "No document path configured");
            return;
        };
        if self.collection.to_markup().trim().is_empty() {
            self.status.notify(Severity::Error, "Nothing to export");
            return;
        }
        match std::fs::write(&path, self.collection.to_markup()) {
            Ok(()) => {
                log::info!("exported document to {}", path.display());
                self.status.notify(
                    Severity::Success,
                    &format!(
                        "Exported {} block(s) to {}",
                        self.collection.len(),
                        path.display()
                    ),
                );
            }
            Err(e) => {
                log::warn!("export to {} failed: {e}", path.display());
                self.status
                    .notify(Severity::Error, &format!("Export failed: {e}"));
            }
        }
    }

    // --- Key handling per mode ---

    /// Returns true when the app should quit
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match &self.mode {
            Mode::Normal => return self.handle_key_normal(code),
            Mode::AddingBlock { .. } => self.handle_key_adding(code),
            Mode::PickingPreset { .. } => self.handle_key_picking(code),
            Mode::Editing { id } => {
                let id = *id;
                self.handle_key_editing(id, code);
            }
            Mode::ConfirmClear => self.handle_key_confirm(code),
        }
        false
    }

    fn handle_key_normal(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Char('J') => self.move_selected(true),
            KeyCode::Char('K') => self.move_selected(false),
            KeyCode::Char('a') => {
                self.mode = Mode::AddingBlock {
                    input: String::new(),
                }
            }
            KeyCode::Char('p') => {
                if !self.presets.is_empty() {
                    self.mode = Mode::PickingPreset { index: 0 };
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.mode = Mode::Editing { id };
                }
            }
            KeyCode::Char('t') => self.apply_template(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('x') => {
                if !self.collection.is_empty() {
                    self.mode = Mode::ConfirmClear;
                }
            }
            KeyCode::Char('i') => self.import_document(ImportMode::Append),
            KeyCode::Char('I') => self.import_document(ImportMode::Replace),
            KeyCode::Char('w') => self.export_document(),
            _ => {}
        }
        false
    }

    fn handle_key_adding(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let input = match &self.mode {
                    Mode::AddingBlock { input } => input.clone(),
                    _ => return,
                };
                self.mode = Mode::Normal;
                self.add_custom_block(&input);
            }
            KeyCode::Backspace => {
                if let Mode::AddingBlock { input } = &mut self.mode {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::AddingBlock { input } = &mut self.mode {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_key_picking(&mut self, code: KeyCode) {
        let count = self.presets.len();
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Down | KeyCode::Char('j') => {
                if let Mode::PickingPreset { index } = &mut self.mode {
                    *index = (*index + 1) % count;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Mode::PickingPreset { index } = &mut self.mode {
                    *index = (*index + count - 1) % count;
                }
            }
            KeyCode::Enter => {
                let index = match &self.mode {
                    Mode::PickingPreset { index } => *index,
                    _ => return,
                };
                self.mode = Mode::Normal;
                self.add_preset_block(index);
            }
            _ => {}
        }
    }

    fn handle_key_editing(&mut self, id: BlockId, code: KeyCode) {
        let Some(block) = self.collection.block(id) else {
            self.mode = Mode::Normal;
            return;
        };
        let autocomplete_active = block.autocomplete().is_active();

        match code {
            // While a session is active the navigation keys belong to it
            KeyCode::Esc if autocomplete_active => self.collection.autocomplete_cancel(id),
            KeyCode::Down if autocomplete_active => self.collection.autocomplete_next(id),
            KeyCode::Up if autocomplete_active => self.collection.autocomplete_previous(id),
            KeyCode::Enter | KeyCode::Tab if autocomplete_active => {
                self.collection.autocomplete_accept(id);
            }
            KeyCode::Esc => {
                // Leaving the editor is a blur: any session is discarded
                self.collection.autocomplete_cancel(id);
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => self.edit_insert(id, '\n'),
            KeyCode::Backspace => self.edit_backspace(id),
            KeyCode::Left => self.edit_move_horizontal(id, false),
            KeyCode::Right => self.edit_move_horizontal(id, true),
            KeyCode::Up => self.edit_move_vertical(id, true),
            KeyCode::Down => self.edit_move_vertical(id, false),
            KeyCode::Char(c) => self.edit_insert(id, c),
            _ => {}
        }
    }

    fn handle_key_confirm(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                // Confirmation was given in this modal, so the clear itself
                // is unconditional
                self.collection.clear(None);
                self.list_state.select(None);
                self.mode = Mode::Normal;
                self.status.notify(Severity::Info, "All blocks cleared");
            }
            _ => {
                self.mode = Mode::Normal;
                self.status.notify(Severity::Info, "Clear cancelled");
            }
        }
    }

    // --- Content editing primitives ---

    fn edit_insert(&mut self, id: BlockId, ch: char) {
        let Some(block) = self.collection.block(id) else {
            return;
        };
        let caret = block.caret();
        let mut text = block.content().to_string();
        text.insert(caret, ch);
        self.collection
            .set_content(id, &text, caret + ch.len_utf8(), &self.extra_tags);
    }

    fn edit_backspace(&mut self, id: BlockId) {
        let Some(block) = self.collection.block(id) else {
            return;
        };
        let caret = block.caret();
        if caret == 0 {
            return;
        }
        let text = block.content();
        let previous = prev_char_boundary(text, caret);
        let mut new_text = String::with_capacity(text.len());
        new_text.push_str(&text[..previous]);
        new_text.push_str(&text[caret..]);
        self.collection
            .set_content(id, &new_text, previous, &self.extra_tags);
    }

    fn edit_move_horizontal(&mut self, id: BlockId, forward: bool) {
        let Some(block) = self.collection.block(id) else {
            return;
        };
        let text = block.content().to_string();
        let caret = if forward {
            next_char_boundary(&text, block.caret())
        } else {
            prev_char_boundary(&text, block.caret())
        };
        self.collection.set_content(id, &text, caret, &self.extra_tags);
    }

    fn edit_move_vertical(&mut self, id: BlockId, up: bool) {
        let Some(block) = self.collection.block(id) else {
            return;
        };
        let text = block.content().to_string();
        let caret = move_caret_vertically(&text, block.caret(), up);
        self.collection.set_content(id, &text, caret, &self.extra_tags);
    }
}

/// Byte offset of the previous character boundary, saturating at 0
fn prev_char_boundary(text: &str, offset: usize) -> usize {
    text[..offset]
        .chars()
        .next_back()
        .map(|c| offset - c.len_utf8())
        .unwrap_or(0)
}

/// Byte offset of the next character boundary, saturating at the end
fn next_char_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map(|c| offset + c.len_utf8())
        .unwrap_or(text.len())
}

/// Move the caret one line up or down, keeping the byte column when the
/// target line is long enough
fn move_caret_vertically(text: &str, caret: usize, up: bool) -> usize {
    let line_start = text[..caret].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = caret - line_start;

    let target = if up {
        if line_start == 0 {
            return caret;
        }
        let prev_line_start = text[..line_start - 1].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let prev_line_len = line_start - 1 - prev_line_start;
        prev_line_start + column.min(prev_line_len)
    } else {
        match text[caret..].find('\n') {
            None => return caret,
            Some(offset) => {
                let next_line_start = caret + offset + 1;
                let next_line_len = text[next_line_start..]
                    .find('\n')
                    .unwrap_or(text.len() - next_line_start);
                next_line_start + column.min(next_line_len)
            }
        }
    };

    // Byte columns can land inside a multi-byte character; back off to a
    // boundary so downstream slicing stays safe
    let mut target = target.min(text.len());
    while target > 0 && !text.is_char_boundary(target) {
        target -= 1;
    }
    target
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [document.xml]", args[0]);
        process::exit(1);
    }

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("failed to load config: {e}");
            eprintln!("Warning: failed to load config file: {e}");
            Config::default()
        }
    };

    let document_path = args
        .get(1)
        .map(PathBuf::from)
        .or_else(|| config.document_path.clone());

    let mut app = App::new(&config, document_path);
    if app.document_path.as_ref().is_some_and(|p| p.exists()) {
        app.import_document(ImportMode::Append);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(outer[0]);

    let picking = match &app.mode {
        Mode::PickingPreset { index } => Some(*index),
        _ => None,
    };
    match picking {
        Some(index) => render_preset_picker(f, app, panes[0], index),
        None => render_block_list(f, app, panes[0]),
    }

    let editing = match &app.mode {
        Mode::Editing { id } => Some(*id),
        _ => None,
    };
    if let Some(id) = editing {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(panes[1]);
        render_editor(f, app, right[0], id);
        render_preview(f, app, right[1]);
    } else {
        render_preview(f, app, panes[1]);
    }

    render_status(f, app, outer[1]);
}

fn render_block_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .collection
        .blocks()
        .map(|block| {
            let symbol = app
                .preset_for(block.tag_name())
                .map(|preset| preset.symbol.as_str())
                .unwrap_or("·");
            let display_text = format!("{symbol} <{}>", block.tag_name());
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Blocks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_preset_picker(f: &mut Frame, app: &App, area: Rect, index: usize) {
    let items: Vec<ListItem> = app
        .presets
        .iter()
        .map(|preset| {
            let display_text = format!(
                "{} {} — {}",
                preset.symbol,
                app.text.text(&preset.name_key),
                app.text.text(&preset.description_key)
            );
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Presets"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    let mut state = ListState::default();
    state.select(Some(index));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_editor(f: &mut Frame, app: &App, area: Rect, id: BlockId) {
    let Some(block) = app.collection.block(id) else {
        return;
    };

    let mut lines: Vec<Line> = if block.content().is_empty() {
        let placeholder = app
            .preset_for(block.tag_name())
            .map(|preset| app.text.text(&preset.placeholder_key))
            .unwrap_or_else(|| "Type content; <tag references autocomplete".to_string());
        let mut first = vec![Line::from(vec![Span::raw(CARET_MARK.to_string())])];
        first.extend(
            placeholder
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::DarkGray)))),
        );
        first
    } else {
        let caret = block.caret();
        let mut marked = String::with_capacity(block.content().len() + CARET_MARK.len_utf8());
        marked.push_str(&block.content()[..caret]);
        marked.push(CARET_MARK);
        marked.push_str(&block.content()[caret..]);
        marked
            .split('\n')
            .map(|l| Line::from(Span::raw(l.to_string())))
            .collect()
    };

    let autocomplete = block.autocomplete();
    if autocomplete.is_active() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Suggestions:",
            Style::default().fg(Color::Cyan),
        )));
        for (i, candidate) in autocomplete.candidates().iter().enumerate() {
            let selected = autocomplete.selected_index() == Some(i);
            let prefix = if selected { "➤ " } else { "  " };
            let style = if selected {
                Style::default().bg(Color::Yellow).fg(Color::Black)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{prefix}<{candidate}>"),
                style,
            )));
        }
    }

    let editor = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Editing <{}>", block.tag_name())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(editor, area);
}

fn render_preview(f: &mut Frame, app: &App, area: Rect) {
    let content = if app.collection.is_empty() {
        "Add a block to start building the document".to_string()
    } else {
        app.collection.to_markup().to_string()
    };

    let preview = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });

    f.render_widget(preview, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let first_line = match &app.mode {
        Mode::AddingBlock { input } => Line::from(vec![
            Span::raw("New block tag: "),
            Span::styled(
                format!("{input}{CARET_MARK}"),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Mode::ConfirmClear => Line::from(Span::styled(
            "Clear all blocks? (y/n)",
            Style::default().fg(Color::Red),
        )),
        _ => match &app.status.last {
            Some((severity, message)) => {
                let color = match severity {
                    Severity::Success => Color::Green,
                    Severity::Error => Color::Red,
                    Severity::Info => Color::White,
                };
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(""),
        },
    };

    let help_text = match &app.mode {
        Mode::Normal => {
            "q: Quit | j/k: Select | J/K: Move | a: Add | p: Preset | e: Edit | t: Template | d: Delete | x: Clear | i/I: Import | w: Write"
        }
        Mode::AddingBlock { .. } => "Enter: Add | Esc: Cancel",
        Mode::PickingPreset { .. } => "j/k: Select | Enter: Add | Esc: Cancel",
        Mode::Editing { .. } => {
            "Esc: Done | type to edit | <tag triggers suggestions | ↑/↓: Navigate | Tab/Enter: Accept"
        }
        Mode::ConfirmClear => "y: Clear everything | any other key: Keep blocks",
    };

    let status = Paragraph::new(vec![first_line, Line::from(Span::raw(help_text))]);
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Caret movement helpers ============

    #[test]
    fn test_char_boundary_stepping() {
        let text = "a€b";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 4); // past the 3-byte €
        assert_eq!(next_char_boundary(text, 4), 5);
        assert_eq!(next_char_boundary(text, 5), 5);

        assert_eq!(prev_char_boundary(text, 5), 4);
        assert_eq!(prev_char_boundary(text, 4), 1);
        assert_eq!(prev_char_boundary(text, 1), 0);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }

    #[test]
    fn test_vertical_move_keeps_column() {
        let text = "first line\nsecond\nthird line";
        // From column 3 of "second" up to column 3 of "first line"
        let second_start = "first line\n".len();
        assert_eq!(move_caret_vertically(text, second_start + 3, true), 3);
        // And down to column 3 of "third line"
        let third_start = "first line\nsecond\n".len();
        assert_eq!(
            move_caret_vertically(text, second_start + 3, false),
            third_start + 3
        );
    }

    #[test]
    fn test_vertical_move_clamps_to_short_lines() {
        let text = "a long first line\nab\nanother long line";
        let second_start = "a long first line\n".len();
        // Moving down from column 10 lands at the end of the short "ab" line
        assert_eq!(
            move_caret_vertically(text, 10, false),
            second_start + 2
        );
    }

    #[test]
    fn test_vertical_move_at_edges_is_noop() {
        let text = "only\ntwo";
        assert_eq!(move_caret_vertically(text, 2, true), 2);
        let last = text.len();
        assert_eq!(move_caret_vertically(text, last, false), last);
    }
}
