use std::{
    fs, io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{info, warn};

use prompter_tui::autoscroll::AutoScroll;
use prompter_tui::color::Rgb;
use prompter_tui::config::{self, Config, MAX_LINE_SPACING};
use prompter_tui::logging;
use prompter_tui::render::{Alignment, RenderOptions, ViewLayout, ViewPoint, render_document};
use prompter_tui::script_input::ScriptInput;
use prompter_tui::segments::{Document, FormatKind};
use prompter_tui::selection::{Motion, NativeSelection, SelectionRead, compute_offsets, move_point};
use prompter_tui::state::{Action, EditorState};
use prompter_tui::store::{FileStore, SCRIPT_KEY, ScriptStore, load_script};
use prompter_tui::theme::Theme;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const TICK_RATE: Duration = Duration::from_millis(50);
const TOOLBAR_ROWS: u16 = 2;

#[derive(Parser)]
#[command(name = "prompter", version, about = "Teleprompter for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script to load into the input screen
    file: Option<PathBuf>,

    /// Skip the input screen and start prompting right away
    #[arg(long)]
    start: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the location of the config file
    ConfigPath,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    if let Some(Commands::ConfigPath) = cli.command {
        println!("{}", config_path.display());
        return Ok(());
    }

    let cfg = config::load_config_from(&config_path)?;
    let _log_guard = match &cfg.log_file {
        Some(path) => logging::init(path)?,
        None => None,
    };
    logging::install_panic_hook();

    let mut store = FileStore::default_location()?;
    let initial = match &cli.file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            store.save(SCRIPT_KEY, &text)?;
            Some(text)
        }
        None => store.load(SCRIPT_KEY)?,
    };
    info!(store = %store.dir().display(), "starting");

    let mut app = App::new(cfg, Box::new(store), initial.unwrap_or_default());
    if cli.start {
        app.start_prompter();
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;
        // The frame just drawn holds the layout a deferred read has to see.
        app.after_draw();

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK_RATE {
            app.on_tick(elapsed);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PromptTarget {
    Text,
    Background,
}

impl PromptTarget {
    fn label(self) -> &'static str {
        match self {
            PromptTarget::Text => "Text colour",
            PromptTarget::Background => "Background colour",
        }
    }
}

struct ColorPrompt {
    target: PromptTarget,
    input: String,
}

/// Cell geometry the current layout was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LayoutKey {
    width: usize,
    alignment: Alignment,
    line_spacing: usize,
}

struct PrompterView {
    state: EditorState,
    native: NativeSelection,
    layout: ViewLayout,
    layout_key: Option<LayoutKey>,
    scroll_top: usize,
    autoscroll: AutoScroll,
    alignment: Alignment,
    line_spacing: usize,
    background: Rgb,
    pending_read: bool,
    dragging: bool,
    drag_moved: bool,
    prompt: Option<ColorPrompt>,
    text_area: Rect,
}

impl PrompterView {
    fn new(script: &str, config: &Config) -> Self {
        Self {
            state: EditorState::from_script(script),
            native: NativeSelection::new(),
            layout: ViewLayout::default(),
            layout_key: None,
            scroll_top: 0,
            autoscroll: AutoScroll::new(config.scroll_speed),
            alignment: config.alignment,
            line_spacing: config.line_spacing,
            background: config.background_color,
            pending_read: false,
            dragging: false,
            drag_moved: false,
            prompt: None,
            text_area: Rect::default(),
        }
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = state.reduce(action);
        self.state = state;
        if effects.clear_native_selection {
            self.native.remove_all_ranges();
        }
    }

    fn read_selection(&mut self) {
        let read = compute_offsets(&self.layout, &self.native);
        self.dispatch(Action::SelectionRead(read));
    }

    fn highlight(&self) -> Option<std::ops::Range<usize>> {
        if self.native.is_collapsed() {
            return None;
        }
        match compute_offsets(&self.layout, &self.native) {
            SelectionRead::Range { start, end } => Some(start..end),
            _ => None,
        }
    }

    fn viewport_height(&self) -> usize {
        self.text_area.height.max(1) as usize
    }

    fn max_scroll(&self) -> usize {
        self.layout
            .total_lines()
            .saturating_sub(self.viewport_height())
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_top as isize + delta;
        self.scroll_top = target.clamp(0, self.max_scroll() as isize) as usize;
    }

    fn point_from_mouse(&self, column: u16, row: u16) -> Option<ViewPoint> {
        let area = self.text_area;
        if area.width == 0 || area.height == 0 || self.layout.total_lines() == 0 {
            return None;
        }
        let row = row.clamp(area.y, area.y + area.height - 1);
        let line = (self.scroll_top + (row - area.y) as usize).min(self.layout.total_lines() - 1);
        Some(ViewPoint::new(line, column.saturating_sub(area.x)))
    }

    fn ensure_visible(&mut self, point: ViewPoint) {
        let height = self.viewport_height();
        if point.line < self.scroll_top {
            self.scroll_top = point.line;
        } else if point.line >= self.scroll_top + height {
            self.scroll_top = point.line + 1 - height;
        }
    }

    fn navigate(&mut self, motion: Motion, extend: bool) {
        let from = match self.native.focus() {
            Some(point) => point,
            None => self
                .layout
                .line_start(self.scroll_top)
                .unwrap_or_default(),
        };
        let to = move_point(&self.layout, from, motion);
        if extend {
            self.native.extend(to);
        } else {
            self.native.collapse(to);
        }
        self.ensure_visible(to);
        self.read_selection();
    }

    /// Drops a selection whose anchors belong to a layout with another shape.
    fn sync_layout_key(&mut self, key: LayoutKey) {
        if self.layout_key.is_some_and(|previous| previous != key) && self.native.range_count() > 0
        {
            self.native.remove_all_ranges();
            self.dispatch(Action::SelectionRead(SelectionRead::Unavailable));
        }
        self.layout_key = Some(key);
    }
}

enum Screen {
    Input,
    Prompter(Box<PrompterView>),
}

struct App {
    config: Config,
    theme: Theme,
    store: Box<dyn ScriptStore>,
    input: ScriptInput,
    input_scroll: usize,
    screen: Screen,
    should_quit: bool,
    status_message: Option<(String, Instant)>,
}

impl App {
    fn new(config: Config, store: Box<dyn ScriptStore>, script: String) -> Self {
        let theme = Theme::from_config(&config);
        Self {
            config,
            theme,
            store,
            input: ScriptInput::new(script),
            input_scroll: 0,
            screen: Screen::Input,
            should_quit: false,
            status_message: None,
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn prune_status_message(&mut self) {
        if let Some((_, instant)) = &self.status_message
            && instant.elapsed() > STATUS_TIMEOUT
        {
            self.status_message = None;
        }
    }

    fn start_prompter(&mut self) {
        let script = match self.store.save(SCRIPT_KEY, self.input.text()) {
            Ok(()) => load_script(self.store.as_ref()),
            Err(err) => Err(err),
        };
        let script = match script {
            Ok(script) => script,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "script store unavailable");
                self.set_status(format!("Could not save script: {err:#}"));
                self.input.text().to_string()
            }
        };
        info!(chars = script.chars().count(), "entering prompter");
        self.screen = Screen::Prompter(Box::new(PrompterView::new(&script, &self.config)));
    }

    fn back_to_input(&mut self) {
        info!("leaving prompter");
        self.screen = Screen::Input;
    }

    fn after_draw(&mut self) {
        if let Screen::Prompter(view) = &mut self.screen
            && view.pending_read
        {
            view.pending_read = false;
            view.read_selection();
        }
    }

    fn on_tick(&mut self, elapsed: Duration) {
        self.prune_status_message();
        if let Screen::Prompter(view) = &mut self.screen {
            let rows = view.autoscroll.advance(elapsed);
            if rows > 0 {
                view.scroll_by(rows as isize);
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }
        self.prune_status_message();
        match &self.screen {
            Screen::Input => self.draw_input(frame, area),
            Screen::Prompter(_) => self.draw_prompter(frame, area),
        }
    }

    fn draw_input(&mut self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Enter Your Script",
            self.theme.title_style(),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(title, vertical[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Script Text ");
        let inner = block.inner(vertical[1]);
        frame.render_widget(block, vertical[1]);

        if self.input.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                "Paste or type your script here...",
                self.theme.placeholder_style(),
            ));
            frame.render_widget(placeholder, inner);
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        } else if inner.width > 0 && inner.height > 0 {
            let options = RenderOptions {
                width: inner.width as usize,
                alignment: Alignment::Left,
                line_spacing: 0,
                default_color: ratatui::style::Color::Reset,
                background: ratatui::style::Color::Reset,
                highlight: None,
                highlight_style: Style::default(),
            };
            let render = render_document(&Document::from_script(self.input.text()), &options);
            let caret = render.layout.point_at(self.input.cursor());
            let height = inner.height as usize;
            if caret.line < self.input_scroll {
                self.input_scroll = caret.line;
            } else if caret.line >= self.input_scroll + height {
                self.input_scroll = caret.line + 1 - height;
            }
            let visible: Vec<Line<'static>> = render
                .lines
                .into_iter()
                .skip(self.input_scroll)
                .take(height)
                .collect();
            frame.render_widget(Paragraph::new(Text::from(visible)), inner);
            let x = inner.x + caret.column.min(inner.width - 1);
            let y = inner.y + (caret.line - self.input_scroll) as u16;
            frame.set_cursor_position(Position::new(x, y));
        }

        let footer = match &self.status_message {
            Some((message, _)) => Line::from(message.clone()),
            None => Line::from(format!(
                "Ctrl+S/F5: Start Prompter  Ctrl+Q: Quit  {} lines",
                self.input.line_count()
            )),
        };
        frame.render_widget(
            Paragraph::new(footer).style(self.theme.toolbar_style()),
            vertical[2],
        );
    }

    fn draw_prompter(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme.clone();
        let status = self.status_message.as_ref().map(|(msg, _)| msg.clone());
        let Screen::Prompter(view) = &mut self.screen else {
            return;
        };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(TOOLBAR_ROWS)])
            .split(area);
        let text_area = vertical[0];
        let toolbar_area = vertical[1];
        view.text_area = text_area;

        let key = LayoutKey {
            width: text_area.width.max(1) as usize,
            alignment: view.alignment,
            line_spacing: view.line_spacing,
        };
        view.sync_layout_key(key);

        let background = view.background.to_ratatui();
        let options = RenderOptions {
            width: key.width,
            alignment: key.alignment,
            line_spacing: key.line_spacing,
            default_color: theme.text,
            background,
            highlight: view.highlight(),
            highlight_style: theme.selection_style(),
        };
        let render = render_document(&view.state.document, &options);
        view.layout = render.layout;
        view.scroll_top = view.scroll_top.min(view.max_scroll());

        let visible: Vec<Line<'static>> = render
            .lines
            .into_iter()
            .skip(view.scroll_top)
            .take(text_area.height as usize)
            .collect();
        let paragraph = Paragraph::new(Text::from(visible))
            .style(theme.prompter_style().bg(background));
        frame.render_widget(paragraph, text_area);

        if view.prompt.is_none()
            && view.native.is_collapsed()
            && let Some(focus) = view.native.focus()
            && let Some(offset) = view.layout.offset_at(focus)
        {
            let caret = view.layout.point_at(offset);
            if caret.line >= view.scroll_top
                && caret.line < view.scroll_top + text_area.height as usize
            {
                let x = text_area.x + caret.column.min(text_area.width.saturating_sub(1));
                let y = text_area.y + (caret.line - view.scroll_top) as u16;
                frame.set_cursor_position(Position::new(x, y));
            }
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(toolbar_area);
        frame.render_widget(
            Paragraph::new(toolbar_line(view, &theme)).style(theme.toolbar_style()),
            rows[0],
        );

        let second = if let Some(prompt) = &view.prompt {
            let line = Line::from(vec![
                Span::raw(format!("{} (#rrggbb, name, empty = default): ", prompt.target.label())),
                Span::raw(prompt.input.clone()),
            ]);
            let x = rows[1].x + line.width().min(rows[1].width.saturating_sub(1) as usize) as u16;
            frame.set_cursor_position(Position::new(x, rows[1].y));
            Paragraph::new(line).style(theme.prompt_style())
        } else {
            let text = status.unwrap_or_else(|| {
                "Drag or Shift+arrows to select  Wheel/PgUp/PgDn scroll  Esc Back  q Quit"
                    .to_string()
            });
            Paragraph::new(Line::from(text)).style(theme.toolbar_style())
        };
        frame.render_widget(second, rows[1]);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if code == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
                    self.should_quit = true;
                    return;
                }
                match self.screen {
                    Screen::Input => self.handle_input_key(code, modifiers),
                    Screen::Prompter(_) => self.handle_prompter_key(code, modifiers),
                }
            }
            Event::Paste(text) => match &mut self.screen {
                Screen::Input => self.input.insert_str(&text),
                Screen::Prompter(view) => {
                    if let Some(prompt) = &mut view.prompt {
                        prompt.input.push_str(text.trim());
                    }
                }
            },
            Event::Mouse(mouse_event) => {
                if let Screen::Prompter(view) = &mut self.screen {
                    handle_prompter_mouse(view, mouse_event, self.config.wheel_lines);
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match (code, modifiers) {
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => self.start_prompter(),
            (KeyCode::F(5), _) => self.start_prompter(),
            (KeyCode::Char(_), m) if m.contains(KeyModifiers::CONTROL) => {}
            (KeyCode::Char(ch), _) => self.input.insert_char(ch),
            (KeyCode::Enter, _) => self.input.insert_newline(),
            (KeyCode::Tab, _) => self.input.insert_char('\t'),
            (KeyCode::Backspace, _) => {
                self.input.backspace();
            }
            (KeyCode::Delete, _) => {
                self.input.delete();
            }
            (KeyCode::Left, _) => self.input.move_left(),
            (KeyCode::Right, _) => self.input.move_right(),
            (KeyCode::Up, _) => self.input.move_up(),
            (KeyCode::Down, _) => self.input.move_down(),
            (KeyCode::Home, _) => self.input.move_home(),
            (KeyCode::End, _) => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_prompter_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let Screen::Prompter(view) = &mut self.screen else {
            return;
        };

        if let Some(prompt) = &mut view.prompt {
            match code {
                KeyCode::Esc => view.prompt = None,
                KeyCode::Enter => {
                    if let Some(prompt) = view.prompt.take() {
                        let default_background = self.config.background_color;
                        if let Err(message) = submit_prompt(view, prompt, default_background) {
                            self.set_status(message);
                        }
                    }
                }
                KeyCode::Backspace => {
                    prompt.input.pop();
                }
                KeyCode::Char(ch) => prompt.input.push(ch),
                _ => {}
            }
            return;
        }

        let extend = modifiers.contains(KeyModifiers::SHIFT);
        match code {
            KeyCode::Esc => {
                self.back_to_input();
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => view.autoscroll.toggle(),
            KeyCode::Char('+') | KeyCode::Char('=') => view.autoscroll.faster(),
            KeyCode::Char('-') => view.autoscroll.slower(),
            KeyCode::Char(']') => view.line_spacing = (view.line_spacing + 1).min(MAX_LINE_SPACING),
            KeyCode::Char('[') => view.line_spacing = view.line_spacing.saturating_sub(1),
            KeyCode::Char('l') => view.alignment = Alignment::Left,
            KeyCode::Char('c') => view.alignment = Alignment::Center,
            KeyCode::Char('r') => view.alignment = Alignment::Right,
            KeyCode::Char('b') => view.dispatch(Action::Toggle(FormatKind::Bold)),
            KeyCode::Char('i') => view.dispatch(Action::Toggle(FormatKind::Italic)),
            KeyCode::Char('u') => view.dispatch(Action::Toggle(FormatKind::Underline)),
            KeyCode::Char('t') => {
                view.prompt = Some(ColorPrompt {
                    target: PromptTarget::Text,
                    input: String::new(),
                });
            }
            KeyCode::Char('g') => {
                view.prompt = Some(ColorPrompt {
                    target: PromptTarget::Background,
                    input: String::new(),
                });
            }
            KeyCode::Left => view.navigate(Motion::Left, extend),
            KeyCode::Right => view.navigate(Motion::Right, extend),
            KeyCode::Up => view.navigate(Motion::Up, extend),
            KeyCode::Down => view.navigate(Motion::Down, extend),
            KeyCode::Home => view.navigate(Motion::LineStart, extend),
            KeyCode::End => view.navigate(Motion::LineEnd, extend),
            KeyCode::PageUp => view.scroll_by(-(view.viewport_height() as isize)),
            KeyCode::PageDown => view.scroll_by(view.viewport_height() as isize),
            _ => {}
        }
    }
}

fn submit_prompt(
    view: &mut PrompterView,
    prompt: ColorPrompt,
    default_background: Rgb,
) -> Result<(), String> {
    let trimmed = prompt.input.trim();
    let color = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.parse::<Rgb>().map_err(|err| err.to_string())?)
    };
    match prompt.target {
        PromptTarget::Text => view.dispatch(Action::SetColor(color)),
        PromptTarget::Background => view.background = color.unwrap_or(default_background),
    }
    Ok(())
}

fn handle_prompter_mouse(view: &mut PrompterView, event: MouseEvent, wheel_lines: usize) {
    match event.kind {
        MouseEventKind::ScrollUp => view.scroll_by(-(wheel_lines as isize)),
        MouseEventKind::ScrollDown => view.scroll_by(wheel_lines as isize),
        MouseEventKind::Down(MouseButton::Left) => {
            let area = view.text_area;
            let inside = event.column >= area.x
                && event.column < area.x + area.width
                && event.row >= area.y
                && event.row < area.y + area.height;
            if !inside {
                return;
            }
            if let Some(point) = view.point_from_mouse(event.column, event.row) {
                view.native.collapse(point);
                view.dragging = true;
                view.drag_moved = false;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !view.dragging {
                return;
            }
            if let Some(point) = view.point_from_mouse(event.column, event.row) {
                view.native.extend(point);
                view.drag_moved = true;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if !view.dragging {
                return;
            }
            view.dragging = false;
            view.read_selection();
            if !view.drag_moved {
                view.pending_read = true;
            }
        }
        _ => {}
    }
}

fn toolbar_line(view: &PrompterView, theme: &Theme) -> Line<'static> {
    let format = view.state.default_format;
    let play = if view.autoscroll.is_playing() {
        "Pause"
    } else {
        "Play"
    };
    let text_colour = format
        .color
        .map(|rgb| rgb.to_string())
        .unwrap_or_else(|| "default".to_string());

    let mut spans = vec![
        Span::raw(" [Esc] Back "),
        Span::raw(format!(" [Space] {play} ")),
        Span::raw(format!(" Speed {:.1} (-/+) ", view.autoscroll.speed())),
        Span::raw(format!(" Size {} ([/]) ", view.line_spacing)),
    ];
    for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
        spans.push(Span::styled(
            format!(" {} ", alignment.label()),
            theme.toggle_style(view.alignment == alignment),
        ));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        " B ",
        theme
            .toggle_style(format.flag(FormatKind::Bold))
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        " I ",
        theme
            .toggle_style(format.flag(FormatKind::Italic))
            .add_modifier(Modifier::ITALIC),
    ));
    spans.push(Span::styled(
        " U ",
        theme
            .toggle_style(format.flag(FormatKind::Underline))
            .add_modifier(Modifier::UNDERLINED),
    ));
    spans.push(Span::raw(format!(" Text {text_colour} (t) ")));
    spans.push(Span::raw(format!(" BG {} (g) ", view.background)));
    Line::from(spans)
}
