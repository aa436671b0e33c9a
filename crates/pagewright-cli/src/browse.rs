//! Terminal page browser: a page list on the left, the selected page's
//! editing session on the right.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pagewright_engine::{Dialect, EditorSession, ViewMode, io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use relative_path::RelativePathBuf;
use std::io::{Stdout, stdout};
use std::path::PathBuf;

struct App {
    site_root: PathBuf,
    dialect: Dialect,
    pages: Vec<RelativePathBuf>,
    page_list_state: ListState,
    session: Option<EditorSession>,
    status: String,
}

impl App {
    fn new(site_root: PathBuf, dialect: Dialect) -> Result<Self> {
        let pages = io::scan_pages(&site_root)?;

        let mut app = Self {
            site_root,
            dialect,
            pages,
            page_list_state: ListState::default(),
            session: None,
            status: String::new(),
        };

        if !app.pages.is_empty() {
            app.page_list_state.select(Some(0));
            app.load_selected();
        }

        Ok(app)
    }

    fn selected_page(&self) -> Option<&RelativePathBuf> {
        self.page_list_state
            .selected()
            .and_then(|index| self.pages.get(index))
    }

    fn next_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(i) => (i + 1) % self.pages.len(),
            None => 0,
        };
        self.page_list_state.select(Some(i));
        self.load_selected();
    }

    fn previous_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(0) | None => self.pages.len() - 1,
            Some(i) => i - 1,
        };
        self.page_list_state.select(Some(i));
        self.load_selected();
    }

    fn load_selected(&mut self) {
        let Some(page) = self.selected_page().cloned() else {
            return;
        };
        match io::read_page(&page, &self.site_root) {
            Ok(content) => {
                self.session = Some(EditorSession::open(self.dialect.clone(), &content));
                self.status = format!("Opened {page}");
            }
            Err(e) => {
                self.session = None;
                self.status = format!("Error reading page: {e}");
            }
        }
    }

    fn toggle_view(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let mode = session.toggle();
            self.status = format!("{} view", mode_name(mode));
        }
    }

    fn save_selected(&mut self) {
        let Some(page) = self.selected_page().cloned() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome = session.prepare_save();
        match io::write_page(&page, &self.site_root, &outcome.source) {
            Ok(()) => {
                self.status = if outcome.is_lossless() {
                    format!("Saved {page}")
                } else {
                    format!("Saved {page}; dropped {}", outcome.dropped.join(", "))
                };
                session.commit_saved(outcome.source);
            }
            Err(e) => self.status = format!("Error saving page: {e}"),
        }
    }
}

fn mode_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Visual => "Visual",
        ViewMode::Code => "Code",
    }
}

pub fn run(site_root: PathBuf, dialect: Dialect) -> Result<()> {
    let mut app = App::new(site_root, dialect)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_page(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_page(),
                KeyCode::Tab => app.toggle_view(),
                KeyCode::Char('w') => app.save_selected(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    let page_items: Vec<ListItem> = app
        .pages
        .iter()
        .map(|page| ListItem::new(Line::from(Span::raw(page.to_string()))))
        .collect();

    let pages_list = List::new(page_items)
        .block(Block::default().borders(Borders::ALL).title("Pages"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(pages_list, chunks[0], &mut app.page_list_state);

    let (title, content_text) = match &app.session {
        Some(session) => (
            format!("{} view", mode_name(session.view_mode())),
            session.content().lines().map(Line::from).collect(),
        ),
        None => (
            "Content".to_string(),
            vec![Line::from("Select a page to view its content")],
        ),
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(vec![
        Line::from("q: Quit | ↑/k: Previous | ↓/j: Next | Tab: Visual/Code | w: Save"),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    f.render_widget(help, rows[1]);
}
