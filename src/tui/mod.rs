mod app;
mod ui;

pub use app::{App, Mode};

use crate::model::Field;
use crate::render::CopyTarget;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Fields reachable through Alt+1..6, in key order
const QUICK_COPY: [Field; 6] = [
    Field::FullName,
    Field::Email,
    Field::NationalId,
    Field::Gender,
    Field::Age,
    Field::City,
];

pub fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Collect finished collaborator calls and expire the toast
        app.tick();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Only handle key press events, not release or repeat
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return Flow::Quit;
    }

    match app.mode {
        // Any key closes help
        Mode::Help => app.hide_help(),
        Mode::Fields => handle_fields_key(app, key),
        Mode::Browse => return handle_browse_key(app, key),
    }
    Flow::Continue
}

fn handle_fields_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::F(4) => app.hide_fields(),
        KeyCode::Down | KeyCode::Char('j') => app.field_next(),
        KeyCode::Up | KeyCode::Char('k') => app.field_prev(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_field_at_cursor(),
        KeyCode::Char('+') | KeyCode::Right => app.session.adjust_count(1),
        KeyCode::Char('-') | KeyCode::Left => app.session.adjust_count(-1),
        KeyCode::PageUp => app.session.adjust_count(10),
        KeyCode::PageDown => app.session.adjust_count(-10),
        KeyCode::F(2) => app.generate(),
        KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) -> Flow {
    match (key.modifiers, key.code) {
        (KeyModifiers::ALT, KeyCode::Char(c)) => {
            let field = c
                .to_digit(10)
                .and_then(|digit| (digit as usize).checked_sub(1))
                .and_then(|slot| QUICK_COPY.get(slot));
            if let Some(&field) = field {
                app.copy(CopyTarget::Field(field));
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('y')) => app.copy(CopyTarget::All),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.session.pop_query_char(),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.session.select_next(),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.session.select_prev(),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.session.select_page_down(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.session.select_page_up(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => app.session.select_first(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => app.session.select_last(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => {
                if app.session.query().is_empty() {
                    return Flow::Quit;
                }
                app.session.clear_query();
            }
            KeyCode::Enter => app.activate(),
            KeyCode::Tab => app.cycle_view(),
            KeyCode::Down => app.session.select_next(),
            KeyCode::Up => app.session.select_prev(),
            KeyCode::PageDown => app.session.select_page_down(),
            KeyCode::PageUp => app.session.select_page_up(),
            KeyCode::Home => app.session.select_first(),
            KeyCode::End => app.session.select_last(),
            KeyCode::Left => app.column_prev(),
            KeyCode::Right => app.column_next(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::F(2) => app.generate(),
            KeyCode::F(3) => app.export(),
            KeyCode::F(4) => app.show_fields(),
            KeyCode::Char(c) => app.session.push_query_char(c),
            KeyCode::Backspace => app.session.pop_query_char(),
            _ => {}
        },
        _ => {}
    }
    Flow::Continue
}
