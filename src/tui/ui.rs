use crate::model::Field;
use crate::render::{Cell, Presentation, ViewKind};
use crate::tui::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell as TableCell, Clear, List, ListItem, ListState, Paragraph, Row,
        Table, TableState, Wrap,
    },
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Toast / status
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_results(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
    draw_hints(f, app, chunks[3]);

    match app.mode {
        Mode::Fields => draw_fields_panel(f, app),
        Mode::Help => draw_help(f),
        Mode::Browse => {}
    }
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let query = app.session.query();
    let input = Paragraph::new(query)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search (name, email, id, gender) "),
        );

    f.render_widget(input, area);

    if app.mode == Mode::Browse {
        let width = query.chars().count() as u16;
        f.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    let total = app.session.raw().len();
    let presentation = app.session.present();
    let title = format!(
        " Results ({}/{}) [{}] ",
        presentation.records.len(),
        total,
        presentation.kind
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if presentation.records.is_empty() {
        let message = if total == 0 {
            "No profiles yet. Press F2 to generate."
        } else {
            "No profiles match the search."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let selected = app.session.selected();
    match presentation.kind {
        ViewKind::Table => draw_table(f, app, &presentation, block, selected, area),
        ViewKind::Cards | ViewKind::Compact => draw_list(f, &presentation, block, selected, area),
    }
}

fn cell_span(cell: &Cell) -> Span<'static> {
    let style = if cell.invalid {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    Span::styled(cell.text.clone().unwrap_or_default(), style)
}

fn column_width(field: Field) -> Constraint {
    match field {
        Field::NationalId => Constraint::Length(11),
        Field::Gender => Constraint::Length(8),
        Field::Age => Constraint::Length(6),
        Field::Email => Constraint::Min(20),
        _ => Constraint::Min(12),
    }
}

fn draw_table(
    f: &mut Frame,
    app: &App,
    presentation: &Presentation,
    block: Block,
    selected: usize,
    area: Rect,
) {
    let header_cells = presentation.headers.iter().enumerate().map(|(i, h)| {
        let title = match h.indicator {
            Some(arrow) => format!("{} {}", h.title, arrow),
            None => h.title.to_string(),
        };
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if i == app.column {
            style = style.fg(Color::Black).bg(Color::Cyan);
        } else if h.indicator.is_some() {
            style = style.fg(Color::Cyan);
        }
        TableCell::from(title).style(style)
    });
    let header = Row::new(header_cells).height(1);

    let rows = presentation.records.iter().map(|record| {
        Row::new(
            record
                .cells()
                .map(|cell| TableCell::from(Line::from(cell_span(cell)))),
        )
    });

    let widths: Vec<Constraint> = presentation
        .headers
        .iter()
        .map(|h| column_width(h.field))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_list(
    f: &mut Frame,
    presentation: &Presentation,
    block: Block,
    selected: usize,
    area: Rect,
) {
    let cards = presentation.kind == ViewKind::Cards;
    let items: Vec<ListItem> = presentation
        .records
        .iter()
        .map(|record| {
            let mut lines = Vec::new();
            let title = record.title.clone().unwrap_or_default();
            let title_style = Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD);

            if cards {
                if !title.is_empty() {
                    lines.push(Line::from(Span::styled(title, title_style)));
                }
                for group in &record.lines {
                    lines.push(labelled_line(group));
                }
                lines.push(Line::raw(""));
            } else {
                let mut line = Vec::new();
                if !title.is_empty() {
                    line.push(Span::styled(title, title_style));
                }
                for cell in record.cells() {
                    if !line.is_empty() {
                        line.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
                    }
                    line.push(cell_span(cell));
                }
                lines.push(Line::from(line));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn labelled_line(group: &[Cell]) -> Line<'static> {
    let label_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for (i, cell) in group.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", label_style));
        }
        spans.push(Span::styled(format!("{}: ", cell.field.label()), label_style));
        spans.push(cell_span(cell));
    }
    Line::from(spans)
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(toast) = app.toast() {
        Paragraph::new(toast).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else if let Some(elapsed) = app.pending_for() {
        let text = format!("{} ({:.1}s)", app.status_message, elapsed.as_secs_f32());
        Paragraph::new(text).style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Cyan))
    };

    f.render_widget(status, area);
}

fn draw_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        Mode::Browse => {
            "F2 generate  F3 export  F4 fields  Tab view  Enter sort/copy  Ctrl+Y copy  F1 help  Esc quit"
        }
        Mode::Fields => "Space toggle  +/- count  F2 generate  Esc close",
        Mode::Help => "Any key closes help",
    };
    let hints = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, area);
}

/// Rectangle of the given size centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_fields_panel(f: &mut Frame, app: &App) {
    let visibility = app.session.visibility();
    let mut lines: Vec<Line> = Field::TOGGLES
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let mark = if visibility.is_visible(*field) { "[x]" } else { "[ ]" };
            let style = if i == app.field_cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {mark} {}", field.label()), style))
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw(" Count: "),
        Span::styled(
            app.session.count().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (+/-)", Style::default().fg(Color::DarkGray)),
    ]));

    let area = centered(f.area(), 36, lines.len() as u16 + 2);
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Fields ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}

fn draw_help(f: &mut Frame) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let entries = [
        ("F2", "Generate profiles"),
        ("F3", "Export displayed profiles"),
        ("F4", "Choose fields and count"),
        ("Tab", "Cycle table / cards / compact"),
        ("Up/Down PgUp/PgDn", "Move selection"),
        ("Left/Right", "Move column cursor (table)"),
        ("Enter", "Sort by column (table) or copy all"),
        ("Ctrl+Y", "Copy all visible details"),
        ("Alt+1..6", "Copy name, email, id, gender, age, city"),
        ("Ctrl+W", "Delete word from search"),
        ("Esc", "Clear search, then quit"),
        ("Ctrl+C", "Quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {key:<18}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered(f.area(), 64, lines.len() as u16 + 2);
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
