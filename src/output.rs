//! Plain-text output of a presentation for the non-interactive commands

use crate::model::ProfileRecord;
use crate::render::{Cell, Presentation, RenderedRecord, ViewKind};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print a presentation in its view's layout
pub fn print_presentation(presentation: &Presentation, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    match presentation.kind {
        ViewKind::Table => print_table(&mut stdout, presentation)?,
        ViewKind::Cards => {
            for (i, record) in presentation.records.iter().enumerate() {
                if i > 0 {
                    writeln!(stdout)?;
                }
                print_card(&mut stdout, record)?;
            }
        }
        ViewKind::Compact => {
            for record in &presentation.records {
                print_compact(&mut stdout, record)?;
            }
        }
    }

    Ok(())
}

/// Print the displayed records as a JSON array using the service's field names
pub fn print_json(records: &[&ProfileRecord]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, records)?;
    writeln!(stdout)
}

fn cell_text(cell: &Cell) -> &str {
    cell.text.as_deref().unwrap_or("")
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Write `text` padded to `target` columns
fn padded(out: &mut StandardStream, text: &str, target: usize) -> io::Result<()> {
    write!(out, "{}{}", text, " ".repeat(target.saturating_sub(width(text))))
}

fn write_value(out: &mut StandardStream, cell: &Cell, pad_to: Option<usize>) -> io::Result<()> {
    if cell.invalid {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    }
    match pad_to {
        Some(target) => padded(out, cell_text(cell), target)?,
        None => write!(out, "{}", cell_text(cell))?,
    }
    out.reset()
}

fn print_table(out: &mut StandardStream, presentation: &Presentation) -> io::Result<()> {
    let titles: Vec<String> = presentation
        .headers
        .iter()
        .map(|h| match h.indicator {
            Some(arrow) => format!("{} {}", h.title, arrow),
            None => h.title.to_string(),
        })
        .collect();

    let mut widths: Vec<usize> = titles.iter().map(|t| width(t)).collect();
    for record in &presentation.records {
        for (i, cell) in record.cells().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell_text(cell)));
            }
        }
    }

    out.set_color(ColorSpec::new().set_bold(true))?;
    for (title, w) in titles.iter().zip(&widths) {
        padded(out, title, *w)?;
        write!(out, "  ")?;
    }
    out.reset()?;
    writeln!(out)?;

    for record in &presentation.records {
        for (cell, w) in record.cells().zip(&widths) {
            write_value(out, cell, Some(*w))?;
            write!(out, "  ")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn print_title(out: &mut StandardStream, record: &RenderedRecord) -> io::Result<()> {
    if let Some(title) = &record.title {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{title}")?;
        out.reset()?;
    }
    Ok(())
}

fn print_labelled(out: &mut StandardStream, cell: &Cell) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}: ", cell.field.label())?;
    out.reset()?;
    write_value(out, cell, None)
}

fn print_card(out: &mut StandardStream, record: &RenderedRecord) -> io::Result<()> {
    if record.title.is_some() {
        print_title(out, record)?;
        writeln!(out)?;
    }
    for line in &record.lines {
        for (i, cell) in line.iter().enumerate() {
            if i > 0 {
                write!(out, "   ")?;
            }
            write!(out, "  ")?;
            print_labelled(out, cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_compact(out: &mut StandardStream, record: &RenderedRecord) -> io::Result<()> {
    print_title(out, record)?;
    for cell in record.cells() {
        write!(out, " | ")?;
        print_labelled(out, cell)?;
    }
    writeln!(out)
}
