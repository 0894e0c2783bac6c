//! View renderers.
//!
//! Each view turns the displayed sequence into a [`Presentation`]: a
//! layout-neutral description of what to show. The TUI and the plain-text
//! printer draw presentations; neither looks at records directly. All views
//! keep the displayed order and count, and leave hidden fields out.
//!
//! - [`table`] - one row per record, sortable column headers
//! - [`card`] - name heading over stacked and grouped fields
//! - [`compact`] - name plus one inline line of fields
//! - [`copy_text`] - copy-all summary and single-field copy text

pub mod card;
pub mod compact;
pub mod copy_text;
pub mod table;

pub use card::CardView;
pub use compact::CompactView;
pub use copy_text::{compose, summary, CopyTarget};
pub use table::TableView;

use crate::model::{Field, FieldVisibility, ProfileRecord};
use crate::pipeline::SortSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three alternate layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Table,
    #[default]
    Cards,
    Compact,
}

impl ViewKind {
    /// Next view in table -> cards -> compact order
    pub fn next(self) -> Self {
        match self {
            ViewKind::Table => ViewKind::Cards,
            ViewKind::Cards => ViewKind::Compact,
            ViewKind::Compact => ViewKind::Table,
        }
    }

    /// Renderer for this view. Only the table shows sort state.
    pub fn renderer(self, sort: Option<SortSpec>) -> Box<dyn ViewRenderer> {
        match self {
            ViewKind::Table => Box::new(TableView::new(sort)),
            ViewKind::Cards => Box::new(CardView),
            ViewKind::Compact => Box::new(CompactView),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Table => "table",
            ViewKind::Cards => "cards",
            ViewKind::Compact => "compact",
        })
    }
}

/// One rendered field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub field: Field,
    /// `None` when the field is shown but the record lacks it
    pub text: Option<String>,
    /// The generator flagged this value as invalid
    pub invalid: bool,
}

impl Cell {
    fn of(record: &ProfileRecord, field: Field) -> Self {
        Self {
            field,
            text: record.display_value(field),
            invalid: record.is_flagged_invalid(field),
        }
    }
}

/// A sort-trigger column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub field: Field,
    pub title: &'static str,
    /// Arrow when this column holds the active sort
    pub indicator: Option<&'static str>,
}

/// One record as laid out by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord {
    /// Position in the displayed sequence
    pub position: usize,
    /// Heading (the full name) when names are visible
    pub title: Option<String>,
    /// Groups of cells; each group is drawn on one line
    pub lines: Vec<Vec<Cell>>,
}

impl RenderedRecord {
    /// Every cell across all lines, in layout order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.lines.iter().flatten()
    }
}

/// What a view shows for the displayed sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub kind: ViewKind,
    /// Column headers (table view only)
    pub headers: Vec<ColumnHeader>,
    pub records: Vec<RenderedRecord>,
}

/// Layout strategy for the displayed sequence
pub trait ViewRenderer {
    fn kind(&self) -> ViewKind;

    fn render(&self, records: &[&ProfileRecord], visibility: &FieldVisibility) -> Presentation;
}

/// Cells for the visible subset of `fields`
pub(crate) fn visible_cells(
    record: &ProfileRecord,
    fields: &[Field],
    visibility: &FieldVisibility,
) -> Vec<Cell> {
    fields
        .iter()
        .filter(|field| visibility.is_visible(**field))
        .map(|field| Cell::of(record, *field))
        .collect()
}

/// Full name heading, when names are visible
pub(crate) fn title(record: &ProfileRecord, visibility: &FieldVisibility) -> Option<String> {
    if visibility.is_visible(Field::FullName) {
        Some(record.full_name.clone().unwrap_or_default())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    fn records() -> Vec<ProfileRecord> {
        (0..5)
            .map(|i| ProfileRecord {
                full_name: Some(format!("Person {i}")),
                email: Some(format!("p{i}@gmail.com")),
                national_id: Some(format!("00000000{i}")),
                gender: Some(if i % 2 == 0 { Gender::Male } else { Gender::Female }),
                age: Some(20 + i),
                city: Some("Lod".into()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_views_agree_on_count_and_order() {
        let raw = records();
        let shown: Vec<&ProfileRecord> = raw.iter().rev().collect();
        let visibility = FieldVisibility::default();

        for kind in [ViewKind::Table, ViewKind::Cards, ViewKind::Compact] {
            let presentation = kind.renderer(None).render(&shown, &visibility);
            assert_eq!(presentation.kind, kind);
            assert_eq!(presentation.records.len(), shown.len());

            for (i, rendered) in presentation.records.iter().enumerate() {
                assert_eq!(rendered.position, i);
                let id = rendered
                    .cells()
                    .find(|c| c.field == Field::NationalId)
                    .and_then(|c| c.text.clone());
                assert_eq!(id, shown[i].national_id, "{kind} reordered records");
            }
        }
    }

    #[test]
    fn test_hidden_fields_absent_in_every_view() {
        let raw = records();
        let shown: Vec<&ProfileRecord> = raw.iter().collect();
        let visibility = FieldVisibility::hiding(&[Field::Email, Field::Age]);

        for kind in [ViewKind::Table, ViewKind::Cards, ViewKind::Compact] {
            let presentation = kind.renderer(None).render(&shown, &visibility);
            assert!(presentation.headers.iter().all(|h| h.field != Field::Email));
            for rendered in &presentation.records {
                assert!(
                    rendered.cells().all(|c| c.field != Field::Email && c.field != Field::Age),
                    "{kind} shows a hidden field"
                );
            }
        }
    }

    #[test]
    fn test_names_hidden_removes_title_everywhere() {
        let raw = records();
        let shown: Vec<&ProfileRecord> = raw.iter().collect();
        let visibility = FieldVisibility::hiding(&[Field::FirstName, Field::LastName]);

        for kind in [ViewKind::Table, ViewKind::Cards, ViewKind::Compact] {
            let presentation = kind.renderer(None).render(&shown, &visibility);
            for rendered in &presentation.records {
                assert!(rendered.title.is_none());
                assert!(rendered.cells().all(|c| c.field != Field::FullName));
            }
        }
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(ViewKind::Table.next(), ViewKind::Cards);
        assert_eq!(ViewKind::Cards.next(), ViewKind::Compact);
        assert_eq!(ViewKind::Compact.next(), ViewKind::Table);
    }
}
