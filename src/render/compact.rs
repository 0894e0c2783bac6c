use crate::model::{Field, FieldVisibility, ProfileRecord};
use crate::render::{title, visible_cells, Presentation, RenderedRecord, ViewKind, ViewRenderer};

const INLINE: [Field; 5] = [
    Field::Email,
    Field::NationalId,
    Field::Gender,
    Field::Age,
    Field::City,
];

/// Name plus a single inline line of labelled fields
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactView;

impl ViewRenderer for CompactView {
    fn kind(&self) -> ViewKind {
        ViewKind::Compact
    }

    fn render(&self, records: &[&ProfileRecord], visibility: &FieldVisibility) -> Presentation {
        let records = records
            .iter()
            .enumerate()
            .map(|(position, record)| RenderedRecord {
                position,
                title: title(record, visibility),
                lines: vec![visible_cells(record, &INLINE, visibility)],
            })
            .collect();

        Presentation {
            kind: ViewKind::Compact,
            headers: Vec::new(),
            records,
        }
    }
}
