use crate::model::{Field, FieldVisibility, ProfileRecord};
use crate::render::{title, visible_cells, Presentation, RenderedRecord, ViewKind, ViewRenderer};

/// Name heading, email and id stacked, then gender/age/city side by side
#[derive(Debug, Clone, Copy, Default)]
pub struct CardView;

const STACKED: [Field; 2] = [Field::Email, Field::NationalId];
const GROUPED: [Field; 3] = [Field::Gender, Field::Age, Field::City];

impl ViewRenderer for CardView {
    fn kind(&self) -> ViewKind {
        ViewKind::Cards
    }

    fn render(&self, records: &[&ProfileRecord], visibility: &FieldVisibility) -> Presentation {
        let records = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let mut lines: Vec<Vec<_>> = visible_cells(record, &STACKED, visibility)
                    .into_iter()
                    .map(|cell| vec![cell])
                    .collect();

                let grouped = visible_cells(record, &GROUPED, visibility);
                if !grouped.is_empty() {
                    lines.push(grouped);
                }

                RenderedRecord {
                    position,
                    title: title(record, visibility),
                    lines,
                }
            })
            .collect();

        Presentation {
            kind: ViewKind::Cards,
            headers: Vec::new(),
            records,
        }
    }
}
