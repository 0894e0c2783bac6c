use crate::model::{Field, FieldVisibility, ProfileRecord};
use crate::pipeline::SortSpec;
use crate::render::{visible_cells, ColumnHeader, Presentation, RenderedRecord, ViewKind, ViewRenderer};

/// One row per record under sortable column headers
#[derive(Debug, Clone, Copy, Default)]
pub struct TableView {
    sort: Option<SortSpec>,
}

impl TableView {
    pub fn new(sort: Option<SortSpec>) -> Self {
        Self { sort }
    }

    /// Visible columns, in display order
    pub fn columns(visibility: &FieldVisibility) -> Vec<Field> {
        Field::COLUMNS
            .into_iter()
            .filter(|field| visibility.is_visible(*field))
            .collect()
    }

    fn headers(&self, visibility: &FieldVisibility) -> Vec<ColumnHeader> {
        Self::columns(visibility)
            .into_iter()
            .map(|field| ColumnHeader {
                field,
                title: field.header(),
                indicator: self
                    .sort
                    .filter(|spec| spec.key == field)
                    .map(|spec| spec.direction.indicator()),
            })
            .collect()
    }
}

impl ViewRenderer for TableView {
    fn kind(&self) -> ViewKind {
        ViewKind::Table
    }

    fn render(&self, records: &[&ProfileRecord], visibility: &FieldVisibility) -> Presentation {
        let records = records
            .iter()
            .enumerate()
            .map(|(position, record)| RenderedRecord {
                position,
                title: None,
                lines: vec![visible_cells(record, &Field::COLUMNS, visibility)],
            })
            .collect();

        Presentation {
            kind: ViewKind::Table,
            headers: self.headers(visibility),
            records,
        }
    }
}
