use crate::model::{Field, FieldVisibility, ProfileRecord};

/// Toast text after copying a whole record
pub const SUMMARY_COPIED: &str = "כל הפרטים הועתקו ללוח";

/// What a copy action takes from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// Every visible, present field as a labelled summary
    All,
    /// One field's display value
    Field(Field),
}

/// Labelled, newline-joined summary of a record.
///
/// Lines appear in name, email, id, gender, age, city order; a line is
/// included only when its field is visible and present on the record.
pub fn summary(record: &ProfileRecord, visibility: &FieldVisibility) -> String {
    Field::SUMMARY
        .iter()
        .filter_map(|&field| {
            let value = field_text(record, field, visibility)?;
            Some(format!("{}: {}", field.label(), value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display value of one field, `None` if it is hidden or missing
pub fn field_text(
    record: &ProfileRecord,
    field: Field,
    visibility: &FieldVisibility,
) -> Option<String> {
    if !visibility.is_visible(field) {
        return None;
    }
    record.display_value(field)
}

/// Text to put on the clipboard and the acknowledgment to show for it.
/// `None` when there is nothing to copy.
pub fn compose(
    record: &ProfileRecord,
    target: CopyTarget,
    visibility: &FieldVisibility,
) -> Option<(String, &'static str)> {
    match target {
        CopyTarget::All => {
            let text = summary(record, visibility);
            (!text.is_empty()).then_some((text, SUMMARY_COPIED))
        }
        CopyTarget::Field(field) => {
            field_text(record, field, visibility).map(|text| (text, field.copied_message()))
        }
    }
}
