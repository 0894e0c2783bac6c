use crate::error::Error;
use crate::model::{Field, ProfileRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Sort direction for the single active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow shown next to the active column header
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort: one key, one direction. "No sort" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Field,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: Field) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: Field) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Column-header click policy: the active ascending column flips to
/// descending; anything else starts ascending on the clicked column.
pub fn toggle(current: Option<SortSpec>, key: Field) -> SortSpec {
    match current {
        Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
            SortSpec::descending(key)
        }
        _ => SortSpec::ascending(key),
    }
}

/// A comparable sort key extracted from a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    Text(String),
    Number(u64),
}

impl SortValue {
    fn kind(&self) -> &'static str {
        match self {
            SortValue::Text(_) => "text",
            SortValue::Number(_) => "number",
        }
    }
}

/// Extract the sort key for `field`; `None` when the record lacks it.
/// Text keys are lower-cased, gender sorts by its canonical token.
pub fn sort_value(record: &ProfileRecord, field: Field) -> Option<SortValue> {
    let text = |v: &Option<String>| v.as_deref().map(|s| SortValue::Text(s.to_lowercase()));
    match field {
        Field::FirstName => text(&record.first_name),
        Field::LastName => text(&record.last_name),
        Field::FullName => text(&record.full_name),
        Field::Email => text(&record.email),
        Field::NationalId => text(&record.national_id),
        Field::Gender => record.gender.map(|g| SortValue::Text(g.canonical().to_string())),
        Field::Age => record.age.map(|a| SortValue::Number(u64::from(a))),
        Field::City => text(&record.city),
    }
}

/// Compare two present keys of the same kind
pub fn compare_values(a: &SortValue, b: &SortValue) -> Result<Ordering, Error> {
    match (a, b) {
        (SortValue::Text(x), SortValue::Text(y)) => Ok(x.cmp(y)),
        (SortValue::Number(x), SortValue::Number(y)) => Ok(x.cmp(y)),
        _ => Err(Error::InvalidSortComparison {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}

/// Order two (possibly missing) keys under `direction`.
///
/// A missing key sorts after every present key in both directions.
/// Incomparable keys are logged and treated as equal.
pub fn compare_keys(
    a: Option<&SortValue>,
    b: Option<&SortValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match compare_values(x, y) {
            Ok(ord) => match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            },
            Err(e) => {
                warn!("{e}; leaving records unordered");
                Ordering::Equal
            }
        },
    }
}

/// Compare two records under `spec`. With no sort every pair is equal, so a
/// stable sort leaves the input order untouched.
pub fn compare(a: &ProfileRecord, b: &ProfileRecord, spec: Option<SortSpec>) -> Ordering {
    match spec {
        None => Ordering::Equal,
        Some(spec) => compare_keys(
            sort_value(a, spec.key).as_ref(),
            sort_value(b, spec.key).as_ref(),
            spec.direction,
        ),
    }
}

/// Stable in-place sort of `indices` (into `records`) under `spec`.
pub fn sort_indices(records: &[ProfileRecord], indices: &mut Vec<usize>, spec: Option<SortSpec>) {
    let Some(spec) = spec else {
        return;
    };

    // Extract keys once; the comparator only touches the cached values.
    let mut keyed: Vec<(usize, Option<SortValue>)> = indices
        .iter()
        .map(|&i| (i, sort_value(&records[i], spec.key)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| compare_keys(a.as_ref(), b.as_ref(), spec.direction));

    indices.clear();
    indices.extend(keyed.into_iter().map(|(i, _)| i));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(name: &str, age: Option<u32>) -> ProfileRecord {
        ProfileRecord {
            full_name: Some(name.into()),
            age,
            ..Default::default()
        }
    }

    fn names(records: &[ProfileRecord], indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| records[i].full_name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_toggle_sequence() {
        let spec = toggle(None, Field::Age);
        assert_eq!(spec, SortSpec::ascending(Field::Age));

        let spec = toggle(Some(spec), Field::Age);
        assert_eq!(spec, SortSpec::descending(Field::Age));

        let spec = toggle(Some(spec), Field::City);
        assert_eq!(spec, SortSpec::ascending(Field::City));
    }

    #[test]
    fn test_toggle_descending_same_column_resets() {
        let spec = toggle(Some(SortSpec::descending(Field::Email)), Field::Email);
        assert_eq!(spec, SortSpec::ascending(Field::Email));
    }

    #[test]
    fn test_age_ascending_missing_last() {
        let records = vec![aged("A", Some(30)), aged("B", None), aged("C", Some(25))];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, Some(SortSpec::ascending(Field::Age)));
        assert_eq!(names(&records, &indices), ["C", "A", "B"]);
    }

    #[test]
    fn test_missing_last_when_descending() {
        let records = vec![aged("A", None), aged("B", Some(20)), aged("C", Some(70))];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, Some(SortSpec::descending(Field::Age)));
        assert_eq!(names(&records, &indices), ["C", "B", "A"]);
    }

    #[test]
    fn test_text_case_insensitive() {
        let records = vec![aged("banana", None), aged("Apple", None), aged("cherry", None)];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, Some(SortSpec::ascending(Field::FullName)));
        assert_eq!(names(&records, &indices), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let records = vec![
            aged("first", Some(40)),
            aged("second", Some(30)),
            aged("third", Some(40)),
            aged("fourth", Some(30)),
        ];
        let mut indices = vec![0, 1, 2, 3];
        sort_indices(&records, &mut indices, Some(SortSpec::descending(Field::Age)));
        assert_eq!(names(&records, &indices), ["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_no_sort_is_pass_through() {
        let records = vec![aged("z", Some(1)), aged("a", Some(2))];
        let mut indices = vec![1, 0];
        sort_indices(&records, &mut indices, None);
        assert_eq!(indices, [1, 0]);
        assert_eq!(compare(&records[0], &records[1], None), Ordering::Equal);
    }

    #[test]
    fn test_mixed_kinds_are_rejected() {
        let result = compare_values(&SortValue::Text("a".into()), &SortValue::Number(1));
        assert!(matches!(result, Err(Error::InvalidSortComparison { .. })));
        assert_eq!(
            compare_keys(
                Some(&SortValue::Number(3)),
                Some(&SortValue::Text("x".into())),
                SortDirection::Ascending
            ),
            Ordering::Equal
        );
    }

    #[test]
    fn test_age_sorts_numerically() {
        let records = vec![aged("nine", Some(9)), aged("eighty", Some(80)), aged("ten", Some(10))];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, Some(SortSpec::ascending(Field::Age)));
        assert_eq!(names(&records, &indices), ["nine", "ten", "eighty"]);
    }
}
