use crate::model::{Field, FieldVisibility, ProfileRecord};

/// Case-insensitive substring filter over the searchable fields of a record.
///
/// The query is lower-cased once; each compared value is lower-cased on the
/// fly. A record matches when any searchable field that is both visible and
/// present contains the query.
#[derive(Debug, Clone)]
pub struct Filter {
    needle: String,
}

impl Filter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query filters nothing
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &ProfileRecord, visibility: &FieldVisibility) -> bool {
        if self.is_empty() {
            return true;
        }

        let visible_text = |field: Field, value: &Option<String>| {
            visibility.is_visible(field) && value.as_deref().is_some_and(|v| self.contains(v))
        };

        // Full name is compared regardless of the name-part flags.
        let full_name = record.full_name.as_deref().is_some_and(|v| self.contains(v));

        let gender = visibility.is_visible(Field::Gender)
            && record.gender.is_some_and(|g| {
                self.contains(g.canonical()) || self.contains(g.localized())
            });

        visible_text(Field::FirstName, &record.first_name)
            || visible_text(Field::LastName, &record.last_name)
            || full_name
            || visible_text(Field::Email, &record.email)
            || visible_text(Field::NationalId, &record.national_id)
            || gender
    }

    fn contains(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

/// Whether `record` passes `query` under `visibility`.
pub fn matches(record: &ProfileRecord, query: &str, visibility: &FieldVisibility) -> bool {
    Filter::new(query).matches(record, visibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    fn dana() -> ProfileRecord {
        ProfileRecord {
            first_name: Some("Dana".into()),
            last_name: Some("Cohen".into()),
            full_name: Some("Dana Cohen".into()),
            email: Some("dana.cohen@gmail.com".into()),
            national_id: Some("123456782".into()),
            gender: Some(Gender::Female),
            age: Some(29),
            city: Some("Holon".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let visibility = FieldVisibility::hiding(&Field::TOGGLES);
        assert!(matches(&ProfileRecord::default(), "", &visibility));
        assert!(matches(&dana(), "", &FieldVisibility::default()));
    }

    #[test]
    fn test_case_insensitive() {
        let visibility = FieldVisibility::default();
        assert!(matches(&dana(), "COHEN", &visibility));
        assert!(matches(&dana(), "Gmail", &visibility));
    }

    #[test]
    fn test_hidden_field_never_matches() {
        let visibility = FieldVisibility::hiding(&[Field::Email]);
        assert!(!matches(&dana(), "gmail", &visibility));
    }

    #[test]
    fn test_full_name_ignores_name_flags() {
        let visibility = FieldVisibility::hiding(&[Field::FirstName, Field::LastName]);
        assert!(matches(&dana(), "dana c", &visibility));
    }

    #[test]
    fn test_gender_matches_both_tokens() {
        let visibility = FieldVisibility::default();
        let mut record = ProfileRecord {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        assert!(matches(&record, "זכר", &visibility));
        assert!(matches(&record, "MALE", &visibility));

        record.gender = Some(Gender::Female);
        assert!(matches(&record, "נקבה", &visibility));
        // "male" is a substring of "female"
        assert!(matches(&record, "male", &visibility));
        assert!(!matches(&record, "זכר", &visibility));
    }

    #[test]
    fn test_gender_hidden_does_not_match() {
        let visibility = FieldVisibility::hiding(&[Field::Gender]);
        let record = ProfileRecord {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        assert!(!matches(&record, "זכר", &visibility));
    }

    #[test]
    fn test_national_id_substring() {
        let visibility = FieldVisibility::default();
        assert!(matches(&dana(), "4567", &visibility));
        assert!(!matches(&dana(), "999", &visibility));
    }

    #[test]
    fn test_age_and_city_are_not_searched() {
        let visibility = FieldVisibility::default();
        assert!(!matches(&dana(), "holon", &visibility));
        assert!(!matches(&dana(), "29", &visibility));
    }

    #[test]
    fn test_missing_fields_do_not_match() {
        let visibility = FieldVisibility::default();
        assert!(!matches(&ProfileRecord::default(), "a", &visibility));
    }
}
